//! Back-office user entities and auth payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use twill_core::{Email, UserId, UserRole};

/// A back-office user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Denormalized user summary embedded in transaction payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<Email>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: the bearer token plus the account it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Filter for user listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Payload to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: Email,
    pub password: String,
    pub role: UserRole,
}

/// Payload to update a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Payload for the password change endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub new_password: String,
}

/// Payload for profile self-service updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

/// Aggregate user counts from `/users/stats/overview`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: u64,
    pub active_users: u64,
    pub admin_count: u64,
    pub manager_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_deserializes() {
        let response: LoginResponse = serde_json::from_str(
            r#"{
                "token": "eyJhbGciOiJIUzI1NiJ9.abc.def",
                "user": {
                    "id": 1,
                    "username": "admin",
                    "name": "Store Admin",
                    "email": "admin@twill.example",
                    "role": "ADMIN",
                    "isActive": true,
                    "createdAt": "2026-01-01T00:00:00Z",
                    "updatedAt": "2026-01-01T00:00:00Z",
                    "lastLogin": "2026-07-30T08:00:00Z"
                }
            }"#,
        )
        .expect("deserialize");
        assert_eq!(response.user.role, UserRole::Admin);
        assert!(response.user.last_login.is_some());
    }

    #[test]
    fn test_user_update_serializes_only_set_fields() {
        let update = UserUpdate {
            role: Some(UserRole::Manager),
            ..UserUpdate::default()
        };
        let json = serde_json::to_value(&update).expect("serialize");
        assert_eq!(json, serde_json::json!({"role": "MANAGER"}));
    }
}
