//! Response envelope shared by every backend endpoint.

use serde::{Deserialize, Serialize};

/// Standard response envelope used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Join the backend's error strings into a single message.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        if self.errors.is_empty() {
            "request rejected by backend".to_string()
        } else {
            self.errors.join("; ")
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_pagination() {
        let envelope: Envelope<Vec<i32>> = serde_json::from_str(
            r#"{
                "success": true,
                "data": [1, 2, 3],
                "pagination": {"page": 2, "limit": 3, "total": 10, "totalPages": 4}
            }"#,
        )
        .expect("deserialize");
        assert!(envelope.success);
        assert_eq!(envelope.data.as_deref(), Some(&[1, 2, 3][..]));
        let pagination = envelope.pagination.expect("pagination");
        assert_eq!(pagination.total_pages, 4);
    }

    #[test]
    fn test_envelope_error_message() {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{"success": false, "errors": ["stock too low"]}"#)
                .expect("deserialize");
        assert_eq!(envelope.error_message(), "stock too low");
    }
}
