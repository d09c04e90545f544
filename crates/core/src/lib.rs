//! Twill Core - Shared types library.
//!
//! This crate provides common types used across all Twill components:
//! - `storefront` - Public-facing catalog site
//! - `admin` - Internal back-office panel
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. All domain
//! data is owned by the retail backend; these types describe the transient
//! copies the front-end services hold while a request is in flight.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles,
//!   and stock statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
