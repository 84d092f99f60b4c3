//! # tdg-core
//!
//! Foundation crate for the Trust-Debt engine.
//! Defines the category space, all persisted record shapes, configuration,
//! errors, and workspace primitives (content-addressed run directories,
//! advisory locking). Every other crate in the workspace depends on this.

#![allow(dead_code)]

pub mod categories;
pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod workspace;

pub use categories::{Category, CATEGORY_COUNT};
pub use config::TrustDebtConfig;
pub use errors::TrustDebtErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::document::{DocumentType, RawDocument};
pub use types::identity::IdentityVector;
pub use types::requirement::{ActionRequirement, PermissionDecision};
