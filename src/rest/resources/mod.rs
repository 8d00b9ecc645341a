//! Version-specific REST resource bindings.
//!
//! Resources are organized by API version, matching the `/api/iacp/v3` base
//! path the client talks to:
//!
//! ```text
//! resources/
//!   mod.rs           <- This file (re-exports latest version)
//!   v3/
//!     mod.rs         <- Version-specific resources
//! ```
//!
//! # Using Resources
//!
//! The latest version is re-exported at this module level for convenience:
//!
//! ```rust,ignore
//! use scalr_api::rest::resources::Workspace;  // Uses latest version
//!
//! // Or explicitly specify a version:
//! use scalr_api::rest::resources::v3::Workspace;
//! ```

pub mod v3;

// Re-export types from the latest version for convenience
pub use v3::*;
