//! Networking modules for the profile service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls behind the `ProfileApi` seam and `types` defines
//! the wire schema plus the stored user record.

pub mod api;
pub mod types;
