//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `profile_query`, `profile_form`, etc.)
//! so each piece can be tested without a browser. `settings` composes the
//! profile pieces into the page's data flow.

pub mod auth;
pub mod avatar;
pub mod notifications;
pub mod profile_form;
pub mod profile_query;
pub mod save;
pub mod settings;
