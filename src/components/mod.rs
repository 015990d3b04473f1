//! Reusable UI components for the settings page.
//!
//! DESIGN
//! ======
//! Components receive state signals as props and keep browser glue behind
//! `hydrate` so they render identically during SSR.

pub mod avatar_picker;
pub mod notification_toggle;
