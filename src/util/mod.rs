//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, file inputs) from page
//! and state logic to improve reuse and testability.

pub mod file;
pub mod storage;
