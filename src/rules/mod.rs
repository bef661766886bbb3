//! Rule implementations for scenecheck.
//!
//! Pure functions that turn the global report into issues. Each `check_*`
//! function takes only the inputs it needs; the `*_issues` wrappers pull those
//! from a [`CheckContext`](crate::core::CheckContext).
//!
//! ## Module Structure
//!
//! - `unused`: components attached nowhere
//! - `inconsistent`: components whose stored scene data has fields they no longer declare

pub mod inconsistent;
pub mod unused;
