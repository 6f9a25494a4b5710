//! Task domain module.
//!
//! # Module Structure
//!
//! - `model`: task domain models (`Task`, `TaskStatus`, `ChoreType`) and the
//!   claim/complete transition rules

mod model;

// Re-export public API
pub use model::{ChoreType, Task, TaskStatus};
