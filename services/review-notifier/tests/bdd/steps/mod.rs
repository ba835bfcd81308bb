//! BDD step definitions for the review notifier

pub mod cycle_steps;
pub mod scheduler_steps;
