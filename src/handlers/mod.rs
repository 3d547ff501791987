// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod demo;
mod health;
mod metrics;
mod root;

// Core handlers
pub use health::health_check;
pub use metrics::{metric_lookup_handler, metric_names_handler, metrics_handler};
pub use root::root_handler;

// Demo application handlers
pub use demo::{boom, list_users, missing, slow};
