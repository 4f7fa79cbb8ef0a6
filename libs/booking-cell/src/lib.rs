pub mod models;
pub mod services;

// Re-export all models and services for external use
pub use models::*;
pub use services::*;
