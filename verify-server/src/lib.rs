// Library entry point for verify-server
// Exposes core modules for testing and external use

pub mod config;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use routes::create_routes;
pub use services::submitter;
pub use state::AppState;
