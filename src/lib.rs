// Infrastructure layer (shared components)
pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;

// Domain layer (business logic)
pub mod model;
pub mod service;
pub mod store;
pub mod template;

// Application layer
pub mod api;
pub mod server;
