mod app;
mod middleware;
mod state;

pub use app::create_app;
pub use middleware::require_auth;
pub use state::AppState;
