//! HTTP server: routes, handlers, and shared state.

mod http;
mod state;

pub use http::create_router;
pub use state::AppState;
