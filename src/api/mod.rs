//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod model_packages;
pub mod predictions;
pub mod router;
pub mod state;
pub mod types;

pub use router::{create_router, create_router_with_config};
pub use state::AppState;
