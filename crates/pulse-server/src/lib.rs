pub mod config;
pub mod handlers;
pub mod middleware;
pub mod page;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::{build_router, start, start_sweep_task, AppState, ServerHandle};
