pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod symbol;
pub mod upstream;

pub use cache::ResponseCache;
pub use config::Config;
pub use server::{start_server, AppState};
