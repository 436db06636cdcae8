//! Process wiring for the call manager: configuration, the background HTTP
//! listener, and the startup/shutdown sequence around them.

pub mod app;
pub mod config;
pub mod server;

pub use app::App;
pub use config::ServerConfig;
