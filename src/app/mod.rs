pub mod commands;
pub mod config;
mod context;
pub mod services;

pub use context::AppContext;
