//! Tender Guardian CLI - navigation shell
//!
//! Holds no business state: every command builds the flow for its route,
//! drives it once and renders the outcome.

pub mod commands;
pub mod context;
pub mod render;
pub mod route;

pub use context::{load_config, AppContext};
pub use route::Route;
