//! Terminal view-model for browsing the asteroid feed through the proxy.

pub mod client;
pub mod command;
pub mod config;
pub mod controller;
pub mod date_range;
pub mod filter;
pub mod render;
pub mod state;

pub use controller::ViewController;
pub use state::{Event, ViewState};
