//! Same-origin proxy in front of the near-Earth-object feed.

pub mod config;
pub mod error;
pub mod feed;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
