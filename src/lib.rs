//! Client-side state and data layer for a movie discovery app.
//!
//! [`catalog`] is the only module that talks to the network. [`browse`] owns
//! trending and paginated search state, [`favorites`] owns the saved movie set
//! and [`session`] remembers the last search. [`App`] wires them together.

pub mod app;
pub mod browse;
pub mod catalog;
pub mod config;
pub mod details;
pub mod favorites;
pub mod session;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
mod testing;

pub use app::App;
pub use config::AppConfig;
