pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod tracker;
pub mod ui;
pub mod view;

pub use app::router;
pub use client::HabitClient;
pub use config::Config;
pub use errors::{AppError, HabitError};
pub use state::AppState;
pub use tracker::{Reload, Tracker};
