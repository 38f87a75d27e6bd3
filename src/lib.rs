pub mod app;
pub mod collection;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, persist_data};
