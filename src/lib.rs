pub mod app;
pub mod config;
pub mod date_key;
pub mod errors;
pub mod gesture;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use date_key::DateKey;
pub use errors::ChecklistError;
pub use session::Session;
pub use state::{AppState, Checklist};
pub use storage::Store;
