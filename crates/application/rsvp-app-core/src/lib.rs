pub mod app_core;
pub mod domain;
pub mod history;
pub mod kernel;
pub mod persistence;
pub mod ports;
pub mod setup;
pub mod theme_state;
pub mod viewmodel;

pub use app_core::*;
pub use domain::{AppState, DashboardState};
pub use history::RecordingHistory;
pub use kernel::AppKernel;
pub use persistence::StorePersistence;
pub use ports::*;
pub use setup::SetupError;
pub use viewmodel::*;
