pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod routes;
pub mod store;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};

use std::sync::Arc;

use auth::google::GoogleClient;
use store::UserStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn UserStore>,
    pub google: GoogleClient,
}
