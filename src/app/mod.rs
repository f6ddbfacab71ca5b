// HTTP layer: routing, page rendering, CSRF tokens and error responses.

pub mod csrf;
pub mod page;
pub mod response;
pub mod routes;
pub mod server;

use crate::config::AppConfig;
use csrf::CsrfGuard;

/// Immutable state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub csrf: CsrfGuard,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let csrf = CsrfGuard::from_config(&config.security);
        Self { config, csrf }
    }
}
