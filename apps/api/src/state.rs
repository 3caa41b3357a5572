use crate::config::Config;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds only read-only values; every render builds its own layout state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry for the fixed-layout (PDF) renderer. A4 by default.
    pub page: PageGeometry,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            page: PageGeometry::a4(),
        }
    }
}
