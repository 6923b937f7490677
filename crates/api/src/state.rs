use std::sync::Arc;

use safezone_gemini::CaptionGenerator;
use safezone_imagegen::PollinationsImages;
use safezone_pipeline::{Tv, TvEventBus};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// The television wired to the production collaborators.
pub type SafeZoneTv = Tv<CaptionGenerator, PollinationsImages>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Attached screens.
    pub ws_manager: Arc<WsManager>,
    /// Screen state and orchestrators.
    pub tv: Arc<SafeZoneTv>,
    /// Every state change of `tv` is published here.
    pub event_bus: Arc<TvEventBus>,
}
