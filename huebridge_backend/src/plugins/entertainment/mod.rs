mod bridge_format;
mod config;
mod edge;
mod interface;
mod layout;
mod state;
mod types;

pub use bridge_format::BridgeLocations;
pub use config::{ConfigError, LayoutConfig, MAX_DECIMALS};
pub use edge::{classify_edge, Edge, EdgeCounts};
pub use interface::{AreaError, EntertainmentInterface};
pub use layout::{arrange, merge, merge_with, ArrangeStyle, Axis, LayoutError, PlacementMode};
pub use state::EntertainmentArea;
pub use types::{fallback_light_name, Layout, LightId, LightPosition};

use self::state::EntertainmentContext;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Initialize the entertainment plugin, returning its interface.
pub async fn initialize(config: LayoutConfig) -> EntertainmentInterface {
	tracing::debug!(?config, "Initializing entertainment areas");
	return EntertainmentInterface::new(Arc::new(RwLock::new(EntertainmentContext::new(config))));
}
