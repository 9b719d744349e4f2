use super::{
	config::LayoutConfig,
	types::{Layout, LightId},
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct EntertainmentContext {
	pub config: LayoutConfig,

	/// Most recently known name of every light on the bridge
	pub light_names: FxHashMap<LightId, String>,

	pub area_order: Vec<Uuid>,
	pub areas: FxHashMap<Uuid, EntertainmentArea>,
}
impl EntertainmentContext {
	pub fn new(config: LayoutConfig) -> Self {
		return EntertainmentContext {
			config,
			light_names: FxHashMap::default(),
			area_order: Vec::default(),
			areas: FxHashMap::default(),
		};
	}
}

/// A named group of lights used for synchronized effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntertainmentArea {
	/// The ID of this area
	pub id: Uuid,

	/// User-facing name of the area
	pub name: String,

	/// Where each member light sits. The layout's light IDs are the area's membership.
	pub layout: Layout,
}
