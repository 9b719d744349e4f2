use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque identifier the bridge assigns to a light
pub type LightId = String;

/// One light's placement within an entertainment area.
///
/// `x` and `y` are normalized to `[-1.0, 1.0]` with `(0, 0)` at the center of
/// the reference screen. `z` is depth and stays at `0.0` for screen
/// configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightPosition {
	pub light_id: LightId,

	/// Name of the light at the time it was placed. This is not kept in sync
	/// with later renames.
	pub light_name: String,

	pub x: f64,
	pub y: f64,
	pub z: f64,
}

/// Returns the name used for a light that the directory doesn't know about
pub fn fallback_light_name(light_id: &str) -> String {
	return format!("Light {}", light_id);
}

/// The positions of every light in an entertainment area, keyed by light ID.
///
/// Insertion order is retained so the dashboard lists lights in the order
/// they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LightPosition>", into = "Vec<LightPosition>")]
pub struct Layout {
	light_order: Vec<LightId>,
	lights: FxHashMap<LightId, LightPosition>,
}
impl Layout {
	pub fn new() -> Self {
		return Layout::default();
	}

	/// Inserts a position, replacing any previous entry for the same light.
	///
	/// A replaced light keeps its place in the ordering.
	pub fn insert(&mut self, position: LightPosition) -> Option<LightPosition> {
		let light_id = position.light_id.clone();
		let previous = self.lights.insert(light_id.clone(), position);
		if previous.is_none() {
			self.light_order.push(light_id);
		}
		return previous;
	}

	pub fn remove(&mut self, light_id: &str) -> Option<LightPosition> {
		let removed = self.lights.remove(light_id);
		if removed.is_some() {
			self.light_order.retain(|id| id != light_id);
		}
		return removed;
	}

	pub fn get(&self, light_id: &str) -> Option<&LightPosition> {
		return self.lights.get(light_id);
	}

	pub fn contains(&self, light_id: &str) -> bool {
		return self.lights.contains_key(light_id);
	}

	pub fn len(&self) -> usize {
		return self.light_order.len();
	}

	pub fn is_empty(&self) -> bool {
		return self.light_order.is_empty();
	}

	/// Iterates over positions in insertion order
	pub fn iter(&self) -> impl Iterator<Item = &LightPosition> {
		return self
			.light_order
			.iter()
			.filter_map(|light_id| self.lights.get(light_id));
	}

	pub fn light_ids(&self) -> impl Iterator<Item = &LightId> {
		return self.light_order.iter();
	}
}
impl FromIterator<LightPosition> for Layout {
	fn from_iter<T: IntoIterator<Item = LightPosition>>(iter: T) -> Self {
		let mut layout = Layout::new();
		for position in iter {
			layout.insert(position);
		}
		return layout;
	}
}
impl From<Vec<LightPosition>> for Layout {
	fn from(positions: Vec<LightPosition>) -> Self {
		return positions.into_iter().collect();
	}
}
impl From<Layout> for Vec<LightPosition> {
	fn from(layout: Layout) -> Self {
		let Layout { light_order, mut lights } = layout;
		return light_order
			.into_iter()
			.filter_map(|light_id| lights.remove(&light_id))
			.collect();
	}
}
