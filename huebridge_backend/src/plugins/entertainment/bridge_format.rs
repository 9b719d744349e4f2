use super::{
	layout::{check_finite, LayoutError},
	types::{fallback_light_name, Layout, LightId, LightPosition},
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Entertainment positions as the bridge stores them on the group resource.
///
/// ```json
/// "locations": { "1": [0.8, 0.8, 0.0], "4": [-0.8, 0.8, 0.0] }
/// ```
///
/// Names aren't part of the bridge's format, so they are looked up again on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BridgeLocations(pub FxHashMap<LightId, [f64; 3]>);
impl BridgeLocations {
	pub fn from_layout(layout: &Layout) -> Self {
		return BridgeLocations(
			layout
				.iter()
				.map(|position| (position.light_id.clone(), [position.x, position.y, position.z]))
				.collect(),
		);
	}

	/// Converts the bridge's locations into a layout.
	///
	/// The bridge doesn't keep an ordering, so lights are ordered by ID,
	/// numerically where the IDs are numbers. Non-finite coordinates are
	/// rejected and the rest are clamped to `[-1, 1]`, as manual moves are.
	/// Values already in range are kept exactly.
	pub fn to_layout<F>(&self, light_name: F) -> Result<Layout, LayoutError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut light_ids: Vec<&LightId> = self.0.keys().collect();
		light_ids.sort_by(|a, b| compare_light_ids(a, b));

		let mut layout = Layout::new();
		for light_id in light_ids {
			let [x, y, z] = self.0[light_id];
			let position = LightPosition {
				light_id: light_id.clone(),
				light_name: light_name(light_id.as_str()).unwrap_or_else(|| fallback_light_name(light_id)),
				x,
				y,
				z,
			};
			check_finite(&position)?;
			layout.insert(LightPosition {
				x: position.x.clamp(-1.0, 1.0),
				y: position.y.clamp(-1.0, 1.0),
				z: position.z.clamp(-1.0, 1.0),
				..position
			});
		}
		return Ok(layout);
	}
}

/// Bridge IDs are usually small integers, which should sort as numbers
fn compare_light_ids(a: &str, b: &str) -> Ordering {
	return match (a.parse::<u64>(), b.parse::<u64>()) {
		(Ok(a), Ok(b)) => a.cmp(&b),
		(Ok(_), Err(_)) => Ordering::Less,
		(Err(_), Ok(_)) => Ordering::Greater,
		(Err(_), Err(_)) => a.cmp(b),
	};
}
