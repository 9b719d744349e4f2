use super::{
	config::LayoutConfig,
	edge::{classify_edge, Edge, EdgeCounts},
	types::{fallback_light_name, Layout, LightId, LightPosition},
};
use crate::utilities::rounding::round_to;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{f64::consts::TAU, fmt};
use thiserror::Error;

/// Policy used to place lights that have no position yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementMode {
	/// New lights extend the existing edge arrangement, filling the emptiest edge first
	Rectangle,
	/// New lights are spread evenly around a circle, ignoring existing positions
	Circle,
}

/// Style used when arranging an area from scratch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrangeStyle {
	Circle,
	Rectangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
	X,
	Y,
	Z,
}
impl fmt::Display for Axis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		return f.write_str(match self {
			Axis::X => "x",
			Axis::Y => "y",
			Axis::Z => "z",
		});
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
/// An error that could occur while computing a layout
pub enum LayoutError {
	#[error("Light {light_id} has a non-finite {axis} coordinate")]
	NonFiniteCoordinate { light_id: LightId, axis: Axis },
}

#[derive(Debug, Clone, Copy)]
struct Point {
	x: f64,
	y: f64,
}

/// Computes the layout of an area after its membership changes, using the
/// default [`LayoutConfig`].
///
/// See [`merge_with`].
pub fn merge<F>(existing: &Layout, desired: &[LightId], light_name: F) -> Result<Layout, LayoutError>
where
	F: Fn(&str) -> Option<String>,
{
	return merge_with(existing, desired, light_name, &LayoutConfig::default());
}

/// Computes the layout of an area after its membership changes.
///
/// The result holds exactly the lights in `desired`, in that order (repeated
/// IDs are ignored). Lights that already had a position keep it untouched,
/// lights that are no longer desired are dropped, and new lights are placed
/// around the existing arrangement:
///
/// - If the kept lights populate at least two edges of the reference
///   rectangle, each new light joins whichever edge currently has the fewest
///   lights (ties go top, right, bottom, left) and is spaced along it.
/// - Otherwise the new lights are spread evenly around a circle.
///
/// `light_name` supplies names for new lights. Unknown lights are named
/// `"Light <id>"`.
///
/// Kept lights with non-finite coordinates are rejected rather than copied
/// through.
pub fn merge_with<F>(
	existing: &Layout,
	desired: &[LightId],
	light_name: F,
	config: &LayoutConfig,
) -> Result<Layout, LayoutError>
where
	F: Fn(&str) -> Option<String>,
{
	enum Slot<'a> {
		Kept(&'a LightPosition),
		Missing(&'a LightId),
	}

	let mut seen = FxHashSet::default();
	let mut slots = Vec::with_capacity(desired.len());
	let mut kept = Vec::new();
	let mut missing_count = 0usize;
	for light_id in desired {
		if !seen.insert(light_id.as_str()) {
			continue;
		}
		if let Some(position) = existing.get(light_id) {
			check_finite(position)?;
			kept.push(position);
			slots.push(Slot::Kept(position));
		} else {
			missing_count += 1;
			slots.push(Slot::Missing(light_id));
		}
	}

	let mut placements = Vec::new();
	if missing_count > 0 {
		let mut counts = EdgeCounts::default();
		for position in kept.iter() {
			if let Some(edge) = classify_edge(position, config) {
				counts.increment(edge);
			}
		}

		let mode = if counts.populated() >= 2 {
			PlacementMode::Rectangle
		} else {
			PlacementMode::Circle
		};
		tracing::trace!(kept = kept.len(), missing = missing_count, ?mode, "Placing new lights");

		placements = match mode {
			PlacementMode::Rectangle => {
				place_on_rectangle(&mut counts, kept.len() + missing_count, missing_count, config)
			}
			PlacementMode::Circle => place_on_circle(missing_count, config),
		};
	}

	let mut placements = placements.into_iter();
	let mut layout = Layout::new();
	for slot in slots {
		match slot {
			Slot::Kept(position) => {
				layout.insert(position.clone());
			}
			Slot::Missing(light_id) => {
				if let Some(point) = placements.next() {
					layout.insert(new_position(light_id, point, &light_name, config));
				}
			}
		}
	}

	return Ok(layout);
}

/// Places every light from scratch, ignoring any previous layout.
///
/// `Circle` spreads the lights evenly around the circle used by the merge
/// fallback. `Rectangle` deals lights onto the edges in priority order and
/// centers each edge's lights within its span, so no two lights share a
/// corner.
pub fn arrange<F>(
	light_ids: &[LightId],
	light_name: F,
	style: ArrangeStyle,
	config: &LayoutConfig,
) -> Layout
where
	F: Fn(&str) -> Option<String>,
{
	let mut seen = FxHashSet::default();
	let light_ids: Vec<&LightId> = light_ids
		.iter()
		.filter(|light_id| seen.insert(light_id.as_str()))
		.collect();

	let points = match style {
		ArrangeStyle::Circle => place_on_circle(light_ids.len(), config),
		ArrangeStyle::Rectangle => place_around_rectangle(light_ids.len(), config),
	};

	return light_ids
		.into_iter()
		.zip(points)
		.map(|(light_id, point)| new_position(light_id, point, &light_name, config))
		.collect();
}

fn new_position<F>(light_id: &LightId, point: Point, light_name: &F, config: &LayoutConfig) -> LightPosition
where
	F: Fn(&str) -> Option<String>,
{
	return LightPosition {
		light_id: light_id.clone(),
		light_name: light_name(light_id.as_str()).unwrap_or_else(|| fallback_light_name(light_id)),
		x: round_to(point.x, config.decimals),
		y: round_to(point.y, config.decimals),
		z: 0.0,
	};
}

pub(super) fn check_finite(position: &LightPosition) -> Result<(), LayoutError> {
	for (axis, value) in [(Axis::X, position.x), (Axis::Y, position.y), (Axis::Z, position.z)] {
		if !value.is_finite() {
			return Err(LayoutError::NonFiniteCoordinate {
				light_id: position.light_id.clone(),
				axis,
			});
		}
	}
	return Ok(());
}

/// Assigns `missing` lights to the least populated edges, returning each
/// light's edge and its spacing parameter along that edge.
///
/// Spacing uses the edge's running count against the ideal number of lights
/// per edge for `total` lights. Since a light always joins the emptiest edge,
/// its count never exceeds that ideal and `t` stays within `[0, 1]`.
fn assign_edges(counts: &mut EdgeCounts, total: usize, missing: usize) -> Vec<(Edge, f64)> {
	let per_side = total.div_ceil(4).max(1);
	return (0..missing)
		.map(|_| {
			let edge = counts.least_populated();
			let index = counts.increment(edge);
			let t = if per_side == 1 {
				0.0
			} else {
				(index - 1) as f64 / (per_side - 1) as f64
			};
			return (edge, t);
		})
		.collect();
}

fn place_on_rectangle(
	counts: &mut EdgeCounts,
	total: usize,
	missing: usize,
	config: &LayoutConfig,
) -> Vec<Point> {
	return assign_edges(counts, total, missing)
		.into_iter()
		.map(|(edge, t)| {
			let (x, y) = edge.point_at(t, config.edge_extent);
			return Point { x, y };
		})
		.collect();
}

fn place_on_circle(count: usize, config: &LayoutConfig) -> Vec<Point> {
	return (0..count)
		.map(|i| {
			let angle = (i as f64 / count as f64) * TAU;
			return Point {
				x: angle.cos() * config.circle_radius,
				y: angle.sin() * config.circle_radius,
			};
		})
		.collect();
}

fn place_around_rectangle(count: usize, config: &LayoutConfig) -> Vec<Point> {
	let mut counts = EdgeCounts::default();
	let assignments: Vec<_> = (0..count)
		.map(|_| {
			let edge = counts.least_populated();
			return (edge, counts.increment(edge));
		})
		.collect();

	return assignments
		.into_iter()
		.map(|(edge, index)| {
			let t = (index as f64 - 0.5) / counts.get(edge) as f64;
			let (x, y) = edge.point_at(t, config.edge_extent);
			return Point { x, y };
		})
		.collect();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(ids: &[&str]) -> Vec<LightId> {
		return ids.iter().map(|id| id.to_string()).collect();
	}

	fn no_names(_: &str) -> Option<String> {
		return None;
	}

	#[test]
	fn rectangle_spacing_uses_running_counts() {
		let config = LayoutConfig::default();
		let mut counts = EdgeCounts::default();
		counts.increment(Edge::Top);
		counts.increment(Edge::Top);
		counts.increment(Edge::Right);

		// 3 kept + 5 missing gives two lights per edge
		let points = place_on_rectangle(&mut counts, 8, 5, &config);
		let coords: Vec<(f64, f64)> = points
			.iter()
			.map(|point| (round_to(point.x, 3), round_to(point.y, 3)))
			.collect();
		assert_eq!(
			coords,
			vec![
				(-0.8, -0.8), // bottom, first slot
				(-0.8, -0.8), // left, first slot
				(0.8, -0.8),  // right, second slot
				(0.8, -0.8),  // bottom, second slot
				(-0.8, 0.8),  // left, second slot
			]
		);
		assert_eq!(counts.get(Edge::Top), 2);
		assert_eq!(counts.get(Edge::Right), 2);
		assert_eq!(counts.get(Edge::Bottom), 2);
		assert_eq!(counts.get(Edge::Left), 2);
	}

	#[test]
	fn crowded_edge_spreads_new_lights_one_per_edge() {
		let mut counts = EdgeCounts::default();
		for _ in 0..3 {
			counts.increment(Edge::Top);
		}

		let edges: Vec<Edge> = assign_edges(&mut counts, 6, 3).into_iter().map(|(edge, _)| edge).collect();
		assert_eq!(edges, vec![Edge::Right, Edge::Bottom, Edge::Left]);
		assert_eq!(counts.get(Edge::Top), 3);
	}

	#[test]
	fn new_lights_on_one_edge_get_distinct_spacing() {
		let mut counts = EdgeCounts::default();
		counts.increment(Edge::Top);
		counts.increment(Edge::Bottom);

		let assignments = assign_edges(&mut counts, 14, 12);
		for (i, (edge_a, t_a)) in assignments.iter().enumerate() {
			assert!((0.0..=1.0).contains(t_a));
			for (edge_b, t_b) in assignments.iter().skip(i + 1) {
				if edge_a == edge_b {
					assert_ne!(t_a, t_b);
				}
			}
		}
	}

	#[test]
	fn single_slot_edges_start_at_their_origin() {
		let config = LayoutConfig::default();
		let mut counts = EdgeCounts::default();
		counts.increment(Edge::Top);
		counts.increment(Edge::Bottom);

		let points = place_on_rectangle(&mut counts, 4, 2, &config);
		assert_eq!((points[0].x, points[0].y), (0.8, 0.8));
		assert_eq!((points[1].x, points[1].y), (-0.8, -0.8));
	}

	#[test]
	fn circle_is_evenly_spaced() {
		let config = LayoutConfig::default();
		let points = place_on_circle(3, &config);
		assert_eq!(points.len(), 3);
		for point in points {
			let radius = (point.x * point.x + point.y * point.y).sqrt();
			assert!((radius - 0.7).abs() < 1e-9);
		}
	}

	#[test]
	fn rectangle_arrangement_avoids_shared_corners() {
		let layout = arrange(&ids(&["1", "2", "3", "4"]), no_names, ArrangeStyle::Rectangle, &LayoutConfig::default());
		let coords: Vec<(f64, f64)> = layout.iter().map(|position| (position.x, position.y)).collect();
		assert_eq!(coords, vec![(0.0, 0.8), (0.8, 0.0), (0.0, -0.8), (-0.8, 0.0)]);
	}

	#[test]
	fn rectangle_arrangement_centers_each_edge() {
		let layout = arrange(
			&ids(&["1", "2", "3", "4", "5", "6"]),
			no_names,
			ArrangeStyle::Rectangle,
			&LayoutConfig::default(),
		);
		// Top and right hold two lights each, placed at the quarter points
		assert_eq!((layout.get("1").unwrap().x, layout.get("1").unwrap().y), (-0.4, 0.8));
		assert_eq!((layout.get("5").unwrap().x, layout.get("5").unwrap().y), (0.4, 0.8));
		assert_eq!((layout.get("2").unwrap().x, layout.get("2").unwrap().y), (0.8, 0.4));
		assert_eq!((layout.get("6").unwrap().x, layout.get("6").unwrap().y), (0.8, -0.4));
	}

	#[test]
	fn arrange_ignores_repeated_ids() {
		let layout = arrange(&ids(&["1", "2", "1"]), no_names, ArrangeStyle::Circle, &LayoutConfig::default());
		assert_eq!(layout.len(), 2);
		assert_eq!(layout.get("2").unwrap().x, -0.7);
	}

	#[test]
	fn non_finite_kept_light_is_rejected() {
		let existing: Layout = vec![LightPosition {
			light_id: "1".into(),
			light_name: "Desk".into(),
			x: f64::NAN,
			y: 0.0,
			z: 0.0,
		}]
		.into();
		assert_eq!(
			merge(&existing, &ids(&["1", "2"]), no_names),
			Err(LayoutError::NonFiniteCoordinate {
				light_id: "1".into(),
				axis: Axis::X,
			})
		);

		// Dropped lights never reach the output, so they aren't checked
		assert!(merge(&existing, &ids(&["2"]), no_names).is_ok());
	}
}
