use super::{config::LayoutConfig, types::LightPosition};
use serde::{Deserialize, Serialize};

/// One side of the reference rectangle centered on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
	Top,
	Right,
	Bottom,
	Left,
}
impl Edge {
	/// Order in which edges are considered when breaking ties
	pub const PRIORITY: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

	fn index(self) -> usize {
		return match self {
			Edge::Top => 0,
			Edge::Right => 1,
			Edge::Bottom => 2,
			Edge::Left => 3,
		};
	}

	/// Maps `t` in `[0, 1]` to a point along this edge.
	///
	/// Top and bottom run left to right, the right edge runs top to bottom and
	/// the left edge runs bottom to top.
	pub fn point_at(self, t: f64, extent: f64) -> (f64, f64) {
		let span = extent * 2.0;
		return match self {
			Edge::Top => (-extent + t * span, extent),
			Edge::Bottom => (-extent + t * span, -extent),
			Edge::Right => (extent, extent - t * span),
			Edge::Left => (-extent, -extent + t * span),
		};
	}
}

/// Determines which edge of the reference rectangle a light sits on.
///
/// Top and bottom win over right, which wins over left, so a light in a
/// corner is counted on the top or bottom edge. Returns `None` for lights in
/// the interior.
pub fn classify_edge(position: &LightPosition, config: &LayoutConfig) -> Option<Edge> {
	let threshold = config.edge_extent - config.edge_tolerance;
	if position.y >= threshold {
		return Some(Edge::Top);
	}
	if position.y <= -threshold {
		return Some(Edge::Bottom);
	}
	if position.x >= threshold {
		return Some(Edge::Right);
	}
	if position.x <= -threshold {
		return Some(Edge::Left);
	}
	return None;
}

/// Running number of lights on each edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCounts([usize; 4]);
impl EdgeCounts {
	pub fn get(&self, edge: Edge) -> usize {
		return self.0[edge.index()];
	}

	/// Adds a light to `edge`, returning the edge's new count
	pub fn increment(&mut self, edge: Edge) -> usize {
		let count = &mut self.0[edge.index()];
		*count += 1;
		return *count;
	}

	/// Number of distinct edges holding at least one light
	pub fn populated(&self) -> usize {
		return self.0.iter().filter(|count| **count > 0).count();
	}

	/// The edge with the fewest lights, using [`Edge::PRIORITY`] to break ties
	pub fn least_populated(&self) -> Edge {
		let mut best = Edge::PRIORITY[0];
		for edge in Edge::PRIORITY {
			if self.get(edge) < self.get(best) {
				best = edge;
			}
		}
		return best;
	}
}
