use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of decimal places coordinates can be rounded to. `f64`
/// carries about 15 significant digits, so more places only add noise.
pub const MAX_DECIMALS: u32 = 15;

/// Constants used when placing lights.
///
/// Fields missing from a config file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// How far from an edge a light may sit and still count as being on it
	pub edge_tolerance: f64,

	/// Half-width of the reference rectangle new lights are placed on
	pub edge_extent: f64,

	/// Radius of the circle used when there is no edge structure to extend
	pub circle_radius: f64,

	/// Number of decimal places every placed coordinate is rounded to
	pub decimals: u32,
}
impl Default for LayoutConfig {
	fn default() -> Self {
		return LayoutConfig {
			edge_tolerance: 0.15,
			edge_extent: 0.8,
			circle_radius: 0.7,
			decimals: 3,
		};
	}
}
impl LayoutConfig {
	/// Checks that placements made with this config stay finite and within `[-1, 1]`.
	///
	/// NaN fails every range check.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.edge_extent > 0.0 && self.edge_extent <= 1.0) {
			return Err(ConfigError::EdgeExtent(self.edge_extent));
		}
		if !(self.edge_tolerance >= 0.0 && self.edge_tolerance < self.edge_extent) {
			return Err(ConfigError::EdgeTolerance(self.edge_tolerance));
		}
		if !(self.circle_radius > 0.0 && self.circle_radius <= 1.0) {
			return Err(ConfigError::CircleRadius(self.circle_radius));
		}
		if self.decimals > MAX_DECIMALS {
			return Err(ConfigError::Decimals(self.decimals));
		}
		return Ok(());
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
/// A layout config value that would produce positions outside the valid range
pub enum ConfigError {
	#[error("edge_extent must be within (0, 1], got {0}")]
	EdgeExtent(f64),
	#[error("edge_tolerance must be within [0, edge_extent), got {0}")]
	EdgeTolerance(f64),
	#[error("circle_radius must be within (0, 1], got {0}")]
	CircleRadius(f64),
	#[error("decimals must be at most 15, got {0}")]
	Decimals(u32),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_config_is_valid() {
		assert_eq!(LayoutConfig::default().validate(), Ok(()));
	}

	#[test]
	fn nan_values_are_rejected() {
		let config = LayoutConfig {
			circle_radius: f64::NAN,
			..LayoutConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::CircleRadius(_))));

		let config = LayoutConfig {
			edge_extent: f64::NAN,
			..LayoutConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::EdgeExtent(_))));
	}

	#[test]
	fn decimals_are_limited() {
		let config = LayoutConfig {
			decimals: MAX_DECIMALS,
			..LayoutConfig::default()
		};
		assert_eq!(config.validate(), Ok(()));

		let config = LayoutConfig {
			decimals: 400,
			..LayoutConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::Decimals(400)));
	}
}
