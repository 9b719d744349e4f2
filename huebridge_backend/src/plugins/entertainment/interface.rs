use super::{
	bridge_format::BridgeLocations,
	config::{ConfigError, LayoutConfig},
	layout::{self, ArrangeStyle, Axis, LayoutError},
	state::{EntertainmentArea, EntertainmentContext},
	types::{Layout, LightId, LightPosition},
};
use crate::utilities::rounding::round_to;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone)]
pub struct EntertainmentInterface(Arc<RwLock<EntertainmentContext>>);
impl EntertainmentInterface {
	pub fn new(entertainment_ctx: Arc<RwLock<EntertainmentContext>>) -> Self {
		return EntertainmentInterface(entertainment_ctx);
	}

	pub async fn get_config(&self) -> LayoutConfig {
		let ctx = self.0.read().await;
		return ctx.config.clone();
	}

	/// Replaces the placement constants used for future changes.
	///
	/// Existing layouts are left alone. An invalid config is rejected and the
	/// current one stays in place.
	pub async fn set_config(&self, config: LayoutConfig) -> Result<(), ConfigError> {
		config.validate()?;
		let mut ctx = self.0.write().await;
		ctx.config = config;
		return Ok(());
	}

	/// Records the current name of a light so newly placed lights can be labeled.
	///
	/// Lights that are already placed keep the name they were given.
	pub async fn register_light(&self, light_id: impl Into<LightId>, name: impl Into<String>) {
		let mut ctx = self.0.write().await;
		ctx.light_names.insert(light_id.into(), name.into());
	}

	/// Forgets a light's name. This does not remove the light from any area.
	pub async fn forget_light(&self, light_id: &str) -> bool {
		let mut ctx = self.0.write().await;
		return ctx.light_names.remove(light_id).is_some();
	}

	/// Creates an empty entertainment area
	pub async fn create_area(&self, name: impl Into<String>) -> Uuid {
		let mut ctx = self.0.write().await;
		let id = Uuid::new_v4();
		let area = EntertainmentArea {
			id,
			name: name.into(),
			layout: Layout::new(),
		};
		tracing::info!(area = %id, name = %area.name, "Created entertainment area");
		ctx.areas.insert(id, area);
		ctx.area_order.push(id);
		return id;
	}

	pub async fn rename_area(&self, area_id: &Uuid, name: impl Into<String>) -> Result<(), AreaError> {
		let mut ctx = self.0.write().await;
		let area = ctx.areas.get_mut(area_id).ok_or(AreaError::AreaMissing)?;
		area.name = name.into();
		return Ok(());
	}

	/// Deletes an area, discarding its layout
	pub async fn delete_area(&self, area_id: &Uuid) -> Result<(), AreaError> {
		let mut ctx = self.0.write().await;
		if ctx.areas.remove(area_id).is_none() {
			return Err(AreaError::AreaMissing);
		}
		ctx.area_order.retain(|id| id != area_id);
		tracing::info!(area = %area_id, "Deleted entertainment area");
		return Ok(());
	}

	pub async fn get_area(&self, area_id: &Uuid) -> Result<EntertainmentArea, AreaError> {
		let ctx = self.0.read().await;
		return ctx.areas.get(area_id).cloned().ok_or(AreaError::AreaMissing);
	}

	/// Lists every area in the order they were created
	pub async fn list_areas(&self) -> Vec<EntertainmentArea> {
		let ctx = self.0.read().await;
		return ctx
			.area_order
			.iter()
			.filter_map(|area_id| ctx.areas.get(area_id).cloned())
			.collect();
	}

	/// Sets the lights that belong to an area.
	///
	/// Lights that stay in the area keep their positions, removed lights are
	/// dropped and new lights are placed around the existing arrangement.
	/// Returns the stored layout.
	pub async fn set_area_lights(&self, area_id: &Uuid, desired: &[LightId]) -> Result<Layout, AreaError> {
		let mut ctx = self.0.write().await;
		let EntertainmentContext {
			config,
			light_names,
			areas,
			..
		} = &mut *ctx;

		let area = areas.get_mut(area_id).ok_or(AreaError::AreaMissing)?;
		let new_layout = match layout::merge_with(
			&area.layout,
			desired,
			|light_id| light_names.get(light_id).cloned(),
			config,
		) {
			Ok(new_layout) => new_layout,
			Err(error) => {
				tracing::error!(area = %area_id, %error, "Stored layout is corrupt");
				return Err(error.into());
			}
		};

		tracing::debug!(
			area = %area_id,
			before = area.layout.len(),
			after = new_layout.len(),
			"Updated entertainment area membership"
		);
		area.layout = new_layout.clone();
		return Ok(new_layout);
	}

	/// Places every light in an area from scratch
	pub async fn rearrange_area(&self, area_id: &Uuid, style: ArrangeStyle) -> Result<Layout, AreaError> {
		let mut ctx = self.0.write().await;
		let EntertainmentContext {
			config,
			areas,
			..
		} = &mut *ctx;

		let area = areas.get_mut(area_id).ok_or(AreaError::AreaMissing)?;
		let light_ids: Vec<LightId> = area.layout.light_ids().cloned().collect();

		// Names already assigned in this area are kept
		let current = &area.layout;
		let new_layout = layout::arrange(
			&light_ids,
			|light_id| current.get(light_id).map(|position| position.light_name.clone()),
			style,
			config,
		);

		tracing::debug!(area = %area_id, ?style, "Rearranged entertainment area");
		area.layout = new_layout.clone();
		return Ok(new_layout);
	}

	/// Moves a single light, as when it is dragged around in the dashboard.
	///
	/// Coordinates are clamped to `[-1, 1]` and rounded like generated ones.
	/// Non-finite coordinates are rejected.
	pub async fn move_light(
		&self,
		area_id: &Uuid,
		light_id: &str,
		x: f64,
		y: f64,
		z: f64,
	) -> Result<LightPosition, AreaError> {
		for (axis, value) in [(Axis::X, x), (Axis::Y, y), (Axis::Z, z)] {
			if !value.is_finite() {
				return Err(AreaError::InvalidCoordinate(axis));
			}
		}

		let mut ctx = self.0.write().await;
		let decimals = ctx.config.decimals;
		let area = ctx.areas.get_mut(area_id).ok_or(AreaError::AreaMissing)?;
		let mut position = area.layout.get(light_id).cloned().ok_or(AreaError::LightNotInArea)?;

		position.x = round_to(x.clamp(-1.0, 1.0), decimals);
		position.y = round_to(y.clamp(-1.0, 1.0), decimals);
		position.z = round_to(z.clamp(-1.0, 1.0), decimals);
		area.layout.insert(position.clone());

		return Ok(position);
	}

	/// Gets an area's positions in the format the bridge stores them in
	pub async fn export_locations(&self, area_id: &Uuid) -> Result<BridgeLocations, AreaError> {
		let ctx = self.0.read().await;
		let area = ctx.areas.get(area_id).ok_or(AreaError::AreaMissing)?;
		return Ok(BridgeLocations::from_layout(&area.layout));
	}

	/// Replaces an area's layout with positions read back from the bridge.
	///
	/// The bridge's locations also define the area's membership.
	pub async fn import_locations(
		&self,
		area_id: &Uuid,
		locations: &BridgeLocations,
	) -> Result<Layout, AreaError> {
		let mut ctx = self.0.write().await;
		let EntertainmentContext {
			light_names,
			areas,
			..
		} = &mut *ctx;

		let area = areas.get_mut(area_id).ok_or(AreaError::AreaMissing)?;
		let new_layout = locations.to_layout(|light_id| light_names.get(light_id).cloned())?;

		tracing::debug!(area = %area_id, lights = new_layout.len(), "Imported bridge locations");
		area.layout = new_layout.clone();
		return Ok(new_layout);
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
/// An error that could occur while working with entertainment areas
pub enum AreaError {
	#[error("This entertainment area does not exist")]
	AreaMissing,
	#[error("This light is not part of the entertainment area")]
	LightNotInArea,
	#[error("The {0} coordinate must be a finite number")]
	InvalidCoordinate(Axis),
	#[error(transparent)]
	Layout(#[from] LayoutError),
}
