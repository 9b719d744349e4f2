use crate::{
	impl_anyhow,
	plugins::{
		self,
		entertainment::{EntertainmentInterface, LayoutConfig},
	},
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Reads placement constants from a JSON file.
///
/// Missing fields use their defaults.
pub async fn load_config(path: &Path) -> anyhow::Result<LayoutConfig> {
	let contents = tokio::fs::read_to_string(path)
		.await
		.with_context(|| format!("Couldn't read layout config {}", path.display()))?;
	let config: LayoutConfig = serde_json::from_str(&contents)
		.with_context(|| format!("Couldn't parse layout config {}", path.display()))?;

	config
		.validate()
		.with_context(|| format!("Invalid layout config {}", path.display()))?;
	return Ok(config);
}

pub async fn async_main(config_path: Option<&Path>) -> Result<EntertainmentInterface, InitializationError> {
	plugins::core::initialize();

	let config = match config_path {
		Some(path) => load_config(path).await?,
		None => LayoutConfig::default(),
	};

	return Ok(plugins::entertainment::initialize(config).await);
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
/// An error that could occur while starting the backend
pub enum InitializationError {
	#[error("The layout config could not be loaded:\n{0}")]
	Config(String),
}
impl_anyhow!(InitializationError, InitializationError::Config);
