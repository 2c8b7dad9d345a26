use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::NumberingOptions;
use crate::Tag;
use crate::TagError;
use crate::TagResult;
use crate::pipeline::build_pipeline;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["tagline.toml", ".tagline.toml", ".config/tagline.toml"];

/// Configuration loaded from a `tagline.toml` file.
///
/// ```toml
/// [numbering]
/// style = "line-art"
/// scheme = "roman"
/// number_from = 1
///
/// [pipelines]
/// tidy = "outdent|wrap:72"
/// listing = "tidy|numbering"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TaglineConfig {
	/// Defaults for every `numbering` step. Arguments given in the pipeline
	/// itself take precedence.
	#[serde(default)]
	pub numbering: NumberingOptions,
	/// Named pipelines. A name can be used as a step in any pipeline,
	/// including other named pipelines. Built-in transform names always win
	/// over a pipeline with the same name.
	#[serde(default)]
	pub pipelines: BTreeMap<String, String>,
}

impl TaglineConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> TagResult<Option<TaglineConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;

		Self::from_toml(&content).map(Some)
	}

	/// Parse a config from TOML text.
	pub fn from_toml(content: &str) -> TagResult<TaglineConfig> {
		toml::from_str(content).map_err(|e| TagError::ConfigParse(e.to_string()))
	}

	/// Build a tag from a pipeline expression using this config's numbering
	/// defaults and named pipelines.
	pub fn pipeline(&self, source: &str) -> TagResult<Tag> {
		build_pipeline(source, self)
	}
}
