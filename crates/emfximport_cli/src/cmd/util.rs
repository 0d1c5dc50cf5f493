use std::fs;
use std::path::Path;

use emfximport::import::{ImportError, Importer, Result, SettingsBundle};
use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(value: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(value).map_err(|err| ImportError::JsonOutput { detail: err.to_string() })?;
	println!("{text}");
	Ok(())
}

/// Importer with the built-in decoders.
pub(crate) fn importer() -> Result<Importer> {
	Importer::new()
}

/// Read a JSON settings bundle; missing fields keep their defaults.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<SettingsBundle> {
	let Some(path) = path else {
		return Ok(SettingsBundle::default());
	};
	let bytes = fs::read(path)?;
	serde_json::from_slice(&bytes).map_err(|err| ImportError::InvalidSettings {
		path: path.display().to_string(),
		detail: err.to_string(),
	})
}

/// Decoder name, or a placeholder for chunks without one.
pub(crate) fn chunk_label(name: Option<&str>) -> &str {
	name.unwrap_or("<unknown>")
}
