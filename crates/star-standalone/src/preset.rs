use std::path::Path;

use star_core::EffectParameters;

use crate::error::PresetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PresetFormat {
    Toml,
    Json,
}

fn format_for(path: &Path) -> Result<PresetFormat, PresetError> {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "toml" => Ok(PresetFormat::Toml),
        Some(ext) if ext == "json" => Ok(PresetFormat::Json),
        _ => Err(PresetError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Load a preset. Missing fields take their defaults and every value is
/// clamped into range.
pub fn load_preset(path: &Path) -> Result<EffectParameters, PresetError> {
    let format = format_for(path)?;
    if !path.exists() {
        return Err(PresetError::FileNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let params: EffectParameters = match format {
        PresetFormat::Toml => toml::from_str(&text)?,
        PresetFormat::Json => serde_json::from_str(&text)?,
    };
    let clamped = params.clamped();
    if clamped != params {
        log::warn!("Preset {} had out-of-range values; clamped", path.display());
    }
    Ok(clamped)
}

pub fn save_preset(path: &Path, params: &EffectParameters) -> Result<(), PresetError> {
    let text = match format_for(path)? {
        PresetFormat::Toml => toml::to_string_pretty(params)?,
        PresetFormat::Json => serde_json::to_string_pretty(params)?,
    };
    std::fs::write(path, text)?;
    Ok(())
}
