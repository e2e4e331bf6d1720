use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("preset not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported preset extension: {0}")]
    UnsupportedExtension(PathBuf),

    #[error("preset parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preset parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("preset write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Parameter(#[from] star_core::ParameterError),

    #[error(transparent)]
    Composite(#[from] star_core::CompositeError),

    #[error(transparent)]
    Image(#[from] star_cpu::IoError),
}
