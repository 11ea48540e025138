use std::path::{Path, PathBuf};

use apod_fetch::PipelineConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use thiserror::Error;

const DEFAULT_FILE: &str = "apod.toml";
const ENV_PREFIX: &str = "APOD_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {} not found", .0.display())]
    Missing(PathBuf),
    #[error(transparent)]
    FigmentError(#[from] Box<figment::Error>),
}

/// Layer defaults, the TOML file, `APOD_*` variables and `--api-key`, in
/// rising precedence.
///
/// An explicit `path` must exist; the default `apod.toml` is optional.
pub fn load(path: Option<&Path>, api_key: Option<&str>) -> Result<PipelineConfig, ConfigError> {
    let file = match path {
        Some(path) if !path.is_file() => return Err(ConfigError::Missing(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_FILE),
    };

    let mut figment = Figment::from(Serialized::defaults(PipelineConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    if let Some(key) = api_key {
        figment = figment.merge(Serialized::default("api_key", key));
    }

    figment.extract().map_err(|e| ConfigError::FigmentError(Box::new(e)))
}
