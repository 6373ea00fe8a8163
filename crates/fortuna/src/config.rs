use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use spindle::geometry::DEFAULT_INNER_RADIUS;
use spindle::label::labels;
use spindle::{Easing, Label, Radii};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_DIAMETER: f64 = 400.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WheelConfig {
    #[serde(default = "default_diameter")]
    pub diameter: f64,
    #[serde(default = "default_inner_radius")]
    pub inner_radius: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_DIAMETER,
            inner_radius: DEFAULT_INNER_RADIUS,
        }
    }
}

impl WheelConfig {
    pub fn radii(&self) -> Radii {
        Radii::new(self.inner_radius, self.diameter / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct SpinConfig {
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_labels")]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub spin: SpinConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            wheel: WheelConfig::default(),
            spin: SpinConfig::default(),
        }
    }
}

fn default_labels() -> Vec<Label> {
    labels(["🐶", "🐺", "🐱", "🐯", "🦁", "🦄", "🐈", "🦭"])
}

fn default_diameter() -> f64 {
    DEFAULT_DIAMETER
}

fn default_inner_radius() -> f64 {
    DEFAULT_INNER_RADIUS
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Config must list at least one label")]
    NoLabels,
    #[error("Wheel radii are invalid (inner {inner}, outer {outer})")]
    InvalidRadii { inner: f64, outer: f64 },
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "fortuna", "fortuna").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&get_config_path()?, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("FORTUNA").separator("__")
}

/// The file at `path` is optional; `env` overrides it either way.
fn load_from(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env);

    finish(builder)
}

pub fn parse_toml(source: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(source, config::FileFormat::Toml));

    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let parsed: Config = builder.build()?.try_deserialize()?;
    validate(parsed)
}

fn validate(config: Config) -> Result<Config, ConfigError> {
    if config.labels.is_empty() {
        return Err(ConfigError::NoLabels);
    }

    let radii = config.wheel.radii();
    if !(radii.inner >= 0.0 && radii.outer > radii.inner) {
        return Err(ConfigError::InvalidRadii {
            inner: radii.inner,
            outer: radii.outer,
        });
    }
    Ok(config)
}

pub fn load_or_default() -> Config {
    or_default(load_config())
}

fn or_default(loaded: Result<Config, ConfigError>) -> Config {
    loaded.unwrap_or_else(|e| {
        log::error!("Falling back to the default config: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
