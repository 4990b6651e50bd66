use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use ticker::phase::{self, PhaseColors};
use ticker::transition::DEFAULT_DURATION;

/// An sRGB color written as `#rrggbb` (or `#rgb`) in the config file.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct ConfigColor(Srgb<u8>);

#[derive(Debug, Error)]
#[error("Invalid color '{0}', expected #rrggbb")]
pub struct ColorParseError(String);

impl FromStr for ConfigColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Srgb<u8>>()
            .map(Self)
            .map_err(|_| ColorParseError(s.to_string()))
    }
}

impl fmt::Display for ConfigColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
    }
}

impl ConfigColor {
    pub fn to_srgb(self) -> Srgb<f64> {
        self.0.into_format()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Appearance {
    pub size: f64,
    pub dot_radius: f64,
    pub transition_ms: u64,
    pub face_color: Option<ConfigColor>,
    pub start_color: Option<ConfigColor>,
    pub end_color: Option<ConfigColor>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            size: 200.0,
            dot_radius: 5.0,
            transition_ms: DEFAULT_DURATION.as_millis() as u64,
            face_color: None,
            start_color: None,
            end_color: None,
        }
    }
}

impl Appearance {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn face(&self) -> Srgb<f64> {
        self.face_color
            .map(ConfigColor::to_srgb)
            .unwrap_or_else(|| phase::washed(phase::YELLOW))
    }

    pub fn phase_colors(&self) -> PhaseColors {
        let defaults = PhaseColors::default();
        PhaseColors {
            start: self.start_color.map_or(defaults.start, ConfigColor::to_srgb),
            end: self.end_color.map_or(defaults.end, ConfigColor::to_srgb),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub appearance: Appearance,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "tock", "tock").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `TOCK_APPEARANCE__SIZE=320` sets `appearance.size`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("TOCK")
        .prefix_separator("_")
        .separator("__")
}

fn build_config(
    file: impl config::Source + Send + Sync + 'static,
    env: config::Environment,
) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build_config(
        config::File::from(config_path).required(false),
        environment(),
    )
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
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

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
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
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
