//! Configuration read from the environment.
//!
//! Recognised variables (a `.env` file is loaded first when present):
//! - `STUDY_GUIDE_PATH`: markdown file to load; the bundled art history
//!   guide is used when unset
//! - `STUDY_GUIDE_REDUCED_MOTION`: `1`/`true`/`yes` to reduce effects
//! - `STUDY_GUIDE_HARDWARE_CONCURRENCY`: override the detected core count
//! - `STUDY_GUIDE_VIEWPORT`: `<width>x<height>` in pixels, default `1280x720`

use std::path::PathBuf;
use study_core::{EnvironmentCapabilities, Viewport};
use thiserror::Error;

const BUILTIN_GUIDE: &str = include_str!("../content/art_history.md");

const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where the study guide content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideSource {
    Builtin,
    File(PathBuf),
}

impl GuideSource {
    /// Read the markdown content.
    pub async fn load(&self) -> anyhow::Result<String> {
        use anyhow::Context;

        match self {
            Self::Builtin => Ok(BUILTIN_GUIDE.to_string()),
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read study guide {}", path.display())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: GuideSource,
    pub capabilities: EnvironmentCapabilities,
    pub viewport: Viewport,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = match lookup("STUDY_GUIDE_PATH") {
            Some(path) if !path.trim().is_empty() => GuideSource::File(PathBuf::from(path)),
            _ => GuideSource::Builtin,
        };

        let prefers_reduced_motion = match lookup("STUDY_GUIDE_REDUCED_MOTION") {
            Some(value) => parse_flag("STUDY_GUIDE_REDUCED_MOTION", &value)?,
            None => false,
        };

        let hardware_concurrency = match lookup("STUDY_GUIDE_HARDWARE_CONCURRENCY") {
            Some(value) => Some(value.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: "STUDY_GUIDE_HARDWARE_CONCURRENCY",
                value,
            })?),
            None => std::thread::available_parallelism().ok().map(|n| n.get()),
        };

        let viewport = match lookup("STUDY_GUIDE_VIEWPORT") {
            Some(value) => parse_viewport(&value).ok_or(ConfigError::Invalid {
                name: "STUDY_GUIDE_VIEWPORT",
                value,
            })?,
            None => DEFAULT_VIEWPORT,
        };

        Ok(Self {
            source,
            capabilities: EnvironmentCapabilities {
                hardware_concurrency,
                prefers_reduced_motion,
            },
            viewport,
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_viewport(value: &str) -> Option<Viewport> {
    let (width, height) = value.trim().split_once('x')?;
    let width = width.trim().parse::<f64>().ok()?;
    let height = height.trim().parse::<f64>().ok()?;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Viewport { width, height })
}
