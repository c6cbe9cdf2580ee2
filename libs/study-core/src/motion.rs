//! Effect intensity adapted to the device and the reader's preferences.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Devices with fewer logical cores lose the mouse trail.
pub const MIN_TRAIL_CORES: usize = 4;

pub const GLITTER_INTERVAL: Duration = Duration::from_millis(500);
pub const REDUCED_GLITTER_INTERVAL: Duration = Duration::from_millis(2000);

/// What the host environment reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentCapabilities {
    /// Logical cores, when the platform exposes it.
    pub hardware_concurrency: Option<usize>,
    pub prefers_reduced_motion: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionSettings {
    pub mouse_trail: bool,
    pub glitter_interval: Duration,
    pub scroll: ScrollBehavior,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self::from_capabilities(EnvironmentCapabilities::default())
    }
}

impl MotionSettings {
    pub fn from_capabilities(caps: EnvironmentCapabilities) -> Self {
        let low_power = caps
            .hardware_concurrency
            .is_some_and(|cores| cores < MIN_TRAIL_CORES);

        if caps.prefers_reduced_motion {
            Self {
                mouse_trail: false,
                glitter_interval: REDUCED_GLITTER_INTERVAL,
                scroll: ScrollBehavior::Instant,
            }
        } else {
            Self {
                mouse_trail: !low_power,
                glitter_interval: GLITTER_INTERVAL,
                scroll: ScrollBehavior::Smooth,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_effects_by_default() {
        let settings = MotionSettings::default();
        assert!(settings.mouse_trail);
        assert_eq!(settings.glitter_interval, GLITTER_INTERVAL);
        assert_eq!(settings.scroll, ScrollBehavior::Smooth);
    }

    #[test]
    fn few_cores_disable_trail() {
        let settings = MotionSettings::from_capabilities(EnvironmentCapabilities {
            hardware_concurrency: Some(2),
            prefers_reduced_motion: false,
        });
        assert!(!settings.mouse_trail);
        assert_eq!(settings.glitter_interval, GLITTER_INTERVAL);

        let settings = MotionSettings::from_capabilities(EnvironmentCapabilities {
            hardware_concurrency: Some(4),
            prefers_reduced_motion: false,
        });
        assert!(settings.mouse_trail);
    }

    #[test]
    fn reduced_motion_slows_everything() {
        let settings = MotionSettings::from_capabilities(EnvironmentCapabilities {
            hardware_concurrency: Some(16),
            prefers_reduced_motion: true,
        });
        assert!(!settings.mouse_trail);
        assert_eq!(settings.glitter_interval, REDUCED_GLITTER_INTERVAL);
        assert_eq!(settings.scroll, ScrollBehavior::Instant);
    }
}
