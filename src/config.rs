//! # Configuration Management
//!
//! Loads runtime settings from `sky-config.toml`: the fixed observer
//! (coordinate, UTC offset, display name) and the clock cadence (idle and
//! animation tick intervals, animation duration, scrub speed). Missing or
//! invalid files fall back to the default observer so the simulation always
//! starts.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::GeoCoordinate;

/// Application configuration loaded from sky-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Fixed observer location
    pub observer: ObserverConfig,
    /// Tick cadence and animation/scrub defaults
    pub clock: ClockConfig,
}

/// Observer location configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Human-readable location name for display
    pub name: String,
    /// Degrees north (negative = south)
    pub latitude: f64,
    /// Degrees east (negative = west)
    pub longitude: f64,
    /// Whole-hour UTC offset of the observer's clock (e.g. -5 for EST)
    pub utc_offset_hours: i32,
}

/// Time-source cadence configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct ClockConfig {
    /// Recompute interval while idle / in real time, milliseconds
    pub tick_ms: u64,
    /// Recompute interval while animating, milliseconds
    pub animation_tick_ms: u64,
    /// Wall-clock length of one full-day animation sweep, milliseconds
    pub animation_duration_ms: u64,
    /// Scrub rate: simulated minutes per real second
    pub scrub_minutes_per_second: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        ObserverConfig {
            name: "Toronto, ON".to_string(),
            latitude: 43.6532,
            longitude: -79.3832,
            utc_offset_hours: -5,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            tick_ms: 1_000,
            animation_tick_ms: 50,
            animation_duration_ms: 20_000,
            scrub_minutes_per_second: 60.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            observer: ObserverConfig::default(),
            clock: ClockConfig::default(),
        }
    }
}

impl ObserverConfig {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }

    /// Fixed offset for the observer's clock. Out-of-range hours clamp into
    /// the valid ±23 h window before conversion.
    pub fn offset(&self) -> FixedOffset {
        let seconds = self.utc_offset_hours.clamp(-23, 23) * 3_600;
        FixedOffset::east_opt(seconds).expect("clamped offset is within chrono's range")
    }
}

impl Config {
    /// Load configuration from sky-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("sky-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration (Toronto, ON)");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save current configuration to sky-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("sky-config.toml", contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observer.name, "Toronto, ON");
        assert!((config.observer.latitude - 43.6532).abs() < 1e-9);
        assert!((config.observer.longitude + 79.3832).abs() < 1e-9);
        assert_eq!(config.observer.utc_offset_hours, -5);
        assert_eq!(config.clock.tick_ms, 1_000);
        assert_eq!(config.clock.animation_tick_ms, 50);
        assert_eq!(config.clock.animation_duration_ms, 20_000);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.observer.name, parsed.observer.name);
        assert_eq!(config.clock.tick_ms, parsed.clock.tick_ms);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.observer.name, "Toronto, ON");
    }

    #[test]
    fn test_load_custom_observer() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[observer]
name = "Reykjavik, IS"
latitude = 64.1466
longitude = -21.9426
utc_offset_hours = 0

[clock]
tick_ms = 500
animation_tick_ms = 25
animation_duration_ms = 10000
scrub_minutes_per_second = 120.0
"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.observer.name, "Reykjavik, IS");
        assert_eq!(config.clock.animation_duration_ms, 10_000);
        assert_eq!(config.observer.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_offset_clamps_out_of_range_hours() {
        let observer = ObserverConfig {
            utc_offset_hours: 99,
            ..ObserverConfig::default()
        };
        assert_eq!(observer.offset().local_minus_utc(), 23 * 3_600);
    }
}
