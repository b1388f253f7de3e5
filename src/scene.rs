//! Snapshot assembly: one pass through the whole pipeline.
//!
//! Each call to [`SkySnapshot::compute`] runs time source output → solar
//! ephemeris → lunar ephemeris → screen projection → color model and returns
//! a fresh immutable value. Nothing is cached between calls; a snapshot never
//! outlives the computation that produced it except in the hands of whatever
//! consumer holds it.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::config::Config;
use crate::lunar::{self, MoonPhaseInfo};
use crate::palette::{self, Rgb, SkyColors};
use crate::projection::{self, HorizonFrame};
use crate::solar::{self, SunEvent, SunTimes};
use crate::{GeoCoordinate, ScreenPosition, SkyPosition};

/// Sun state for one instant.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SunSnapshot {
    pub position: SkyPosition,
    pub screen: ScreenPosition,
    pub color: Rgb,
    /// False once the disc has set past the refraction-corrected horizon.
    pub visible: bool,
}

/// Moon state for one instant.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MoonSnapshot {
    pub phase: MoonPhaseInfo,
    pub position: SkyPosition,
    pub screen: ScreenPosition,
    pub visible: bool,
    /// Terminator placement across the disc, [0, 1] (0 = dark, 1 = full).
    pub terminator: f64,
}

/// Complete immutable rendering state for one observation instant.
#[derive(Clone, Debug, Serialize)]
pub struct SkySnapshot {
    /// The observation instant in the observer's offset.
    pub instant: DateTime<FixedOffset>,
    /// `HH:MM:SS` display string
    pub time_text: String,
    /// `YYYY-MM-DD` display string
    pub date_text: String,
    pub sun: SunSnapshot,
    pub moon: MoonSnapshot,
    pub sky: SkyColors,
    pub times: SunTimes,
}

impl SkySnapshot {
    /// Evaluate the full pipeline for an instant and observer configuration.
    pub fn compute(instant: DateTime<FixedOffset>, config: &Config) -> SkySnapshot {
        let coordinate = config.observer.coordinate();
        Self::compute_at(instant, coordinate)
    }

    /// Same as [`SkySnapshot::compute`] with an explicit coordinate.
    pub fn compute_at(instant: DateTime<FixedOffset>, coordinate: GeoCoordinate) -> SkySnapshot {
        let times = solar::sun_times(instant.date_naive(), coordinate, *instant.offset());
        let frame = HorizonFrame::for_day(&times, coordinate);

        let sun_position = solar::solar_position(instant, coordinate);
        let sun = SunSnapshot {
            position: sun_position,
            screen: projection::project(sun_position, &frame),
            color: palette::sun_color(sun_position.altitude),
            visible: sun_position.altitude > -0.833,
        };

        let phase = lunar::moon_phase(instant);
        let moon = MoonSnapshot {
            phase,
            position: lunar::moon_sky_position(instant, coordinate),
            screen: lunar::moon_position(instant, coordinate, &frame),
            visible: lunar::is_moon_visible(instant, coordinate),
            terminator: phase.terminator(),
        };

        SkySnapshot {
            instant,
            time_text: instant.format("%H:%M:%S").to_string(),
            date_text: instant.format("%Y-%m-%d").to_string(),
            sun,
            moon,
            sky: palette::sky_colors(sun_position.altitude),
            times,
        }
    }

    /// True when the day has neither sunrise nor sunset.
    pub fn is_polar(&self) -> bool {
        !matches!(self.times.sunrise, SunEvent::At(_))
            && !matches!(self.times.sunset, SunEvent::At(_))
    }
}
