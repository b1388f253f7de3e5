//! Synodic-cycle lunar model.
//!
//! Phase is measured as elapsed synodic months since a fixed reference new
//! moon (2024-01-11 11:57 UTC), so it is exact at the anchor and periodic with
//! the mean synodic month. Sky placement deliberately reuses the solar
//! altitude/azimuth machinery with a phase-dependent time offset: the moon
//! trails the sun by `phase` of a day in hour-angle terms (coincident at new
//! moon, opposite at full). That gives a visually plausible position, not an
//! ephemeris-grade one, and the terminator parameter below is likewise a
//! plausible crescent/gibbous approximation rather than a projected ellipse.

use crate::projection::{self, HorizonFrame};
use crate::solar;
use crate::{GeoCoordinate, ScreenPosition, SkyPosition};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use serde::Serialize;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_861;

/// Altitude (degrees) below which the moon is treated as gone rather than
/// fading. Wider than the sun's -0.833° so the disc can fade out gradually.
const VISIBILITY_FLOOR_DEG: f64 = -8.0;

/// Phase and illumination snapshot for one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MoonPhaseInfo {
    /// Position in the synodic cycle, [0, 1): 0 = new, 0.5 = full.
    pub phase: f64,
    /// Illuminated fraction of the disc, [0, 1].
    pub illumination: f64,
    /// True while the lit fraction is growing (phase < 0.5).
    pub waxing: bool,
}

impl MoonPhaseInfo {
    /// How far across the disc the light/dark boundary sits, [0, 1]:
    /// 0 at new moon (fully dark), 1 at full moon (full disc), linear in
    /// phase distance from new moon on both the waxing and waning side.
    pub fn terminator(&self) -> f64 {
        (1.0 - 2.0 * (self.phase - 0.5).abs()).clamp(0.0, 1.0)
    }
}

/// Reference new moon: 2024-01-11 11:57 UTC.
fn reference_new_moon() -> DateTime<Utc> {
    // The literal is a known-valid calendar date; chrono's constructor is
    // total so the fallback arm exists only to avoid a panic path.
    Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Lunar phase for an instant.
///
/// Elapsed days since the reference new moon divided by the synodic month,
/// wrapped to [0, 1). Illumination is the cosine bridge
/// `(1 − cos 2πφ) / 2`, exactly 0 at new and 1 at full.
pub fn moon_phase(instant: DateTime<FixedOffset>) -> MoonPhaseInfo {
    let elapsed = instant.with_timezone(&Utc) - reference_new_moon();
    let elapsed_days = elapsed.num_milliseconds() as f64 / 86_400_000.0;
    let phase = (elapsed_days / SYNODIC_MONTH_DAYS).rem_euclid(1.0);

    MoonPhaseInfo {
        phase,
        illumination: (1.0 - (std::f64::consts::TAU * phase).cos()) / 2.0,
        waxing: phase < 0.5,
    }
}

/// Approximate sky position of the moon.
///
/// Evaluates the solar ephemeris at the instant shifted back by
/// `phase × 24 h`, which places the moon on the sun's arc offset by the
/// phase angle: coincident at new moon, opposite the sun at full moon.
pub fn moon_sky_position(
    instant: DateTime<FixedOffset>,
    coordinate: GeoCoordinate,
) -> SkyPosition {
    let phase = moon_phase(instant).phase;
    let lag_ms = (phase * 86_400_000.0).round() as i64;
    solar::solar_position(instant - Duration::milliseconds(lag_ms), coordinate)
}

/// Moon placement on the normalized screen, borrowing the sun's daily
/// sunrise/sunset reference frame.
pub fn moon_position(
    instant: DateTime<FixedOffset>,
    coordinate: GeoCoordinate,
    frame: &HorizonFrame,
) -> ScreenPosition {
    projection::project(moon_sky_position(instant, coordinate), frame)
}

/// Whether the moon should be drawn at all.
///
/// Altitude-thresholded like the sun but with extra allowance below the
/// horizon so the consumer can fade the disc out instead of popping it.
pub fn is_moon_visible(instant: DateTime<FixedOffset>, coordinate: GeoCoordinate) -> bool {
    moon_sky_position(instant, coordinate).altitude > VISIBILITY_FLOOR_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_instant(dt: DateTime<Utc>) -> DateTime<FixedOffset> {
        dt.with_timezone(&FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn test_reference_new_moon_is_dark() {
        let info = moon_phase(utc_instant(reference_new_moon()));
        assert!(info.phase < 1e-9 || info.phase > 1.0 - 1e-9);
        assert!(info.illumination < 1e-9);
        assert!(info.terminator() < 1e-9);
    }

    #[test]
    fn test_full_moon_half_cycle_later() {
        let half_cycle_ms = (SYNODIC_MONTH_DAYS / 2.0 * 86_400_000.0) as i64;
        let t = reference_new_moon() + Duration::milliseconds(half_cycle_ms);
        let info = moon_phase(utc_instant(t));

        assert!((info.phase - 0.5).abs() < 1e-6);
        assert!((info.illumination - 1.0).abs() < 1e-6);
        assert!((info.terminator() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_phase_is_periodic() {
        let t0 = utc_instant(reference_new_moon() + Duration::days(100));
        let cycle_ms = (SYNODIC_MONTH_DAYS * 86_400_000.0) as i64;
        let t1 = t0 + Duration::milliseconds(cycle_ms);

        let wrapped = (moon_phase(t1).phase - moon_phase(t0).phase).rem_euclid(1.0);
        let distance = wrapped.min(1.0 - wrapped);
        assert!(distance < 1e-6, "phase drifted {distance} over one cycle");
    }

    #[test]
    fn test_waxing_then_waning() {
        let quarter_ms = (SYNODIC_MONTH_DAYS / 4.0 * 86_400_000.0) as i64;
        let first = moon_phase(utc_instant(
            reference_new_moon() + Duration::milliseconds(quarter_ms),
        ));
        let last = moon_phase(utc_instant(
            reference_new_moon() + Duration::milliseconds(3 * quarter_ms),
        ));

        assert!(first.waxing);
        assert!(!last.waxing);
        // Both quarters show roughly half the disc lit.
        assert!((first.illumination - 0.5).abs() < 0.01);
        assert!((last.illumination - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_new_moon_rides_with_the_sun() {
        // At new moon the placement model collapses onto the solar position.
        let coordinate = GeoCoordinate::new(43.6532, -79.3832);
        let t = utc_instant(reference_new_moon());
        let sun = solar::solar_position(t, coordinate);
        let moon = moon_sky_position(t, coordinate);

        assert!((sun.altitude - moon.altitude).abs() < 0.5);
        assert!((sun.azimuth - moon.azimuth).abs() < 0.5);
    }

    #[test]
    fn test_moon_screen_position_stays_in_frame() {
        let coordinate = GeoCoordinate::new(43.6532, -79.3832);
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let times = solar::sun_times(day, coordinate, offset);
        let frame = HorizonFrame::for_day(&times, coordinate);

        for hour in 0..24 {
            let t = utc_instant(reference_new_moon() + Duration::hours(hour));
            let screen = moon_position(t, coordinate, &frame);
            assert!((10.0..=90.0).contains(&screen.x), "x {} at hour {hour}", screen.x);
            assert!((0.0..=100.0).contains(&screen.y));
        }
    }

    #[test]
    fn test_visibility_threshold() {
        let coordinate = GeoCoordinate::new(43.6532, -79.3832);
        let t = utc_instant(reference_new_moon());
        let altitude = moon_sky_position(t, coordinate).altitude;
        assert_eq!(
            is_moon_visible(t, coordinate),
            altitude > VISIBILITY_FLOOR_DEG
        );
    }
}
