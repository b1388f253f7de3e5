//! Altitude/azimuth → normalized screen coordinates.
//!
//! The horizontal axis is framed by the day's sunrise and sunset azimuths so
//! the disc tracks the real compass sweep; the vertical axis is a sine arc so
//! apparent motion slows near the top, matching how the sun actually moves.
//! Both the sun and the moon share this projection (the moon borrows the
//! sun's frame for the day, a documented approximation).

use crate::solar::{self, SunTimes};
use crate::{GeoCoordinate, ScreenPosition, SkyPosition};

/// Horizontal padding (percent of viewport) kept clear on each side.
pub const HORIZONTAL_PADDING: f64 = 10.0;

/// Screen y at the top of the arc band.
const TOP_Y: f64 = 10.0;

/// Screen y at the horizon/bottom.
const BOTTOM_Y: f64 = 100.0;

/// Assumed seasonal maximum altitude (degrees) for the vertical arc scale.
const MAX_ARC_ALTITUDE_DEG: f64 = 70.0;

/// Default frame when the day has no sunrise/sunset: due east to due west.
const DEFAULT_EAST_AZIMUTH: f64 = 90.0;
const DEFAULT_WEST_AZIMUTH: f64 = 270.0;

/// Left/right azimuth reference frame for one day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizonFrame {
    /// Azimuth at sunrise (degrees from north).
    pub east_azimuth: f64,
    /// Azimuth at sunset (degrees from north).
    pub west_azimuth: f64,
}

impl HorizonFrame {
    /// Frame from the day's sun times, evaluating the solar azimuth at the
    /// sunrise and sunset instants. Polar days/nights (no crossings) fall
    /// back to the due-east/due-west default instead of producing NaN.
    pub fn for_day(times: &SunTimes, coordinate: GeoCoordinate) -> Self {
        match (times.sunrise.instant(), times.sunset.instant()) {
            (Some(sunrise), Some(sunset)) => HorizonFrame {
                east_azimuth: solar::solar_position(sunrise, coordinate).azimuth,
                west_azimuth: solar::solar_position(sunset, coordinate).azimuth,
            },
            _ => HorizonFrame::default(),
        }
    }
}

impl Default for HorizonFrame {
    fn default() -> Self {
        HorizonFrame {
            east_azimuth: DEFAULT_EAST_AZIMUTH,
            west_azimuth: DEFAULT_WEST_AZIMUTH,
        }
    }
}

/// Map a sky position onto the normalized screen.
///
/// Horizontal: the current azimuth is normalized against the sunrise→sunset
/// range (correcting wrap-around when the frame crosses 0°/360°), inverted so
/// sunrise lands near the right padded edge and sunset near the left, and
/// clamped into `[padding, 100 − padding]`.
///
/// Vertical: anything at or below the horizon pins to y = 100; above it, the
/// altitude is mapped through a quarter sine against the assumed seasonal
/// maximum and clamped into the top/bottom band.
pub fn project(position: SkyPosition, frame: &HorizonFrame) -> ScreenPosition {
    let mut east = frame.east_azimuth;
    let mut west = frame.west_azimuth;
    let mut azimuth = position.azimuth;

    // Frame wraps through north: push the wrapped side up by a full turn so
    // the range is monotone before normalizing.
    if west < east {
        west += 360.0;
        if azimuth < east {
            azimuth += 360.0;
        }
    }

    let span = west - east;
    let along = if span.abs() < f64::EPSILON {
        0.5
    } else {
        ((azimuth - east) / span).clamp(0.0, 1.0)
    };

    let usable = 100.0 - 2.0 * HORIZONTAL_PADDING;
    let x = 100.0 - (HORIZONTAL_PADDING + along * usable);

    let y = if position.altitude <= 0.0 {
        BOTTOM_Y
    } else {
        let t = (position.altitude / MAX_ARC_ALTITUDE_DEG).clamp(0.0, 1.0);
        let arc = (t * std::f64::consts::FRAC_PI_2).sin();
        (BOTTOM_Y - arc * (BOTTOM_Y - TOP_Y)).clamp(TOP_Y, BOTTOM_Y)
    };

    ScreenPosition {
        x,
        y,
        altitude: position.altitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(altitude: f64, azimuth: f64) -> SkyPosition {
        SkyPosition { altitude, azimuth }
    }

    #[test]
    fn test_below_horizon_pins_to_bottom() {
        let frame = HorizonFrame::default();
        for altitude in [0.0, -0.5, -20.0, -90.0] {
            let p = project(at(altitude, 180.0), &frame);
            assert_eq!(p.y, 100.0, "altitude {altitude} should pin to bottom");
        }
    }

    #[test]
    fn test_x_stays_inside_padding() {
        let frame = HorizonFrame {
            east_azimuth: 56.0,
            west_azimuth: 304.0,
        };
        let mut azimuth = 0.0;
        while azimuth < 360.0 {
            let p = project(at(30.0, azimuth), &frame);
            assert!(
                (HORIZONTAL_PADDING..=100.0 - HORIZONTAL_PADDING).contains(&p.x),
                "x {} escaped padding at azimuth {}",
                p.x,
                azimuth
            );
            azimuth += 7.5;
        }
    }

    #[test]
    fn test_frame_edges_map_to_padded_edges() {
        let frame = HorizonFrame {
            east_azimuth: 60.0,
            west_azimuth: 300.0,
        };
        let sunrise = project(at(5.0, 60.0), &frame);
        let sunset = project(at(5.0, 300.0), &frame);

        assert!((sunrise.x - 90.0).abs() < 1e-9);
        assert!((sunset.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrapped_frame() {
        // Sunset azimuth numerically below sunrise azimuth: the frame crosses
        // north and must still produce in-band monotone placement.
        let frame = HorizonFrame {
            east_azimuth: 300.0,
            west_azimuth: 60.0,
        };

        let start = project(at(10.0, 300.0), &frame);
        let middle = project(at(10.0, 0.0), &frame);
        let end = project(at(10.0, 60.0), &frame);

        assert!((start.x - 90.0).abs() < 1e-9);
        assert!((end.x - 10.0).abs() < 1e-9);
        assert!(end.x < middle.x && middle.x < start.x);
    }

    #[test]
    fn test_vertical_arc_slows_near_top() {
        let frame = HorizonFrame::default();
        let low = project(at(10.0, 180.0), &frame);
        let mid = project(at(35.0, 180.0), &frame);
        let high = project(at(60.0, 180.0), &frame);

        // Same altitude step, shrinking screen step: sine arc compresses the
        // top of the climb.
        let first_climb = low.y - mid.y;
        let second_climb = mid.y - high.y;
        assert!(second_climb < first_climb);
        assert!(high.y >= 10.0);
    }

    #[test]
    fn test_altitude_above_seasonal_max_clamps() {
        let frame = HorizonFrame::default();
        let p = project(at(89.0, 180.0), &frame);
        assert!((p.y - 10.0).abs() < 1e-9);
    }
}
