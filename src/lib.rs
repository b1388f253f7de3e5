//! # Sky Clock Core Library
//!
//! A deterministic astronomical simulation engine: given an observation
//! instant and a fixed observer location it computes the sun's apparent
//! position and daily event times, the moon's phase and approximate sky
//! position, normalized screen coordinates for both discs, and interpolated
//! sky/ground/sun/border colors across the twilight bands. A controllable
//! virtual-time source lets the simulation run live, pin to an explicit
//! date/time, scrub forward at an accelerated rate, or fast-forward through
//! one full day.
//!
//! ## Design Philosophy
//!
//! ### Pure snapshots
//! Every derived value is an immutable snapshot recomputed fresh from the
//! current instant. Nothing is cached between ticks and nothing is mutated in
//! place, so any number of consumers can read the latest [`scene::SkySnapshot`]
//! without coordination.
//!
//! ### Degrees at the boundary, radians inside
//! All public angles are degrees (altitude in [-90, 90], azimuth in [0, 360)
//! clockwise from north, west longitudes negative). Trigonometry is done in
//! radians internally, with inverse-trig arguments clamped to [-1, 1] to guard
//! floating-point overshoot.
//!
//! ### Sentinels over panics
//! At extreme latitude/season combinations the sunrise hour-angle equation has
//! no solution. Those days are reported as [`solar::SunEvent::AllAbove`] /
//! [`solar::SunEvent::AllBelow`] sentinels and every downstream consumer falls
//! back to a sensible frame instead of propagating NaN.
//!
//! ### Data Flow
//! Time source → solar ephemeris → {screen projection, color model}, with the
//! lunar ephemeris reusing the solar machinery for its approximate placement.
//! The rendering surface is a collaborator: the library ends at the snapshot.

use serde::{Deserialize, Serialize};

// Module declarations
pub mod clock;
pub mod config;
pub mod driver;
pub mod lunar;
pub mod palette;
pub mod projection;
pub mod renderer;
pub mod scene;
pub mod solar;

/// Geographic observer location in degrees.
///
/// Latitude is positive north, longitude positive east (west negative). The
/// system runs with one fixed observer, but every ephemeris function takes the
/// coordinate as a parameter so the math stays testable against arbitrary
/// locations.
///
/// # Example
/// ```
/// use sky_clock_lib::GeoCoordinate;
///
/// let toronto = GeoCoordinate::new(43.6532, -79.3832);
/// assert!(toronto.latitude > 0.0);
/// assert!(toronto.longitude < 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Degrees north of the equator (negative = south)
    pub latitude: f64,
    /// Degrees east of Greenwich (negative = west)
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoCoordinate {
            latitude,
            longitude,
        }
    }
}

/// Apparent position of a body in the observer's sky, in degrees.
///
/// Altitude 0 is the horizon, 90 the zenith; values below 0 are under the
/// horizon. Azimuth is measured clockwise from north, normalized to [0, 360).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SkyPosition {
    pub altitude: f64,
    pub azimuth: f64,
}

/// Normalized 2D screen placement produced by [`projection::project`].
///
/// Both axes are percentages of the viewport: x grows rightward, y grows
/// downward with y = 100 meaning "pinned to the horizon line". The source
/// altitude rides along for fade/visibility decisions in the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScreenPosition {
    /// Horizontal placement in [0, 100]
    pub x: f64,
    /// Vertical placement in [0, 100]; 100 = horizon/bottom
    pub y: f64,
    /// Altitude (degrees) the placement was derived from
    pub altitude: f64,
}
