//! NOAA solar-position ephemeris.
//!
//! Implements the NOAA Solar Calculator method (Julian century → mean
//! longitude/anomaly → equation of center → apparent longitude → corrected
//! obliquity → declination + equation of time → hour angle → zenith/azimuth).
//! Accuracy is on the order of a minute of time and a tenth of a degree of
//! angle for the years around 2000, which is far tighter than the rendering
//! consumer needs.
//!
//! Public contract is degrees; all trigonometry is done in radians. West
//! longitudes are negative. The UTC offset is always taken from the instant
//! itself, never assumed.

use crate::{GeoCoordinate, SkyPosition};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike, Utc};
use serde::Serialize;

/// Sun-center altitude at sunrise/sunset: apparent radius plus mean refraction.
const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Sun-center altitude at civil dawn/dusk.
const CIVIL_TWILIGHT_ALTITUDE_DEG: f64 = -6.0;

/// A horizon crossing for one day, or a sentinel when the crossing does not
/// exist at that latitude and season.
///
/// The hour-angle equation `cos H = (sin h − sin φ sin δ) / (cos φ cos δ)`
/// leaves [-1, 1] on polar days/nights. That is reported here instead of
/// letting `acos` return NaN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum SunEvent {
    /// The sun crosses the threshold altitude at this local instant.
    At(DateTime<FixedOffset>),
    /// The sun stays above the threshold all day (polar day).
    AllAbove,
    /// The sun stays below the threshold all day (polar night).
    AllBelow,
}

impl SunEvent {
    /// The crossing instant, if one exists.
    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            SunEvent::At(t) => Some(*t),
            _ => None,
        }
    }
}

/// The five sun event instants for a single day and coordinate.
///
/// Ordering invariant when all crossings exist:
/// dawn < sunrise < solar_noon < sunset < dusk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SunTimes {
    /// Civil twilight start (sun center at -6°, morning)
    pub dawn: SunEvent,
    /// Sun center at -0.833°, morning
    pub sunrise: SunEvent,
    /// True solar noon (hour angle zero)
    pub solar_noon: DateTime<FixedOffset>,
    /// Sun center at -0.833°, evening
    pub sunset: SunEvent,
    /// Civil twilight end (sun center at -6°, evening)
    pub dusk: SunEvent,
}

/// Julian Day for a UTC instant, including the day fraction.
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + f64::from(instant.nanosecond()) * 1e-9;
    seconds / 86_400.0 + 2_440_587.5
}

/// Julian centuries since J2000.0.
fn julian_century(jd: f64) -> f64 {
    (jd - 2_451_545.0) / 36_525.0
}

/// Sun's geometric mean longitude in degrees, [0, 360).
fn geometric_mean_longitude(jc: f64) -> f64 {
    (280.46646 + jc * (36_000.76983 + jc * 0.000_3032)).rem_euclid(360.0)
}

/// Sun's geometric mean anomaly in degrees.
fn geometric_mean_anomaly(jc: f64) -> f64 {
    357.52911 + jc * (35_999.05029 - 0.000_1537 * jc)
}

/// Eccentricity of Earth's orbit (dimensionless).
fn orbital_eccentricity(jc: f64) -> f64 {
    0.016_708_634 - jc * (0.000_042_037 + 0.000_000_126_7 * jc)
}

/// Equation of center in degrees.
fn equation_of_center(jc: f64) -> f64 {
    let m = geometric_mean_anomaly(jc).to_radians();
    m.sin() * (1.914_602 - jc * (0.004_817 + 0.000_014 * jc))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * jc)
        + (3.0 * m).sin() * 0.000_289
}

/// Sun's apparent ecliptic longitude in degrees (true longitude corrected for
/// nutation and aberration).
fn apparent_longitude(jc: f64) -> f64 {
    let true_longitude = geometric_mean_longitude(jc) + equation_of_center(jc);
    let omega = 125.04 - 1_934.136 * jc;
    true_longitude - 0.005_69 - 0.004_78 * omega.to_radians().sin()
}

/// Mean obliquity of the ecliptic in degrees.
fn mean_obliquity(jc: f64) -> f64 {
    23.0 + (26.0 + (21.448 - jc * (46.815 + jc * (0.000_59 - jc * 0.001_813))) / 60.0) / 60.0
}

/// Obliquity corrected for nutation, in degrees.
fn corrected_obliquity(jc: f64) -> f64 {
    let omega = 125.04 - 1_934.136 * jc;
    mean_obliquity(jc) + 0.002_56 * omega.to_radians().cos()
}

/// Solar declination in degrees.
fn solar_declination(jc: f64) -> f64 {
    let sin_decl = corrected_obliquity(jc).to_radians().sin() * apparent_longitude(jc).to_radians().sin();
    sin_decl.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Equation of time in minutes (apparent solar time minus mean clock time).
fn equation_of_time(jc: f64) -> f64 {
    let y = (corrected_obliquity(jc) / 2.0).to_radians().tan().powi(2);
    let l0 = geometric_mean_longitude(jc).to_radians();
    let m = geometric_mean_anomaly(jc).to_radians();
    let e = orbital_eccentricity(jc);

    let eot = y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();

    4.0 * eot.to_degrees()
}

/// Minutes past local midnight for an instant, including fractional seconds.
fn local_clock_minutes(instant: DateTime<FixedOffset>) -> f64 {
    f64::from(instant.hour()) * 60.0
        + f64::from(instant.minute())
        + (f64::from(instant.second()) + f64::from(instant.nanosecond()) * 1e-9) / 60.0
}

/// Apparent solar position for an instant and observer coordinate.
///
/// Altitude is 90° minus the zenith angle; azimuth is the `atan2` form
/// normalized to [0, 360) clockwise from north. The zenith cosine is clamped
/// to [-1, 1] before `acos` so rounding can never produce NaN.
pub fn solar_position(instant: DateTime<FixedOffset>, coordinate: GeoCoordinate) -> SkyPosition {
    let jc = julian_century(julian_day(instant.with_timezone(&Utc)));

    let declination = solar_declination(jc).to_radians();
    let eot = equation_of_time(jc);
    let tz_minutes = f64::from(instant.offset().local_minus_utc()) / 60.0;

    // True solar time: clock reading corrected by the equation of time and
    // the observer's offset from the timezone meridian.
    let true_solar_minutes =
        (local_clock_minutes(instant) + eot + 4.0 * coordinate.longitude - tz_minutes)
            .rem_euclid(1_440.0);
    let hour_angle = (true_solar_minutes / 4.0 - 180.0).to_radians();

    let latitude = coordinate.latitude.to_radians();
    let cos_zenith = (latitude.sin() * declination.sin()
        + latitude.cos() * declination.cos() * hour_angle.cos())
    .clamp(-1.0, 1.0);
    let zenith = cos_zenith.acos();

    // atan2 azimuth measured from south, positive toward west; shifting by
    // 180° yields clockwise-from-north.
    let azimuth_from_south = hour_angle
        .sin()
        .atan2(hour_angle.cos() * latitude.sin() - declination.tan() * latitude.cos());

    SkyPosition {
        altitude: 90.0 - zenith.to_degrees(),
        azimuth: (azimuth_from_south.to_degrees() + 180.0).rem_euclid(360.0),
    }
}

/// Half-day hour angle (degrees) at which the sun's center reaches
/// `altitude_deg`, or a sentinel when the crossing does not exist.
fn horizon_hour_angle(
    latitude_deg: f64,
    declination_deg: f64,
    altitude_deg: f64,
) -> Result<f64, SunEvent> {
    let lat = latitude_deg.to_radians();
    let decl = declination_deg.to_radians();
    let cos_ha =
        (altitude_deg.to_radians().sin() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());

    if cos_ha > 1.0 {
        // Sun never climbs to the threshold.
        Err(SunEvent::AllBelow)
    } else if cos_ha < -1.0 {
        // Sun never drops to the threshold.
        Err(SunEvent::AllAbove)
    } else {
        Ok(cos_ha.acos().to_degrees())
    }
}

/// Sun event times for one calendar day at the observer coordinate, expressed
/// in the given fixed UTC offset.
///
/// The declination/equation-of-time pipeline is evaluated once at local noon,
/// then the hour angle is solved at -0.833° for sunrise/sunset and -6° for
/// civil dawn/dusk. Days where a crossing has no solution yield
/// [`SunEvent::AllAbove`] or [`SunEvent::AllBelow`] for that event.
pub fn sun_times(day: NaiveDate, coordinate: GeoCoordinate, offset: FixedOffset) -> SunTimes {
    let midnight = local_midnight(day, offset);
    let approx_noon = midnight + Duration::hours(12);
    let jc = julian_century(julian_day(approx_noon.with_timezone(&Utc)));

    let declination = solar_declination(jc);
    let eot = equation_of_time(jc);
    let tz_minutes = f64::from(offset.local_minus_utc()) / 60.0;

    // Local clock minutes at which the hour angle is zero.
    let noon_minutes = 720.0 - eot - 4.0 * coordinate.longitude + tz_minutes;
    let at = |minutes: f64| midnight + Duration::seconds((minutes * 60.0).round() as i64);

    let event = |altitude_deg: f64, morning: bool| -> SunEvent {
        match horizon_hour_angle(coordinate.latitude, declination, altitude_deg) {
            Ok(ha_deg) => {
                let minutes = if morning {
                    noon_minutes - 4.0 * ha_deg
                } else {
                    noon_minutes + 4.0 * ha_deg
                };
                SunEvent::At(at(minutes))
            }
            Err(sentinel) => sentinel,
        }
    };

    SunTimes {
        dawn: event(CIVIL_TWILIGHT_ALTITUDE_DEG, true),
        sunrise: event(SUNRISE_ALTITUDE_DEG, true),
        solar_noon: at(noon_minutes),
        sunset: event(SUNRISE_ALTITUDE_DEG, false),
        dusk: event(CIVIL_TWILIGHT_ALTITUDE_DEG, false),
    }
}

/// Midnight at the start of `day` in the given fixed offset.
fn local_midnight(day: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    // Fixed offsets map every local time to exactly one instant; the fallback
    // arm is unreachable but avoids a panic path in library code.
    match day.and_hms_opt(0, 0, 0) {
        Some(naive) => match naive.and_local_timezone(offset) {
            chrono::LocalResult::Single(t) => t,
            _ => DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).with_timezone(&offset),
        },
        None => DateTime::<Utc>::UNIX_EPOCH.with_timezone(&offset),
    }
}
