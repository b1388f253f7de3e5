//! Solar-altitude-driven color model.
//!
//! Five named lighting bands (night, astronomical, nautical, civil, day) with
//! fixed preset colors at the band boundaries; each RGB channel interpolates
//! linearly between adjacent presets. The star-field opacity, the sun-disc
//! color and the border color each follow their own independent breakpoint
//! tables — stars have to vanish faster than the sky brightens, and the disc
//! has to redden near the horizon on its own schedule.

use serde::{Serialize, Serializer};

/// 8-bit RGB color. Channel math during interpolation runs in f64 and is
/// re-encoded with rounding and clamping; serialization and display use
/// lowercase `#rrggbb` hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Per-channel linear interpolation, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// The five lighting bands, coarsest classification of the sky state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LightingBand {
    Night,
    AstronomicalTwilight,
    NauticalTwilight,
    CivilTwilight,
    Day,
}

impl LightingBand {
    /// Band for a solar altitude in degrees.
    pub fn for_altitude(altitude: f64) -> Self {
        if altitude <= -18.0 {
            LightingBand::Night
        } else if altitude <= -12.0 {
            LightingBand::AstronomicalTwilight
        } else if altitude <= -6.0 {
            LightingBand::NauticalTwilight
        } else if altitude <= 0.0 {
            LightingBand::CivilTwilight
        } else {
            LightingBand::Day
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LightingBand::Night => "night",
            LightingBand::AstronomicalTwilight => "astronomical twilight",
            LightingBand::NauticalTwilight => "nautical twilight",
            LightingBand::CivilTwilight => "civil twilight",
            LightingBand::Day => "day",
        }
    }
}

/// Full sky appearance for one solar altitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SkyColors {
    pub band: LightingBand,
    /// Gradient color at the top of the sky.
    pub top: Rgb,
    /// Gradient color at the horizon.
    pub bottom: Rgb,
    pub ground: Rgb,
    pub border: Rgb,
    pub show_stars: bool,
    /// Star-layer opacity, [0, 1].
    pub star_opacity: f64,
}

/// Preset anchored at the lower boundary of each band. Interpolation runs
/// between consecutive anchors, so `sky_colors` returns the anchor exactly at
/// its boundary altitude.
struct BandAnchor {
    altitude: f64,
    top: Rgb,
    bottom: Rgb,
    ground: Rgb,
    show_stars: bool,
}

/// Anchors at -18° (night), -12° (astronomical), -6° (nautical), 0° (civil
/// end / golden-hour start) and 15° (full day). Below the first anchor the
/// night preset holds; above the last, the day preset.
const BAND_ANCHORS: [BandAnchor; 5] = [
    BandAnchor {
        altitude: -18.0,
        top: Rgb::new(0x02, 0x01, 0x11),
        bottom: Rgb::new(0x0b, 0x10, 0x26),
        ground: Rgb::new(0x05, 0x05, 0x08),
        show_stars: true,
    },
    BandAnchor {
        altitude: -12.0,
        top: Rgb::new(0x0b, 0x10, 0x3a),
        bottom: Rgb::new(0x2c, 0x2b, 0x5e),
        ground: Rgb::new(0x0a, 0x0a, 0x12),
        show_stars: true,
    },
    BandAnchor {
        altitude: -6.0,
        top: Rgb::new(0x23, 0x3a, 0x6e),
        bottom: Rgb::new(0x7d, 0x53, 0x6b),
        ground: Rgb::new(0x1c, 0x1a, 0x24),
        show_stars: false,
    },
    BandAnchor {
        altitude: 0.0,
        top: Rgb::new(0x4a, 0x7b, 0xc4),
        bottom: Rgb::new(0xf5, 0xa6, 0x62),
        ground: Rgb::new(0x3d, 0x40, 0x32),
        show_stars: false,
    },
    BandAnchor {
        altitude: 15.0,
        top: Rgb::new(0x4a, 0x90, 0xd9),
        bottom: Rgb::new(0xb8, 0xd8, 0xf0),
        ground: Rgb::new(0x58, 0x6e, 0x3f),
        show_stars: false,
    },
];

/// Breakpoint table for a single interpolated color channel set.
type ColorStop = (f64, Rgb);

/// Sun disc color: deep red at the horizon, yellow-white high up.
const SUN_STOPS: [ColorStop; 5] = [
    (-6.0, Rgb::new(0xb0, 0x3a, 0x2e)),
    (0.0, Rgb::new(0xff, 0x6b, 0x35)),
    (10.0, Rgb::new(0xff, 0xc1, 0x5e)),
    (30.0, Rgb::new(0xff, 0xe2, 0x9a)),
    (60.0, Rgb::new(0xff, 0xf4, 0xd6)),
];

/// Decorative frame color, on its own breakpoints distinct from the sky bands.
const BORDER_STOPS: [ColorStop; 4] = [
    (-18.0, Rgb::new(0x0d, 0x0d, 0x1a)),
    (-6.0, Rgb::new(0x2c, 0x2c, 0x54)),
    (0.0, Rgb::new(0xb5, 0x65, 0x1d)),
    (15.0, Rgb::new(0xd4, 0xa0, 0x4f)),
];

/// Piecewise-linear lookup over a breakpoint table, clamped at both ends.
fn interpolate_stops(stops: &[ColorStop], altitude: f64) -> Rgb {
    let (first_alt, first_color) = stops[0];
    if altitude <= first_alt {
        return first_color;
    }
    for pair in stops.windows(2) {
        let (a0, c0) = pair[0];
        let (a1, c1) = pair[1];
        if altitude <= a1 {
            return c0.lerp(c1, (altitude - a0) / (a1 - a0));
        }
    }
    stops[stops.len() - 1].1
}

/// Sun disc color for a solar altitude.
pub fn sun_color(altitude: f64) -> Rgb {
    interpolate_stops(&SUN_STOPS, altitude)
}

/// Border/frame color for a solar altitude.
pub fn border_color(altitude: f64) -> Rgb {
    interpolate_stops(&BORDER_STOPS, altitude)
}

/// Star-layer opacity: fully opaque at and below -15°, linear fade to zero by
/// -10°, zero above. Narrower than the band model because stars must vanish
/// faster than the sky brightens.
pub fn star_opacity(altitude: f64) -> f64 {
    if altitude <= -15.0 {
        1.0
    } else if altitude >= -10.0 {
        0.0
    } else {
        (-10.0 - altitude) / 5.0
    }
}

/// Sky appearance for a solar altitude.
///
/// Color channels interpolate between the band anchors; the `show_stars`
/// boolean switches at the midpoint between anchors (the lower anchor's value
/// holds while `t < 0.5`).
pub fn sky_colors(altitude: f64) -> SkyColors {
    let band = LightingBand::for_altitude(altitude);
    let opacity = star_opacity(altitude);

    let first = &BAND_ANCHORS[0];
    let last = &BAND_ANCHORS[BAND_ANCHORS.len() - 1];

    let (top, bottom, ground, show_stars) = if altitude <= first.altitude {
        (first.top, first.bottom, first.ground, first.show_stars)
    } else if altitude >= last.altitude {
        (last.top, last.bottom, last.ground, last.show_stars)
    } else {
        let mut result = (last.top, last.bottom, last.ground, last.show_stars);
        for pair in BAND_ANCHORS.windows(2) {
            let lower = &pair[0];
            let upper = &pair[1];
            if altitude <= upper.altitude {
                let t = (altitude - lower.altitude) / (upper.altitude - lower.altitude);
                let stars = if t < 0.5 {
                    lower.show_stars
                } else {
                    upper.show_stars
                };
                result = (
                    lower.top.lerp(upper.top, t),
                    lower.bottom.lerp(upper.bottom, t),
                    lower.ground.lerp(upper.ground, t),
                    stars,
                );
                break;
            }
        }
        result
    };

    SkyColors {
        band,
        top,
        bottom,
        ground,
        border: border_color(altitude),
        show_stars,
        star_opacity: opacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb::new(255, 107, 53).to_hex(), "#ff6b35");
        assert_eq!(Rgb::new(0xb0, 0x3a, 0x2e).to_string(), "#b03a2e");
    }

    #[test]
    fn test_lerp_endpoints_and_rounding() {
        let a = Rgb::new(10, 200, 0);
        let b = Rgb::new(20, 100, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        // t outside [0,1] clamps rather than extrapolating
        assert_eq!(a.lerp(b, -3.0), a);
        assert_eq!(a.lerp(b, 7.0), b);
        // 10 + 0.5*10 = 15, 200 - 50 = 150, 127.5 rounds to 128
        assert_eq!(a.lerp(b, 0.5), Rgb::new(15, 150, 128));
    }

    #[test]
    fn test_boundary_altitudes_hit_presets_exactly() {
        for anchor in &BAND_ANCHORS {
            let colors = sky_colors(anchor.altitude);
            assert_eq!(colors.top, anchor.top, "top at {}", anchor.altitude);
            assert_eq!(colors.bottom, anchor.bottom, "bottom at {}", anchor.altitude);
            assert_eq!(colors.ground, anchor.ground, "ground at {}", anchor.altitude);
        }
    }

    #[test]
    fn test_channels_interpolate_monotonically() {
        // Between each adjacent pair of anchors every channel must move
        // monotonically toward the upper anchor.
        for pair in BAND_ANCHORS.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            let ascending = |a: u8, b: u8| b >= a;
            let mut previous = sky_colors(lo.altitude);
            let steps = 24;
            for i in 1..=steps {
                let altitude =
                    lo.altitude + (hi.altitude - lo.altitude) * f64::from(i) / f64::from(steps);
                let current = sky_colors(altitude);
                for (prev_ch, cur_ch, lo_ch, hi_ch) in [
                    (previous.top.r, current.top.r, lo.top.r, hi.top.r),
                    (previous.top.g, current.top.g, lo.top.g, hi.top.g),
                    (previous.top.b, current.top.b, lo.top.b, hi.top.b),
                    (previous.bottom.r, current.bottom.r, lo.bottom.r, hi.bottom.r),
                    (previous.bottom.g, current.bottom.g, lo.bottom.g, hi.bottom.g),
                    (previous.bottom.b, current.bottom.b, lo.bottom.b, hi.bottom.b),
                ] {
                    if ascending(lo_ch, hi_ch) {
                        assert!(cur_ch >= prev_ch, "channel regressed at {altitude}");
                    } else {
                        assert!(cur_ch <= prev_ch, "channel regressed at {altitude}");
                    }
                }
                previous = current;
            }
        }
    }

    #[test]
    fn test_band_classification() {
        assert_eq!(LightingBand::for_altitude(-30.0), LightingBand::Night);
        assert_eq!(LightingBand::for_altitude(-18.0), LightingBand::Night);
        assert_eq!(
            LightingBand::for_altitude(-15.0),
            LightingBand::AstronomicalTwilight
        );
        assert_eq!(
            LightingBand::for_altitude(-9.0),
            LightingBand::NauticalTwilight
        );
        assert_eq!(
            LightingBand::for_altitude(-3.0),
            LightingBand::CivilTwilight
        );
        assert_eq!(LightingBand::for_altitude(0.5), LightingBand::Day);
        assert_eq!(LightingBand::for_altitude(45.0), LightingBand::Day);
    }

    #[test]
    fn test_star_opacity_curve() {
        assert_eq!(star_opacity(-40.0), 1.0);
        assert_eq!(star_opacity(-15.0), 1.0);
        assert!((star_opacity(-12.5) - 0.5).abs() < 1e-9);
        assert_eq!(star_opacity(-10.0), 0.0);
        assert_eq!(star_opacity(5.0), 0.0);
    }

    #[test]
    fn test_show_stars_switches_at_band_midpoint() {
        // Band -12..-6: lower anchor shows stars, upper does not.
        assert!(sky_colors(-11.0).show_stars);
        assert!(sky_colors(-9.1).show_stars);
        assert!(!sky_colors(-8.9).show_stars);
        assert!(!sky_colors(-6.0).show_stars);
    }

    #[test]
    fn test_sun_color_reddens_toward_horizon() {
        let horizon = sun_color(0.0);
        let zenith = sun_color(65.0);
        // Horizon disc is more saturated red; high disc is near white.
        assert!(horizon.r > horizon.b);
        assert!(zenith.b > horizon.b);
        assert_eq!(sun_color(-20.0), sun_color(-6.0));
        assert_eq!(sun_color(80.0), sun_color(60.0));
    }

    #[test]
    fn test_border_color_has_own_breakpoints() {
        assert_eq!(border_color(-30.0), Rgb::new(0x0d, 0x0d, 0x1a));
        assert_eq!(border_color(0.0), Rgb::new(0xb5, 0x65, 0x1d));
        // Between stops it interpolates rather than stepping.
        let mid = border_color(-3.0);
        assert_ne!(mid, border_color(-6.0));
        assert_ne!(mid, border_color(0.0));
    }
}
