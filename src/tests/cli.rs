//! Flag-parsing and frame-output checks for the demo binary.

use chrono::{FixedOffset, TimeZone};
use sky_clock_lib::scene::SkySnapshot;
use sky_clock_lib::GeoCoordinate;

use crate::{emit, parse_args_from};

fn parse(flags: &[&str]) -> anyhow::Result<crate::Args> {
    parse_args_from(flags.iter().map(|s| s.to_string()))
}

#[test]
fn bare_scrub_defers_speed_to_config() {
    let args = parse(&["--scrub"]).unwrap();
    // No speed is resolved at parse time; the loaded config decides later.
    assert_eq!(args.scrub, Some(None));
}

#[test]
fn explicit_scrub_speed_is_kept() {
    let args = parse(&["--scrub=120"]).unwrap();
    assert_eq!(args.scrub, Some(Some(120.0)));
}

#[test]
fn malformed_scrub_speed_is_rejected() {
    assert!(parse(&["--scrub=fast"]).is_err());
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(parse(&["--bogus"]).is_err());
}

#[test]
fn overrides_and_json_parse_together() {
    let args = parse(&["--json", "--date=2024-12-21", "--time=08:15"]).unwrap();
    assert!(args.json);
    assert_eq!(args.date.as_deref(), Some("2024-12-21"));
    assert_eq!(args.time.as_deref(), Some("08:15"));
}

#[test]
fn emit_supports_both_output_formats() {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let instant = offset.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let snapshot = SkySnapshot::compute_at(instant, GeoCoordinate::new(43.6532, -79.3832));

    // Both paths must produce a frame without erroring.
    emit(&snapshot, true).unwrap();
    emit(&snapshot, false).unwrap();
}
