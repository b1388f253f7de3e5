//! # Sky Clock Demo Binary
//!
//! Thin presentation consumer for the simulation library: computes a snapshot
//! (or runs the tick driver) and renders it as ASCII or JSON on stdout.
//! Override and animation flags map one-to-one onto the library's time-source
//! inputs.

// Test modules
#[cfg(test)]
mod tests;

use std::env;
use std::time::Duration;

use anyhow::Context;
use sky_clock_lib::clock::SkyClock;
use sky_clock_lib::config::Config;
use sky_clock_lib::driver::{ClockCommand, SimulationDriver};
use sky_clock_lib::renderer::draw_ascii;
use sky_clock_lib::scene::SkySnapshot;

struct Args {
    json: bool,
    animate: bool,
    /// Outer `Some` means `--scrub` was given; the inner value is an explicit
    /// speed, `None` deferring to the loaded configuration.
    scrub: Option<Option<f64>>,
    date: Option<String>,
    time: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    parse_args_from(env::args().skip(1))
}

fn parse_args_from(raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args {
        json: false,
        animate: false,
        scrub: None,
        date: None,
        time: None,
    };

    for arg in raw {
        if arg == "--json" {
            args.json = true;
        } else if arg == "--animate" {
            args.animate = true;
        } else if arg == "--scrub" {
            args.scrub = Some(None);
        } else if let Some(speed) = arg.strip_prefix("--scrub=") {
            let speed: f64 = speed
                .parse()
                .with_context(|| format!("invalid scrub speed {speed:?}"))?;
            args.scrub = Some(Some(speed));
        } else if let Some(date) = arg.strip_prefix("--date=") {
            args.date = Some(date.to_string());
        } else if let Some(time) = arg.strip_prefix("--time=") {
            args.time = Some(time.to_string());
        } else {
            anyhow::bail!(
                "unknown argument {arg:?}\n\
                 usage: sky-clock [--json] [--animate] [--scrub[=MIN_PER_SEC]] \
                 [--date=YYYY-MM-DD] [--time=HH:MM[:SS]]"
            );
        }
    }

    Ok(args)
}

/// Print one live frame: a single JSON line or the ASCII grid.
fn emit(snapshot: &SkySnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        draw_ascii(snapshot);
    }
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let config = Config::load();

    // Static one-shot rendering: resolve the instant and print.
    if !args.animate && args.scrub.is_none() {
        let mut clock = SkyClock::new(config.observer.offset(), &config.clock);
        clock
            .set_override(args.date.as_deref(), args.time.as_deref())
            .context("override rejected")?;

        let snapshot = SkySnapshot::compute(clock.now(), &config);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            draw_ascii(&snapshot);
        }
        return Ok(());
    }

    // Live modes run the tick driver on a tokio runtime.
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let animation_ms = config.clock.animation_duration_ms;
        let driver = SimulationDriver::spawn(config);
        let snapshots = driver.snapshots();

        if args.date.is_some() || args.time.is_some() {
            driver.send(ClockCommand::SetOverride {
                date: args.date.clone(),
                time: args.time.clone(),
            });
        }

        if let Some(speed) = args.scrub {
            driver.send(ClockCommand::StartScrubbing {
                minutes_per_second: speed,
            });
            // Scrub runs until interrupted; print one frame per second.
            loop {
                emit(&snapshots.borrow().clone(), args.json)?;
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }

        // Animation: bounded sweep through one full day, a frame per second
        // of wall time plus the final state.
        driver.animate();
        let deadline = tokio::time::Instant::now() + Duration::from_millis(animation_ms + 250);
        loop {
            emit(&snapshots.borrow().clone(), args.json)?;
            if tokio::time::Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        anyhow::Ok(())
    })?;

    Ok(())
}
