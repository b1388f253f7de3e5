//! Virtual time source and scrub/animation controller.
//!
//! One tagged mode variant and one authoritative function
//! ([`SkyClock::instant_at`]) computing the displayed instant from it — no
//! implicit precedence between override flags. Wall-clock progress arrives
//! through [`SkyClock::tick`]; the clock itself never reads timers, which
//! keeps every transition deterministic under test.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc,
};
use thiserror::Error;

use crate::config::ClockConfig;

/// Minutes in one wrapped virtual day.
const MINUTES_PER_DAY: f64 = 1_440.0;

/// Errors raised at the override boundary.
///
/// Malformed override strings fail fast here; they are never silently
/// coerced into a plausible-but-wrong time.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OverrideError {
    /// Time override did not parse as `HH:MM` or `HH:MM:SS`
    #[error("invalid time override {0:?}: expected HH:MM or HH:MM:SS")]
    InvalidTime(String),

    /// Date override did not parse as `YYYY-MM-DD`
    #[error("invalid date override {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// How the next displayed instant is computed from wall-clock ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockMode {
    /// Follow the real clock, reprojected into the observer offset.
    RealTime,
    /// Explicit date and/or time substitute for the matching parts of the
    /// real instant (time-only keeps the real date, date-only the real time).
    FixedOverride {
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
    },
    /// Continuously advance a virtual minute-of-day offset, wrapping at 1440.
    Scrubbing {
        minutes_per_second: f64,
        offset_minutes: f64,
    },
    /// One-shot accelerated sweep: a fixed wall duration maps to one full
    /// 1440-minute cycle, then the prior mode is restored.
    Animating {
        start_offset_minutes: f64,
        elapsed_ms: u64,
        duration_ms: u64,
    },
}

/// The controllable time source.
///
/// Produces the current observation instant in the configured observer offset
/// from the active [`ClockMode`]. Scrubbing and animating are mutually
/// exclusive by construction: entering one replaces the other as the active
/// mode, and animation stashes the prior mode to restore on completion.
#[derive(Clone, Debug)]
pub struct SkyClock {
    offset: FixedOffset,
    mode: ClockMode,
    /// Mode to restore when an animation completes.
    prior: Option<ClockMode>,
    idle_tick: std::time::Duration,
    animation_tick: std::time::Duration,
    animation_duration_ms: u64,
}

impl SkyClock {
    pub fn new(offset: FixedOffset, cadence: &ClockConfig) -> Self {
        SkyClock {
            offset,
            mode: ClockMode::RealTime,
            prior: None,
            idle_tick: std::time::Duration::from_millis(cadence.tick_ms),
            animation_tick: std::time::Duration::from_millis(cadence.animation_tick_ms),
            animation_duration_ms: cadence.animation_duration_ms,
        }
    }

    pub fn mode(&self) -> &ClockMode {
        &self.mode
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.mode, ClockMode::Animating { .. })
    }

    /// Recompute interval appropriate for the active mode.
    pub fn tick_interval(&self) -> std::time::Duration {
        if self.is_animating() {
            self.animation_tick
        } else {
            self.idle_tick
        }
    }

    /// Install a fixed override parsed from the boundary strings. Passing
    /// neither part returns the clock to real time.
    pub fn set_override(
        &mut self,
        date: Option<&str>,
        time: Option<&str>,
    ) -> Result<(), OverrideError> {
        let date = date
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| OverrideError::InvalidDate(s.to_string()))
            })
            .transpose()?;
        let time = time.map(parse_time_override).transpose()?;

        self.mode = match (date, time) {
            (None, None) => ClockMode::RealTime,
            (date, time) => ClockMode::FixedOverride { date, time },
        };
        self.prior = None;
        Ok(())
    }

    /// Begin scrubbing at `minutes_per_second`, suppressing any running
    /// animation.
    pub fn start_scrubbing(&mut self, minutes_per_second: f64) {
        let offset_minutes = self.offset_minutes();
        self.mode = ClockMode::Scrubbing {
            minutes_per_second,
            offset_minutes,
        };
        self.prior = None;
    }

    /// Leave scrubbing, discarding the accumulated offset.
    pub fn stop_scrubbing(&mut self) {
        if matches!(self.mode, ClockMode::Scrubbing { .. }) {
            self.mode = ClockMode::RealTime;
        }
    }

    /// Fire-and-forget day animation. Starting while one is already running
    /// is an idempotent no-op. The sweep begins from whatever instant is
    /// currently displayed and restores the prior mode once a full cycle has
    /// wrapped back to the starting offset.
    pub fn start_animation(&mut self) {
        if self.is_animating() {
            return;
        }
        let start_offset_minutes = self.offset_minutes();
        self.prior = Some(self.mode);
        self.mode = ClockMode::Animating {
            start_offset_minutes,
            elapsed_ms: 0,
            duration_ms: self.animation_duration_ms,
        };
    }

    /// Advance virtual state by one wall-clock step. Returns true when this
    /// tick completed an animation (and restored the prior mode).
    pub fn tick(&mut self, wall_elapsed: std::time::Duration) -> bool {
        match &mut self.mode {
            ClockMode::Scrubbing {
                minutes_per_second,
                offset_minutes,
            } => {
                *offset_minutes = (*offset_minutes
                    + *minutes_per_second * wall_elapsed.as_secs_f64())
                .rem_euclid(MINUTES_PER_DAY);
                false
            }
            ClockMode::Animating {
                elapsed_ms,
                duration_ms,
                ..
            } => {
                *elapsed_ms = elapsed_ms.saturating_add(wall_elapsed.as_millis() as u64);
                if *elapsed_ms >= *duration_ms {
                    // Full cycle: the offset has wrapped back to its start.
                    self.mode = self.prior.take().unwrap_or(ClockMode::RealTime);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Current observation instant from the live wall clock.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.instant_at(Utc::now())
    }

    /// The authoritative mode → instant function, evaluated against an
    /// explicit wall-clock reading so tests stay deterministic.
    pub fn instant_at(&self, wall: DateTime<Utc>) -> DateTime<FixedOffset> {
        let local = wall.with_timezone(&self.offset);
        let base = self.base_instant(local);
        let offset_minutes = self.offset_minutes();
        base + Duration::milliseconds((offset_minutes * 60_000.0).round() as i64)
    }

    /// Base instant before any scrub/animation offset: the local wall clock
    /// with any fixed-override parts substituted.
    fn base_instant(&self, local: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let base_mode = match &self.mode {
            // An animation sweeps relative to whatever it interrupted.
            ClockMode::Animating { .. } => self.prior.as_ref().unwrap_or(&ClockMode::RealTime),
            other => other,
        };

        let (date, time) = match base_mode {
            ClockMode::FixedOverride { date, time } => (*date, *time),
            _ => (None, None),
        };

        let naive = NaiveDateTime::new(
            date.unwrap_or_else(|| local.date_naive()),
            time.unwrap_or_else(|| local.time()),
        );
        // Fixed offsets map local times one-to-one; the fallback arm is
        // unreachable.
        match naive.and_local_timezone(self.offset) {
            LocalResult::Single(t) => t,
            _ => local,
        }
    }

    /// Virtual minute-of-day offset contributed by the active mode.
    fn offset_minutes(&self) -> f64 {
        match &self.mode {
            ClockMode::RealTime | ClockMode::FixedOverride { .. } => 0.0,
            ClockMode::Scrubbing { offset_minutes, .. } => *offset_minutes,
            ClockMode::Animating {
                start_offset_minutes,
                elapsed_ms,
                duration_ms,
            } => {
                let progress = if *duration_ms == 0 {
                    1.0
                } else {
                    (*elapsed_ms as f64 / *duration_ms as f64).clamp(0.0, 1.0)
                };
                (start_offset_minutes + progress * MINUTES_PER_DAY).rem_euclid(MINUTES_PER_DAY)
            }
        }
    }
}

/// Parse an `HH:MM` or `HH:MM:SS` override string.
fn parse_time_override(s: &str) -> Result<NaiveTime, OverrideError> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| OverrideError::InvalidTime(s.to_string()))
}
