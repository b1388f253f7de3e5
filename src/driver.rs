//! Tick-driven simulation loop.
//!
//! The driver owns the [`SkyClock`] inside a tokio task that sleeps for the
//! mode-appropriate interval, advances the clock by the measured wall-clock
//! elapsed time, recomputes a [`SkySnapshot`] and publishes it through a
//! watch channel. Commands (override, scrub, animate) reach the task over an
//! unbounded channel so the clock has a single owner and no locks.
//!
//! Resource safety: dropping the driver aborts the task. No tick can fire
//! after teardown regardless of which mode was active.

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::clock::SkyClock;
use crate::config::Config;
use crate::scene::SkySnapshot;

/// Control messages applied between ticks.
#[derive(Debug)]
pub enum ClockCommand {
    /// Install a fixed override from boundary strings; both `None` returns
    /// the clock to real time.
    SetOverride {
        date: Option<String>,
        time: Option<String>,
    },
    /// Begin scrubbing; `None` uses the configured default speed.
    StartScrubbing {
        minutes_per_second: Option<f64>,
    },
    StopScrubbing,
    StartAnimation,
}

/// Handle to the running simulation.
///
/// Snapshots arrive on the watch receiver; the newest value wins and slow
/// consumers simply skip intermediate frames. The task is aborted on drop.
pub struct SimulationDriver {
    handle: JoinHandle<()>,
    snapshots: watch::Receiver<SkySnapshot>,
    commands: mpsc::UnboundedSender<ClockCommand>,
}

impl SimulationDriver {
    /// Spawn the tick loop on the current tokio runtime.
    pub fn spawn(config: Config) -> SimulationDriver {
        let clock = SkyClock::new(config.observer.offset(), &config.clock);
        let initial = SkySnapshot::compute(clock.now(), &config);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(run_loop(clock, config, snapshot_tx, command_rx));

        SimulationDriver {
            handle,
            snapshots: snapshot_rx,
            commands: command_tx,
        }
    }

    /// Receiver for the latest snapshot; clone freely for extra consumers.
    pub fn snapshots(&self) -> watch::Receiver<SkySnapshot> {
        self.snapshots.clone()
    }

    /// Queue a command for the next loop iteration. Errors only after the
    /// task has stopped, at which point there is nothing left to control.
    pub fn send(&self, command: ClockCommand) {
        let _ = self.commands.send(command);
    }

    pub fn animate(&self) {
        self.send(ClockCommand::StartAnimation);
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        // Scoped cancellation: the tick task never outlives its driver.
        self.handle.abort();
    }
}

async fn run_loop(
    mut clock: SkyClock,
    config: Config,
    snapshots: watch::Sender<SkySnapshot>,
    mut commands: mpsc::UnboundedReceiver<ClockCommand>,
) {
    let mut last_tick = std::time::Instant::now();

    loop {
        tokio::select! {
            command = commands.recv() => {
                match command {
                    Some(cmd) => apply_command(&mut clock, &config, cmd),
                    // All senders gone: nobody can observe us anymore.
                    None => return,
                }
            }
            _ = tokio::time::sleep(clock.tick_interval()) => {
                let now = std::time::Instant::now();
                clock.tick(now.duration_since(last_tick));
                last_tick = now;
            }
        }

        let snapshot = SkySnapshot::compute(clock.instant_at(Utc::now()), &config);
        if snapshots.send(snapshot).is_err() {
            // Every receiver dropped; stop recomputing.
            return;
        }
    }
}

fn apply_command(clock: &mut SkyClock, config: &Config, command: ClockCommand) {
    match command {
        ClockCommand::SetOverride { date, time } => {
            if let Err(e) = clock.set_override(date.as_deref(), time.as_deref()) {
                // Reject the override, keep the current mode, surface a
                // warning; the simulation keeps running.
                eprintln!("Warning: {e}");
            }
        }
        ClockCommand::StartScrubbing { minutes_per_second } => clock.start_scrubbing(
            minutes_per_second.unwrap_or(config.clock.scrub_minutes_per_second),
        ),
        ClockCommand::StopScrubbing => clock.stop_scrubbing(),
        ClockCommand::StartAnimation => clock.start_animation(),
    }
}
