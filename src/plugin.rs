//! Bevy integration.
//!
//! [`SimulationPlugin`] inserts a [`SimulationState`] resource and steps the
//! simulation once per `Update` using the app's elapsed [`Time`]. The host
//! writes the frame's input into [`SimulationState::input`] and drains
//! [`SimulationState::queue`] to update its scene. When the restart delay
//! elapses the simulation is rebuilt from the same configuration and a fresh
//! scene is announced.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::info;

use crate::config::WorldConfig;
use crate::game_over::Outcome;
use crate::input::FrameInput;
use crate::presentation::PresentationQueue;
use crate::simulation::{FrameStatus, Simulation};
use crate::Millis;

/// Event raised on the frame a run ends.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunEnded {
    /// How it ended.
    pub outcome: Outcome,
    /// Elapsed app time at the end, in milliseconds.
    pub at: Millis,
}

/// Resource holding the live run and its I/O buffers.
#[derive(Resource, Debug)]
pub struct SimulationState {
    /// The current run.
    pub simulation: Simulation,
    /// Configuration used to build every run.
    pub config: WorldConfig,
    /// Input for the next frame. Events are cleared after each step.
    pub input: FrameInput,
    /// Presentation calls waiting for the host.
    pub queue: PresentationQueue,
    /// Status reported by the last step.
    pub status: FrameStatus,
    /// Runs started so far, including the current one.
    pub runs: u32,
    /// World seed of the current run.
    pub seed: u64,
}

impl SimulationState {
    /// Builds the first run from `config.seed` and queues its initial scene.
    #[must_use]
    pub fn new(config: WorldConfig, now: Millis) -> Self {
        let seed = config.seed;
        let simulation = Simulation::new(&config, now);
        let mut queue = PresentationQueue::default();
        simulation.populate_scene(&mut queue);
        info!("run 1 started with seed {seed}");
        Self {
            simulation,
            config,
            input: FrameInput::default(),
            queue,
            status: FrameStatus::Running,
            runs: 1,
            seed,
        }
    }

    /// Clears the current run from the scene and starts another at `now`.
    ///
    /// Run `n` uses `config.seed + (n - 1)`, so every run gets a fresh world
    /// and any run can be replayed from its logged seed.
    pub fn restart(&mut self, now: Millis) {
        self.simulation.clear_scene(&mut self.queue);
        self.seed = self.config.seed.wrapping_add(u64::from(self.runs));
        self.runs += 1;
        let config = WorldConfig {
            seed: self.seed,
            ..self.config.clone()
        };
        self.simulation = Simulation::new(&config, now);
        self.simulation.populate_scene(&mut self.queue);
        self.status = FrameStatus::Running;
        info!("run {} started with seed {}", self.runs, self.seed);
    }
}

/// Installs the simulation into a Bevy app.
#[derive(Debug, Clone, Default)]
pub struct SimulationPlugin {
    /// World configuration for every run.
    pub config: WorldConfig,
}

impl SimulationPlugin {
    /// Plugin building worlds from `config`.
    #[must_use]
    pub const fn new(config: WorldConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationState::new(self.config.clone(), 0));
        app.add_observer(log_run_ended);
        app.add_systems(Update, step_simulation_system);
    }
}

fn elapsed_millis(time: &Time) -> Millis {
    Millis::try_from(time.elapsed().as_millis()).unwrap_or(Millis::MAX)
}

/// Advances the simulation by one frame.
pub fn step_simulation_system(
    time: Res<Time>,
    mut state: ResMut<SimulationState>,
    mut commands: Commands,
) {
    let now = elapsed_millis(&time);
    let run = &mut *state;
    let previous = run.status;
    let status = run.simulation.step(now, &run.input, &mut run.queue);
    run.input.events.clear();
    run.status = status;

    match status {
        FrameStatus::Over(outcome) if !matches!(previous, FrameStatus::Over(_)) => {
            commands.trigger(RunEnded { outcome, at: now });
        }
        FrameStatus::RestartDue => run.restart(now),
        FrameStatus::Running | FrameStatus::Over(_) => {}
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_run_ended(event: On<RunEnded>) {
    let RunEnded { outcome, at } = *event.event();
    info!("run ended at {at} ms: {}", outcome.message());
}
