/// Loop driver: owns the run state and the world, and turns one host
/// callback into one simulated and rendered frame.

use log::info;

use crate::compute::{self, TickOutcome};
use crate::config::GameConfig;
use crate::entities::{Intents, World};
use crate::render::{self, Surface};
use crate::status::RunState;

/// Whether the host should call `Game::frame` again on its next refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    Next,
    Stop,
}

pub struct Game {
    config: GameConfig,
    state: RunState,
    /// `None` until the first start.
    world: Option<World>,
    last_tick: Option<TickOutcome>,
}

impl Game {
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(config: GameConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid game config: {err}");
        }
        Self { config, state: RunState::NotRunning, world: None, last_tick: None }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Outcome of the most recent simulated frame.
    pub fn last_tick(&self) -> Option<&TickOutcome> {
        self.last_tick.as_ref()
    }

    /// Start, or start over: a brand-new world and a running state.  Works
    /// from every state.
    pub fn restart(&mut self) {
        let was = self.state;
        self.world = Some(World::new(&self.config));
        self.last_tick = None;
        self.state = RunState::Running;
        info!("run started (previous state: {was:?})");
    }

    /// Run one frame.  Does nothing at all unless the game is running.
    ///
    /// Entities are drawn every simulated frame; the frame that ends the run
    /// also gets the banner and asks the host to stop scheduling.
    pub fn frame<S: Surface>(
        &mut self,
        intents: Intents,
        now_ms: u64,
        surface: &mut S,
    ) -> Result<Schedule, S::Error> {
        if self.state != RunState::Running {
            return Ok(Schedule::Stop);
        }
        let Some(world) = self.world.as_ref() else {
            return Ok(Schedule::Stop);
        };

        surface.clear()?;
        let (next, outcome) = compute::tick(world, &intents, now_ms);
        self.state = self.state.after_frame(&outcome.resolution);
        self.last_tick = Some(outcome);
        let world = self.world.insert(next);

        render::draw_world(surface, world)?;
        match self.state.banner() {
            Some(text) => {
                info!("run ended after {} frames: {:?}", world.frame, self.state);
                render::draw_banner(surface, world, text)?;
                Ok(Schedule::Stop)
            }
            None => Ok(Schedule::Next),
        }
    }
}
