//! Headless frame driver
//!
//! Owns what the simulation deliberately does not: clamping real frame time,
//! the short grace period after a level ends, and moving through a list of
//! levels. A renderer calls `frame` once per animation tick and draws
//! `state()` afterwards.

use std::sync::Arc;

use crate::settings::Settings;
use crate::sim::{Legend, Level, LevelError, State, Status, TickInput};

/// Clamp a raw frame delta (seconds) into `[0, max_dt]`
#[inline]
pub fn clamp_dt(elapsed: f32, max_dt: f32) -> f32 {
    if elapsed.is_nan() {
        return 0.0;
    }
    elapsed.clamp(0.0, max_dt)
}

/// One attempt at one level
#[derive(Debug, Clone)]
pub struct LevelRun {
    state: State,
    /// Seconds of play left once the level has ended
    grace: f32,
    max_dt: f32,
}

impl LevelRun {
    pub fn new(level: Arc<Level>, settings: &Settings) -> Self {
        Self {
            state: State::start_with(level, settings.physics),
            grace: settings.end_grace,
            max_dt: settings.max_frame_dt,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Advance by one animation frame
    ///
    /// Returns the final status once the level has ended and the grace
    /// period has run out; `None` while the run should keep going.
    pub fn frame(&mut self, elapsed: f32, input: &TickInput) -> Option<Status> {
        let dt = clamp_dt(elapsed, self.max_dt);
        self.state = self.state.advance(dt, input);

        let status = self.state.status();
        if !status.is_over() {
            None
        } else if self.grace > 0.0 {
            self.grace -= dt;
            None
        } else {
            Some(status)
        }
    }
}

/// What happened during a campaign frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Current level still running
    Running,
    /// Level was won; the campaign moved on to the next one
    Advanced { level: usize },
    /// Level was lost; it starts over
    Restarted { level: usize, attempt: u32 },
    /// Every level has been won
    Complete,
}

/// An ordered list of levels played until each one is won
#[derive(Debug, Clone)]
pub struct Campaign {
    levels: Vec<Arc<Level>>,
    settings: Settings,
    current: usize,
    /// Attempts at the current level, starting at 1
    attempt: u32,
    run: Option<LevelRun>,
}

impl Campaign {
    pub fn new(levels: Vec<Level>, settings: Settings) -> Self {
        let levels: Vec<Arc<Level>> = levels.into_iter().map(Arc::new).collect();
        let run = levels
            .first()
            .map(|level| LevelRun::new(Arc::clone(level), &settings));
        Self {
            levels,
            settings,
            current: 0,
            attempt: 1,
            run,
        }
    }

    /// Parse every plan up front; any bad plan rejects the whole campaign
    pub fn from_plans<S: AsRef<str>>(
        plans: &[S],
        legend: &Legend,
        settings: Settings,
    ) -> Result<Self, LevelError> {
        let levels = plans
            .iter()
            .map(|plan| Level::parse(plan.as_ref(), legend, settings.seed))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(levels, settings))
    }

    /// Index of the level being played (equals the level count when complete)
    pub fn current_level(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_complete(&self) -> bool {
        self.run.is_none()
    }

    /// State to render, if a level is running
    pub fn state(&self) -> Option<&State> {
        self.run.as_ref().map(LevelRun::state)
    }

    pub fn frame(&mut self, elapsed: f32, input: &TickInput) -> Progress {
        let Some(run) = self.run.as_mut() else {
            return Progress::Complete;
        };
        let Some(status) = run.frame(elapsed, input) else {
            return Progress::Running;
        };

        match status {
            Status::Won => {
                let won = self.current;
                log::info!("Level {} won after {} attempt(s)", won + 1, self.attempt);
                self.current += 1;
                self.attempt = 1;
                self.run = self
                    .levels
                    .get(self.current)
                    .map(|level| LevelRun::new(Arc::clone(level), &self.settings));
                if self.run.is_none() {
                    log::info!("Campaign complete");
                    Progress::Complete
                } else {
                    Progress::Advanced { level: won }
                }
            }
            Status::Lost => {
                self.attempt += 1;
                log::info!(
                    "Level {} lost, starting attempt {}",
                    self.current + 1,
                    self.attempt
                );
                let level = Arc::clone(&self.levels[self.current]);
                self.run = Some(LevelRun::new(level, &self.settings));
                Progress::Restarted {
                    level: self.current,
                    attempt: self.attempt,
                }
            }
            // `LevelRun::frame` only reports finished runs
            Status::Playing => Progress::Running,
        }
    }
}
