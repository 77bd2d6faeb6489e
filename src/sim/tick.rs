//! Simulation driver
//!
//! Advances the game once per frame in a fixed order: clock, queued input,
//! avatar physics, obstacles, collision, terminal transition.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::avatar::Avatar;
use super::clock::{Clock, Ticker};
use super::collision::{Hit, hit_kind};
use super::obstacles::Obstacle;
use super::scenery::Scenery;
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::{ConfigError, GameConfig};
use crate::consts::{BOB_AMPLITUDE, BOB_FREQUENCY, CLOUD_COUNT, STAR_COUNT};
use crate::persistence::{KeyValueStore, load_best, save_best};

/// Read-only view handed to the renderer after each tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub avatar: &'a Avatar,
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub best_score: u32,
    /// Time spent in the current run
    pub elapsed_ms: f32,
    pub scenery: &'a Scenery,
    pub events: &'a [GameEvent],
}

/// Owns all simulation state and drives it frame by frame
pub struct Simulation<S: KeyValueStore> {
    config: GameConfig,
    state: GameState,
    ticker: Ticker,
    rng: Pcg32,
    store: S,
    flap_queued: bool,
}

impl<S: KeyValueStore> Simulation<S> {
    /// Validate the configuration and build the title-screen state.
    ///
    /// `seed` drives gap placement and scenery; equal seeds and inputs
    /// replay identically.
    pub fn new(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let scenery = Scenery::generate(&config, STAR_COUNT, CLOUD_COUNT, &mut rng);
        let best = load_best(&store);
        log::info!("Simulation ready (seed {}, best {})", seed, best);
        Ok(Self {
            state: GameState::new(&config, best, scenery),
            ticker: Ticker::new(config.max_dt_ms),
            config,
            rng,
            store,
            flap_queued: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Queue a flap for the next tick. Repeated calls between ticks collapse into one.
    pub fn flap(&mut self) {
        self.flap_queued = true;
    }

    /// Back to the title screen; best score is kept
    pub fn reset(&mut self) {
        self.state.reset_run(&self.config);
        self.state.phase = GamePhase::Start;
        self.state.events.clear();
        self.flap_queued = false;
        self.ticker.reset();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.state.phase,
            avatar: &self.state.avatar,
            obstacles: self.state.field.obstacles(),
            score: self.state.score,
            best_score: self.state.best_score,
            elapsed_ms: self.state.run_time_ms,
            scenery: &self.state.scenery,
            events: &self.state.events,
        }
    }

    /// Advance one frame using the clock's current reading
    pub fn tick_with<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.tick(clock.now_ms());
    }

    /// Advance one frame ending at `timestamp_ms`
    pub fn tick(&mut self, timestamp_ms: f64) {
        let dt_ms = self.ticker.advance(timestamp_ms);
        self.state.events.clear();
        self.state.clock_ms += f64::from(dt_ms);
        self.state.frame_ms = timestamp_ms;

        let transitioned = self.apply_queued_flap();

        match self.state.phase {
            GamePhase::Start => {
                self.state.avatar.bob(
                    self.config.avatar_start_y,
                    self.state.clock_ms,
                    BOB_AMPLITUDE,
                    BOB_FREQUENCY,
                );
                self.drift_scenery(dt_ms);
            }
            GamePhase::Playing => {
                self.state.run_time_ms += dt_ms;
                self.state.avatar.integrate(
                    self.config.gravity,
                    self.config.max_fall_velocity,
                    dt_ms,
                    &self.config,
                );
                self.update_obstacles(dt_ms);
                self.drift_scenery(dt_ms);

                // At most one phase change per tick; a collision on a start/restart
                // tick is picked up on the next one.
                if !transitioned {
                    let hit = hit_kind(
                        self.state.avatar.center(),
                        self.config.avatar_radius,
                        self.state.field.obstacles(),
                        self.config.ground_y,
                        self.config.ceiling_y,
                    );
                    if let Some(hit) = hit {
                        self.end_run(hit);
                    }
                }
            }
            GamePhase::Dead => {}
        }
    }

    /// Consume the queued flap. Returns true if it changed the phase.
    fn apply_queued_flap(&mut self) -> bool {
        if !std::mem::take(&mut self.flap_queued) {
            return false;
        }
        let config = &self.config;
        let state = &mut self.state;
        match state.phase {
            GamePhase::Start => {
                state.field.rearm(state.clock_ms, config);
                state.run_time_ms = 0.0;
                state.phase = GamePhase::Playing;
                state.avatar.flap(config.jump_velocity, config.tilt_up_limit);
                state.events.push(GameEvent::Started);
                log::info!("Run started");
                true
            }
            GamePhase::Playing => {
                state.avatar.flap(config.jump_velocity, config.tilt_up_limit);
                state.events.push(GameEvent::Flapped);
                false
            }
            GamePhase::Dead => {
                if !state.restart_ready(config.restart_debounce_ms) {
                    log::debug!("Restart flap ignored (debounce)");
                    return false;
                }
                state.reset_run(config);
                state.phase = GamePhase::Playing;
                state.avatar.flap(config.jump_velocity, config.tilt_up_limit);
                state.events.push(GameEvent::Restarted);
                log::info!("Run restarted");
                true
            }
        }
    }

    /// Spawn, move, score, retire
    fn update_obstacles(&mut self, dt_ms: f32) {
        let config = &self.config;
        let state = &mut self.state;
        state.field.maybe_spawn(state.clock_ms, config, &mut self.rng);
        state
            .field
            .advance(config.obstacle_speed, dt_ms, config.retire_margin);
        let cleared = state.field.score_check(state.avatar.x);
        for _ in 0..cleared {
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
        }
    }

    fn drift_scenery(&mut self, dt_ms: f32) {
        self.state
            .scenery
            .drift(self.config.obstacle_speed, dt_ms, self.config.world_width);
    }

    /// PLAYING → DEAD: freeze the avatar and persist a new best
    fn end_run(&mut self, hit: Hit) {
        let state = &mut self.state;
        state.avatar.kill();
        state.phase = GamePhase::Dead;
        state.died_at_ms = state.frame_ms;

        let new_best = state.score > state.best_score;
        if new_best {
            state.best_score = state.score;
            save_best(&mut self.store, state.best_score);
        }
        state.events.push(GameEvent::Died {
            score: state.score,
            new_best,
            hit,
        });
        log::info!(
            "Run over: score {} (best {}), hit {:?}",
            state.score,
            state.best_score,
            hit
        );
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
