//! Game facade
//!
//! Owns the session state, the frame clock and the record store. Hosts feed
//! it `Command`s and frame timestamps, and read back events and scenes.

use crate::highscores::Records;
use crate::persistence::RecordStore;
use crate::platform::{FrameHandle, LoopDriver};
use crate::renderer::{Scene, build_scene};
use crate::settings::{Difficulty, ObstacleSkin, Preferences, SimSettings};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};

/// Requests from the UI layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Upward impulse (only while Running)
    Flap,
    /// Running <-> Paused; ignored in any other phase
    TogglePause,
    /// Start a fresh run, from the menu or after game over
    Restart,
    /// Stop the loop and park the session on the menu
    ReturnToMenu,
    ChangeSettings(SimSettings),
    ChangeDifficulty(Difficulty),
    Resize { width: f32, height: f32 },
    /// Zero the session and all-time bests
    ResetRecords,
    ToggleDebug,
    SetAutopilot(bool),
    SetObstacleSkin(ObstacleSkin),
    /// Audio sliders; out-of-range values are clamped into [0, 1]
    SetVolumes {
        master: f32,
        sfx: f32,
        music: f32,
        music_enabled: bool,
    },
}

pub struct Game {
    state: GameState,
    driver: LoopDriver,
    handle: Option<FrameHandle>,
    input: TickInput,
    store: Box<dyn RecordStore>,
    prefs: Preferences,
}

impl Game {
    pub fn new(viewport: Viewport, prefs: Preferences, store: Box<dyn RecordStore>, seed: u64) -> Self {
        let prefs = prefs.normalized();
        let mut state = GameState::new(viewport, prefs.difficulty.settings(), seed);
        state.records = Records::with_all_time_best(store.load_all_time_best());

        log::info!(
            "Game created ({} difficulty, seed {}, all-time best {})",
            prefs.difficulty.as_str(),
            seed,
            state.records.all_time_best
        );
        Self {
            state,
            driver: LoopDriver::new(),
            handle: None,
            input: TickInput::default(),
            store,
            prefs,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Whether the host should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// Handle one command at timestamp `now` (milliseconds)
    pub fn command(&mut self, command: Command, now: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match command {
            Command::Flap => {
                if self.state.phase == GamePhase::Running {
                    if let Some(avatar) = self.state.avatar.as_mut() {
                        if avatar.trigger_impulse() {
                            events.push(GameEvent::Flapped);
                        }
                    }
                }
            }
            Command::TogglePause => match self.state.phase {
                GamePhase::Running => {
                    self.state.pause();
                    self.stop_loop();
                    log::info!("Paused");
                    events.push(GameEvent::Paused);
                }
                GamePhase::Paused => {
                    self.state.resume();
                    self.handle = Some(self.driver.start(now));
                    log::info!("Resumed");
                    events.push(GameEvent::Resumed);
                }
                _ => {}
            },
            Command::Restart => {
                self.state.start_session(&mut events);
                self.handle = Some(self.driver.start(now));
            }
            Command::ReturnToMenu => {
                self.stop_loop();
                self.state.phase = GamePhase::Idle;
                log::info!("Returned to menu");
            }
            Command::ChangeSettings(settings) => self.state.apply_settings(settings),
            Command::ChangeDifficulty(difficulty) => {
                self.prefs.difficulty = difficulty;
                self.prefs.save();
                self.state.apply_settings(difficulty.settings());
            }
            Command::Resize { width, height } => self.state.resize(width, height),
            Command::ResetRecords => {
                self.state.records.clear();
                self.store.save_all_time_best(0);
                log::info!("Records reset");
                events.push(GameEvent::RecordsReset);
            }
            Command::ToggleDebug => {
                self.prefs.debug_overlay = !self.prefs.debug_overlay;
                self.prefs.save();
            }
            Command::SetAutopilot(enabled) => {
                self.input.autopilot = enabled;
                log::info!("Autopilot: {}", enabled);
            }
            Command::SetObstacleSkin(skin) => {
                self.prefs.obstacle_skin = skin;
                self.prefs.save();
            }
            Command::SetVolumes {
                master,
                sfx,
                music,
                music_enabled,
            } => {
                self.prefs.master_volume = master;
                self.prefs.sfx_volume = sfx;
                self.prefs.music_volume = music;
                self.prefs.music_enabled = music_enabled;
                self.prefs = self.prefs.clone().normalized();
                self.prefs.save();
            }
        }
        events
    }

    /// Advance one frame at timestamp `now`. Does nothing while the loop is
    /// stopped (menu, pause, game over).
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        let Some(handle) = self.handle else {
            return Vec::new();
        };
        let Some(frame) = self.driver.frame(handle, now) else {
            return Vec::new();
        };

        let events = tick(&mut self.state, &self.input, frame);

        for event in &events {
            if let GameEvent::GameOver {
                final_score,
                new_all_time_best,
                ..
            } = *event
            {
                self.stop_loop();
                if new_all_time_best {
                    self.store.save_all_time_best(final_score);
                }
            }
        }
        events
    }

    /// Drawable snapshot of the current state
    pub fn scene(&self) -> Scene {
        build_scene(&self.state, &self.prefs)
    }

    fn stop_loop(&mut self) {
        self.driver.stop();
        self.handle = None;
    }
}
