//! Browser bindings
//!
//! The host page owns the canvas and the requestAnimationFrame loop. It
//! forwards input as commands, calls `frame` with the rAF timestamp while
//! `is_running` is true, and draws from `scene_json` / `instance_data`.
//! Events come back as JSON arrays tagged by `type`.

use wasm_bindgen::prelude::*;

use crate::game::{Command, Game};
use crate::platform::LocalStore;
use crate::renderer::instance_bytes;
use crate::settings::{Difficulty, ObstacleSkin, Preferences};
use crate::sim::{GameEvent, Viewport};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Flippy Bird starting...");
}

fn to_json(events: &[GameEvent]) -> String {
    serde_json::to_string(events).unwrap_or_else(|e| {
        log::warn!("Failed to encode events: {}", e);
        "[]".to_string()
    })
}

fn seed_from_time() -> u64 {
    (js_sys::Date::now() as u64) ^ ((js_sys::Math::random() * u32::MAX as f64) as u64)
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let seed = seed_from_time();
        let game = Game::new(
            Viewport::new(width, height),
            Preferences::load(),
            Box::new(LocalStore),
            seed,
        );
        WebGame { game }
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    /// Advance one frame at the rAF timestamp
    pub fn frame(&mut self, now: f64) -> String {
        to_json(&self.game.frame(now))
    }

    pub fn flap(&mut self, now: f64) -> String {
        self.send(Command::Flap, now)
    }

    pub fn toggle_pause(&mut self, now: f64) -> String {
        self.send(Command::TogglePause, now)
    }

    pub fn restart(&mut self, now: f64) -> String {
        self.send(Command::Restart, now)
    }

    pub fn return_to_menu(&mut self, now: f64) -> String {
        self.send(Command::ReturnToMenu, now)
    }

    /// Unknown names fall back to normal
    pub fn set_difficulty(&mut self, name: &str, now: f64) -> String {
        let difficulty = Difficulty::from_str(name).unwrap_or_default();
        self.send(Command::ChangeDifficulty(difficulty), now)
    }

    pub fn resize(&mut self, width: f32, height: f32, now: f64) -> String {
        self.send(Command::Resize { width, height }, now)
    }

    pub fn reset_records(&mut self, now: f64) -> String {
        self.send(Command::ResetRecords, now)
    }

    pub fn toggle_debug(&mut self, now: f64) -> String {
        self.send(Command::ToggleDebug, now)
    }

    pub fn set_autopilot(&mut self, enabled: bool, now: f64) -> String {
        self.send(Command::SetAutopilot(enabled), now)
    }

    /// Unknown names keep the current skin
    pub fn set_obstacle_skin(&mut self, name: &str, now: f64) -> String {
        match ObstacleSkin::from_str(name) {
            Some(skin) => self.send(Command::SetObstacleSkin(skin), now),
            None => {
                log::warn!("Unknown obstacle skin '{}'", name);
                "[]".to_string()
            }
        }
    }

    pub fn set_volumes(
        &mut self,
        master: f32,
        sfx: f32,
        music: f32,
        music_enabled: bool,
        now: f64,
    ) -> String {
        self.send(
            Command::SetVolumes {
                master,
                sfx,
                music,
                music_enabled,
            },
            now,
        )
    }

    /// Gain for sound effects after the master slider
    pub fn sfx_volume(&self) -> f32 {
        self.game.preferences().effective_sfx_volume()
    }

    /// Gain for music after the master slider (0 when music is off)
    pub fn music_volume(&self) -> f32 {
        self.game.preferences().effective_music_volume()
    }

    /// Full scene snapshot (items, HUD, debug overlay) as JSON
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&self.game.scene()).unwrap_or_else(|e| {
            log::warn!("Failed to encode scene: {}", e);
            "{}".to_string()
        })
    }

    /// Packed sprite instances for a GPU instance buffer
    pub fn instance_data(&self) -> Vec<u8> {
        instance_bytes(&self.game.scene().instances()).to_vec()
    }
}

impl WebGame {
    fn send(&mut self, command: Command, now: f64) -> String {
        to_json(&self.game.command(command, now))
    }
}
