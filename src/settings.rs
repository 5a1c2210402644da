//! Game settings and preferences
//!
//! `SimSettings` is the small struct the simulation consumes. `Preferences`
//! holds the player-facing choices and is persisted separately from records.

use serde::{Deserialize, Serialize};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Physics and pacing for this preset
    pub fn settings(&self) -> SimSettings {
        match self {
            Difficulty::Easy => SimSettings {
                gravity: 0.3,
                obstacle_speed: 2.0,
                gap_size: 250.0,
                spawn_interval_ms: 2000.0,
            },
            Difficulty::Normal => SimSettings {
                gravity: 0.4,
                obstacle_speed: 3.0,
                gap_size: 200.0,
                spawn_interval_ms: 1500.0,
            },
            Difficulty::Hard => SimSettings {
                gravity: 0.5,
                obstacle_speed: 4.0,
                gap_size: 180.0,
                spawn_interval_ms: 1000.0,
            },
        }
    }
}

/// Settings consumed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimSettings {
    /// Downward acceleration per nominal frame
    #[serde(default = "defaults::gravity")]
    pub gravity: f32,
    /// Horizontal obstacle/pickup speed per nominal frame
    #[serde(default = "defaults::obstacle_speed")]
    pub obstacle_speed: f32,
    /// Vertical size of the passable gap
    #[serde(default = "defaults::gap_size")]
    pub gap_size: f32,
    /// Raw milliseconds between obstacle spawns
    #[serde(default = "defaults::spawn_interval_ms")]
    pub spawn_interval_ms: f32,
}

mod defaults {
    use super::Difficulty;

    pub fn gravity() -> f32 {
        Difficulty::Normal.settings().gravity
    }
    pub fn obstacle_speed() -> f32 {
        Difficulty::Normal.settings().obstacle_speed
    }
    pub fn gap_size() -> f32 {
        Difficulty::Normal.settings().gap_size
    }
    pub fn spawn_interval_ms() -> f32 {
        Difficulty::Normal.settings().spawn_interval_ms
    }
}

impl Default for SimSettings {
    fn default() -> Self {
        Difficulty::Normal.settings()
    }
}

impl SimSettings {
    const GRAVITY_RANGE: (f32, f32) = (0.0, 5.0);
    const SPEED_RANGE: (f32, f32) = (0.0, 50.0);
    const GAP_RANGE: (f32, f32) = (60.0, 600.0);
    const INTERVAL_RANGE: (f32, f32) = (200.0, 10_000.0);

    /// Replace every non-finite or out-of-range field with the Normal value.
    /// Gravity and speed have exclusive lower bounds.
    pub fn sanitized(self) -> Self {
        let normal = Difficulty::Normal.settings();
        let sanitized = Self {
            gravity: pick(self.gravity, normal.gravity, Self::GRAVITY_RANGE, false),
            obstacle_speed: pick(
                self.obstacle_speed,
                normal.obstacle_speed,
                Self::SPEED_RANGE,
                false,
            ),
            gap_size: pick(self.gap_size, normal.gap_size, Self::GAP_RANGE, true),
            spawn_interval_ms: pick(
                self.spawn_interval_ms,
                normal.spawn_interval_ms,
                Self::INTERVAL_RANGE,
                true,
            ),
        };
        if sanitized != self {
            log::warn!("Settings {:?} out of range, using {:?}", self, sanitized);
        }
        sanitized
    }

    /// Backdrop/ground scroll speed
    pub fn parallax_speed(&self) -> f32 {
        self.obstacle_speed / crate::consts::PARALLAX_DIVISOR
    }
}

fn pick(value: f32, fallback: f32, (lo, hi): (f32, f32), inclusive_lo: bool) -> f32 {
    let above_lo = if inclusive_lo { value >= lo } else { value > lo };
    if value.is_finite() && above_lo && value <= hi {
        value
    } else {
        fallback
    }
}

/// Obstacle colour themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ObstacleSkin {
    #[default]
    Green,
    Red,
    Blue,
}

impl ObstacleSkin {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "green" => Some(ObstacleSkin::Green),
            "red" => Some(ObstacleSkin::Red),
            "blue" => Some(ObstacleSkin::Blue),
            _ => None,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub difficulty: Difficulty,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub music_enabled: bool,

    // === Visuals ===
    pub obstacle_skin: ObstacleSkin,
    /// Draw hitboxes and the ground line
    pub debug_overlay: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            master_volume: 1.0,
            sfx_volume: 0.7,
            music_volume: 0.3,
            music_enabled: true,

            obstacle_skin: ObstacleSkin::Green,
            debug_overlay: false,
        }
    }
}

impl Preferences {
    /// Clamp volumes into range (NaN becomes silent)
    pub fn normalized(mut self) -> Self {
        for v in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.music_volume,
        ] {
            *v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        }
        self
    }

    /// Sound effect volume after the master slider
    pub fn effective_sfx_volume(&self) -> f32 {
        self.sfx_volume * self.master_volume
    }

    /// Music volume after the master slider (0 when music is off)
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_enabled {
            self.music_volume * self.master_volume
        } else {
            0.0
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flippy_bird_preferences";

    /// Load preferences from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Preferences>(&json) {
                    Ok(prefs) => {
                        log::info!("Loaded preferences from LocalStorage");
                        return prefs.normalized();
                    }
                    Err(e) => log::warn!("Ignoring unreadable preferences: {}", e),
                }
            }
        }

        log::info!("Using default preferences");
        Self::default()
    }

    /// Save preferences to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Preferences saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
