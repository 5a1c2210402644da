//! Game state and core simulation types
//!
//! One `GameState` owns everything a session mutates. The loop driver, the
//! spawner, the collision sweeps and the lifecycle machine all borrow it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Collidable, Rect, Scrolling, Updatable};
use super::event::{DeathCause, GameEvent};
use super::spawner::Spawner;
use crate::consts::*;
use crate::highscores::Records;
use crate::settings::SimSettings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running (menu)
    Idle,
    /// Active gameplay
    Running,
    /// Gameplay frozen by the player
    Paused,
    /// Impact happened, avatar is falling to the ground
    Dying,
    /// Run ended
    GameOver,
}

/// Sprite selection for the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarPose {
    Idle,
    Ascending,
    /// Set when the death sequence starts; impulses are ignored from then on
    Crying,
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    /// Visual tilt in radians
    pub rotation: f32,
    pub pose: AvatarPose,
    /// Copied from settings so a difficulty change applies mid-flight
    pub gravity: f32,
}

impl Avatar {
    pub fn new(pos: Vec2, gravity: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(AVATAR_SIZE),
            velocity: 0.0,
            rotation: 0.0,
            pose: AvatarPose::Idle,
            gravity,
        }
    }

    pub fn is_dying(&self) -> bool {
        self.pose == AvatarPose::Crying
    }

    /// Kick upward. Returns false (and changes nothing) once dying.
    pub fn trigger_impulse(&mut self) -> bool {
        if self.is_dying() {
            return false;
        }
        self.velocity = FLAP_VELOCITY;
        self.pose = AvatarPose::Ascending;
        true
    }

    /// Switch to the tumbling death mode with a small upward bounce
    pub fn begin_dying(&mut self) {
        self.pose = AvatarPose::Crying;
        self.velocity = DEATH_BOUNCE_VELOCITY;
    }

    /// Rest the avatar on the ground line
    pub fn pin_to_ground(&mut self, ground_y: f32) {
        self.pos.y = ground_y - self.size.y;
        self.velocity = 0.0;
    }

    /// Back to the start position for a new run
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.velocity = 0.0;
        self.rotation = 0.0;
        self.pose = AvatarPose::Idle;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }
}

impl Updatable for Avatar {
    fn update(&mut self, dt: f32) {
        // Velocity first, then position
        self.velocity += self.gravity * dt;
        self.pos.y += self.velocity * dt;

        if self.is_dying() {
            self.rotation = (self.rotation + DEATH_SPIN_RATE * dt).min(MAX_DEATH_SPIN);
        } else {
            self.rotation =
                (self.velocity * TILT_PER_VELOCITY).clamp(-MAX_FLIGHT_TILT, MAX_FLIGHT_TILT);

            if self.velocity < ASCEND_POSE_VELOCITY {
                self.pose = AvatarPose::Ascending;
            } else if self.velocity > IDLE_POSE_VELOCITY {
                self.pose = AvatarPose::Idle;
            }
        }

        // Can't leave through the top of the screen
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
        }
    }
}

impl Collidable for Avatar {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A top/bottom column pair with a passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the top column (gap starts here)
    pub top_height: f32,
    pub gap: f32,
    pub width: f32,
    pub speed: f32,
    /// Ground line at spawn time (bottom column ends here)
    pub floor_y: f32,
    /// Set once when the avatar clears this obstacle
    pub scored: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, top_height: f32, gap: f32, speed: f32, floor_y: f32) -> Self {
        Self {
            id,
            x,
            top_height,
            gap,
            width: OBSTACLE_WIDTH,
            speed,
            floor_y,
            scored: false,
        }
    }

    /// Y where the bottom column begins
    pub fn gap_bottom(&self) -> f32 {
        self.top_height + self.gap
    }

    pub fn gap_center(&self) -> f32 {
        self.top_height + self.gap / 2.0
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self) -> Rect {
        let y = self.gap_bottom();
        Rect::new(self.x, y, self.width, (self.floor_y - y).max(0.0))
    }

    pub fn gap_rect(&self) -> Rect {
        Rect::new(self.x, self.top_height, self.width, self.gap)
    }
}

impl Updatable for Obstacle {
    fn update(&mut self, dt: f32) {
        self.x -= self.speed * dt;
    }
}

impl Collidable for Obstacle {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.floor_y)
    }
}

impl Scrolling for Obstacle {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Where a pickup came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupOrigin {
    /// Placed inside an obstacle's gap
    Embedded { obstacle_id: u32 },
    /// Free-floating on its own timer
    Sky,
}

/// A collectible bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub origin: PickupOrigin,
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub collected: bool,
    /// Cosmetic spin angle
    pub spin: f32,
}

impl Pickup {
    pub fn new(id: u32, origin: PickupOrigin, pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            id,
            origin,
            pos,
            radius,
            speed,
            collected: false,
            spin: 0.0,
        }
    }
}

impl Updatable for Pickup {
    fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
        self.spin += PICKUP_SPIN_RATE * dt;
    }
}

impl Collidable for Pickup {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

impl Scrolling for Pickup {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Looping background image offset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backdrop {
    /// Horizontal offset (0 to -wrap_width)
    pub offset: f32,
    pub speed: f32,
    pub wrap_width: f32,
}

impl Backdrop {
    pub fn new(speed: f32, wrap_width: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            wrap_width,
        }
    }
}

impl Updatable for Backdrop {
    fn update(&mut self, dt: f32) {
        self.offset -= self.speed * dt;
        if self.offset <= -self.wrap_width {
            self.offset = 0.0;
        }
    }
}

impl Scrolling for Backdrop {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Ground strip scroll and grass sway (cosmetic only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    /// Scroll offset in [0, wrap_width)
    pub offset: f32,
    pub speed: f32,
    pub wrap_width: f32,
    /// Advances every frame, drives the grass sway animation
    pub sway_clock: f32,
}

impl Ground {
    pub fn new(speed: f32, wrap_width: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            wrap_width,
            sway_clock: 0.0,
        }
    }
}

impl Updatable for Ground {
    fn update(&mut self, dt: f32) {
        self.offset += self.speed * dt;
        if self.offset >= self.wrap_width {
            self.offset -= self.wrap_width;
        }
        self.sway_clock += dt;
    }
}

impl Scrolling for Ground {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Screen dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ground_height: GROUND_HEIGHT,
        }
    }

    /// Y of the ground line
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Where the avatar starts a run
    pub fn avatar_start(&self) -> Vec2 {
        Vec2::new(self.width / 4.0, self.height / 2.0)
    }
}

/// Run-scoped score counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub overall: u64,
    /// Obstacles cleared
    pub obstacles: u64,
    /// Pickups collected (count, not points)
    pub pickups: u64,
}

impl Scores {
    pub fn recompute(&mut self) {
        self.overall = self.obstacles + self.pickups * PICKUP_VALUE;
    }
}

/// Bookkeeping for the Dying phase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeathClock {
    pub cause: Option<DeathCause>,
    /// Raw milliseconds since the death sequence began
    pub elapsed_ms: f32,
    /// Raw milliseconds since the avatar first settled on the ground
    pub grounded_ms: Option<f32>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub settings: SimSettings,
    /// Absent until the first session starts
    pub avatar: Option<Avatar>,
    /// Spawn order
    pub obstacles: Vec<Obstacle>,
    /// Spawn order
    pub pickups: Vec<Pickup>,
    pub backdrop: Backdrop,
    pub ground: Ground,
    pub scores: Scores,
    pub records: Records,
    pub spawner: Spawner,
    pub death: DeathClock,
    /// Frames simulated in the current run
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create an idle state; call `start_session` to play
    pub fn new(viewport: Viewport, settings: SimSettings, seed: u64) -> Self {
        let settings = settings.sanitized();
        Self {
            phase: GamePhase::Idle,
            viewport,
            settings,
            avatar: None,
            obstacles: Vec::new(),
            pickups: Vec::new(),
            backdrop: Backdrop::new(settings.parallax_speed(), viewport.width),
            ground: Ground::new(settings.parallax_speed(), viewport.width),
            scores: Scores::default(),
            records: Records::default(),
            spawner: Spawner::new(seed),
            death: DeathClock::default(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset run-scoped state and enter Running. All-time best is kept.
    pub fn start_session(&mut self, events: &mut Vec<GameEvent>) {
        self.obstacles.clear();
        self.pickups.clear();
        self.scores = Scores::default();
        self.spawner.reset();
        self.death = DeathClock::default();
        self.time_ticks = 0;
        self.backdrop.offset = 0.0;
        self.ground.offset = 0.0;

        let start = self.viewport.avatar_start();
        match self.avatar.as_mut() {
            Some(avatar) => {
                avatar.reset(start);
                avatar.gravity = self.settings.gravity;
            }
            None => self.avatar = Some(Avatar::new(start, self.settings.gravity)),
        }

        self.records.begin_run();
        self.phase = GamePhase::Running;

        log::info!(
            "Session started (session best {}, all-time best {})",
            self.records.session_best,
            self.records.all_time_best
        );
        events.push(GameEvent::SessionReset);
        events.push(self.score_event());
    }

    /// Apply new settings, retuning everything already on screen
    pub fn apply_settings(&mut self, settings: SimSettings) {
        let settings = settings.sanitized();
        self.settings = settings;

        if let Some(avatar) = self.avatar.as_mut() {
            avatar.gravity = settings.gravity;
        }
        for obstacle in &mut self.obstacles {
            obstacle.set_speed(settings.obstacle_speed);
        }
        for pickup in &mut self.pickups {
            pickup.set_speed(settings.obstacle_speed);
        }
        self.backdrop.set_speed(settings.parallax_speed());
        self.ground.set_speed(settings.parallax_speed());

        log::info!("Settings applied: {:?}", settings);
    }

    /// Track a new screen size
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring invalid viewport {}x{}", width, height);
            return;
        }
        self.viewport.width = width;
        self.viewport.height = height;
        self.backdrop.wrap_width = width;
        self.ground.wrap_width = width;
        if let Some(avatar) = self.avatar.as_mut() {
            avatar.pos.x = width / 4.0;
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        true
    }

    /// Recompute the aggregate after a counter changed and report it
    pub fn score_changed(&mut self, events: &mut Vec<GameEvent>) {
        self.scores.recompute();
        self.records.observe(self.scores.overall);
        events.push(self.score_event());
    }

    fn score_event(&self) -> GameEvent {
        GameEvent::ScoreChanged {
            overall: self.scores.overall,
            obstacles: self.scores.obstacles,
            pickups: self.scores.pickups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_avatar_free_fall_integration() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 300.0), 0.4);
        for _ in 0..10 {
            avatar.update(1.0);
        }
        assert!(approx(avatar.velocity, 4.0));
        assert!(approx(avatar.pos.y, 322.0));
    }

    #[test]
    fn test_avatar_top_clamp() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 2.0), 0.4);
        avatar.velocity = -6.0;
        avatar.update(1.0);
        assert_eq!(avatar.pos.y, 0.0);
        assert_eq!(avatar.velocity, 0.0);
    }

    #[test]
    fn test_flight_tilt_is_clamped() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 300.0), 0.0);
        avatar.velocity = 100.0;
        avatar.update(1.0);
        assert!(approx(avatar.rotation, MAX_FLIGHT_TILT));

        avatar.velocity = 5.0;
        avatar.update(1.0);
        assert!(approx(avatar.rotation, 0.2));
    }

    #[test]
    fn test_pose_hysteresis() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 300.0), 0.4);
        assert!(avatar.trigger_impulse());
        assert_eq!(avatar.pose, AvatarPose::Ascending);

        // Still ascending while velocity sits between the thresholds
        avatar.velocity = 0.0;
        avatar.update(1.0);
        assert_eq!(avatar.pose, AvatarPose::Ascending);

        avatar.velocity = 3.0;
        avatar.update(1.0);
        assert_eq!(avatar.pose, AvatarPose::Idle);
    }

    #[test]
    fn test_dying_spin_caps_at_half_turn() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 100.0), 0.4);
        avatar.begin_dying();
        avatar.update(1.0);
        assert!(approx(avatar.rotation, DEATH_SPIN_RATE));
        for _ in 0..100 {
            avatar.update(1.0);
        }
        assert_eq!(avatar.rotation, MAX_DEATH_SPIN);
        assert_eq!(avatar.pose, AvatarPose::Crying);
    }

    #[test]
    fn test_impulse_ignored_while_dying() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 300.0), 0.4);
        avatar.begin_dying();
        avatar.velocity = 2.5;
        assert!(!avatar.trigger_impulse());
        assert_eq!(avatar.velocity, 2.5);
    }

    #[test]
    fn test_obstacle_scrolls_to_left_edge() {
        let mut obstacle = Obstacle::new(1, 300.0, 100.0, 200.0, 3.0, 620.0);
        for _ in 0..100 {
            obstacle.update(1.0);
        }
        assert_eq!(obstacle.x, 0.0);
        assert!(!obstacle.is_off_screen());

        // Trailing edge exactly on the boundary still counts as on screen
        obstacle.x = -80.0;
        assert!(!obstacle.is_off_screen());
        obstacle.update(1.0);
        assert!(obstacle.is_off_screen());
    }

    #[test]
    fn test_obstacle_rects() {
        let obstacle = Obstacle::new(1, 50.0, 120.0, 200.0, 3.0, 620.0);
        assert_eq!(obstacle.top_rect(), Rect::new(50.0, 0.0, 80.0, 120.0));
        assert_eq!(obstacle.bottom_rect(), Rect::new(50.0, 320.0, 80.0, 300.0));
        assert_eq!(obstacle.gap_center(), 220.0);
    }

    #[test]
    fn test_pickup_motion_and_bounds() {
        let mut pickup = Pickup::new(1, PickupOrigin::Sky, Vec2::new(20.0, 50.0), 15.0, 3.0);
        pickup.update(2.0);
        assert_eq!(pickup.pos.x, 14.0);
        assert!(approx(pickup.spin, 0.1));
        assert!(!pickup.is_off_screen());

        pickup.pos.x = -15.5;
        assert!(pickup.is_off_screen());
    }

    #[test]
    fn test_backdrop_wraps_after_one_viewport() {
        let mut backdrop = Backdrop::new(10.0, 100.0);
        for _ in 0..9 {
            backdrop.update(1.0);
        }
        assert_eq!(backdrop.offset, -90.0);
        backdrop.update(1.0);
        assert_eq!(backdrop.offset, 0.0);
    }

    #[test]
    fn test_ground_wraps_and_sways() {
        let mut ground = Ground::new(30.0, 100.0);
        for _ in 0..4 {
            ground.update(1.0);
        }
        assert_eq!(ground.offset, 20.0);
        assert_eq!(ground.sway_clock, 4.0);
    }

    #[test]
    fn test_start_session_resets_run_but_keeps_all_time_best() {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), SimSettings::default(), 7);
        let mut events = Vec::new();
        state.records.all_time_best = 42;
        state.start_session(&mut events);

        state.scores.obstacles = 3;
        state.score_changed(&mut events);
        state.backdrop.offset = -50.0;
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, 10.0, 100.0, 200.0, 3.0, 500.0));
        if let Some(avatar) = state.avatar.as_mut() {
            avatar.pos.y = 10.0;
            avatar.begin_dying();
        }
        state.phase = GamePhase::Dying;

        events.clear();
        state.start_session(&mut events);

        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.scores, Scores::default());
        assert_eq!(state.backdrop.offset, 0.0);
        assert_eq!(state.records.all_time_best, 42);
        assert_eq!(state.records.session_best, 3);

        let avatar = state.avatar.as_ref().unwrap();
        assert_eq!(avatar.pos, Vec2::new(200.0, 300.0));
        assert_eq!(avatar.pose, AvatarPose::Idle);
        assert_eq!(events[0], GameEvent::SessionReset);
    }

    #[test]
    fn test_apply_settings_is_retroactive() {
        let mut state = GameState::new(Viewport::default(), SimSettings::default(), 7);
        state.start_session(&mut Vec::new());
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, 10.0, 100.0, 200.0, 3.0, 620.0));
        let id = state.next_entity_id();
        state.pickups.push(Pickup::new(
            id,
            PickupOrigin::Sky,
            Vec2::new(10.0, 10.0),
            15.0,
            3.0,
        ));

        state.apply_settings(crate::settings::Difficulty::Hard.settings());

        assert_eq!(state.obstacles[0].speed, 4.0);
        assert_eq!(state.pickups[0].speed, 4.0);
        assert!(approx(state.backdrop.speed, 4.0 / 3.0));
        assert!(approx(state.ground.speed, 4.0 / 3.0));
        assert_eq!(state.avatar.as_ref().unwrap().gravity, 0.5);
    }

    #[test]
    fn test_resize_moves_avatar() {
        let mut state = GameState::new(Viewport::default(), SimSettings::default(), 7);
        state.start_session(&mut Vec::new());
        state.resize(400.0, 900.0);
        assert_eq!(state.avatar.as_ref().unwrap().pos.x, 100.0);
        assert_eq!(state.viewport.ground_y(), 800.0);
        assert_eq!(state.backdrop.wrap_width, 400.0);

        state.resize(-1.0, 900.0);
        assert_eq!(state.viewport.width, 400.0);
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut state = GameState::new(Viewport::default(), SimSettings::default(), 7);
        assert!(!state.pause());
        state.start_session(&mut Vec::new());
        assert!(state.pause());
        assert!(!state.pause());
        assert!(state.resume());
        state.phase = GamePhase::Dying;
        assert!(!state.pause());
    }
}
