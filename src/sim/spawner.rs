//! Obstacle and pickup spawning
//!
//! Two accumulators measured in raw elapsed milliseconds (not dt-scaled):
//! one for obstacles at the configured interval, one for free-floating
//! pickups every `SKY_PICKUP_INTERVAL_MS`. Every obstacle carries exactly one
//! embedded pickup.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameState, Obstacle, Pickup, PickupOrigin};
use crate::consts::*;

/// Spawn timers and the seeded RNG that places new entities
#[derive(Debug, Clone)]
pub struct Spawner {
    pub obstacle_timer_ms: f32,
    pub pickup_timer_ms: f32,
    seed: u64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacle_timer_ms: 0.0,
            pickup_timer_ms: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Zero both accumulators (RNG keeps its stream)
    pub fn reset(&mut self) {
        self.obstacle_timer_ms = 0.0;
        self.pickup_timer_ms = 0.0;
    }

    /// Uniform in [lo, hi); degenerate ranges collapse to `lo`
    pub fn roll(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }
}

/// Advance both timers by `elapsed_ms` and spawn whatever came due
pub fn advance(state: &mut GameState, elapsed_ms: f32) {
    state.spawner.obstacle_timer_ms += elapsed_ms;
    if state.spawner.obstacle_timer_ms >= state.settings.spawn_interval_ms {
        spawn_obstacle(state);
    }

    state.spawner.pickup_timer_ms += elapsed_ms;
    if state.spawner.pickup_timer_ms >= SKY_PICKUP_INTERVAL_MS {
        spawn_sky_pickup(state);
    }
}

/// Place a new obstacle at the right edge with its embedded pickup
pub fn spawn_obstacle(state: &mut GameState) {
    let viewport = state.viewport;
    let gap = state.settings.gap_size;
    let max_height = viewport.height - gap - MIN_OBSTACLE_HEIGHT - viewport.ground_height;
    let top_height = state.spawner.roll(MIN_OBSTACLE_HEIGHT, max_height);

    let id = state.next_entity_id();
    let obstacle = Obstacle::new(
        id,
        viewport.width,
        top_height,
        gap,
        state.settings.obstacle_speed,
        viewport.ground_y(),
    );

    // Embedded pickup: horizontal center, within +/-25% of the gap around its middle
    let jitter = gap * PICKUP_GAP_JITTER;
    let offset = state.spawner.roll(-jitter, jitter);
    let pickup_pos = Vec2::new(
        obstacle.x + obstacle.width / 2.0,
        obstacle.gap_center() + offset,
    );
    let pickup_id = state.next_entity_id();
    let pickup = Pickup::new(
        pickup_id,
        PickupOrigin::Embedded { obstacle_id: id },
        pickup_pos,
        PICKUP_RADIUS,
        state.settings.obstacle_speed,
    );

    log::debug!(
        "Spawned obstacle {} (top {:.0}, gap {:.0}) with pickup {}",
        id,
        top_height,
        gap,
        pickup_id
    );
    state.obstacles.push(obstacle);
    state.pickups.push(pickup);
    state.spawner.obstacle_timer_ms = 0.0;
}

/// Place a free-floating pickup at the right edge unless the cap is reached.
/// The timer is only reset by an actual spawn, so a capped spawn retries
/// on the next frame.
pub fn spawn_sky_pickup(state: &mut GameState) -> bool {
    if state.pickups.len() >= MAX_LIVE_PICKUPS {
        return false;
    }

    let max_y = state.viewport.ground_y() - SKY_PICKUP_GROUND_CLEARANCE;
    let y = state.spawner.roll(SKY_PICKUP_MIN_Y, max_y);
    let id = state.next_entity_id();
    state.pickups.push(Pickup::new(
        id,
        PickupOrigin::Sky,
        Vec2::new(state.viewport.width, y),
        SKY_PICKUP_RADIUS,
        state.settings.obstacle_speed,
    ));
    state.spawner.pickup_timer_ms = 0.0;

    log::debug!("Spawned sky pickup {} at y {:.0}", id, y);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimSettings;
    use crate::sim::state::Viewport;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), SimSettings::default(), seed);
        state.start_session(&mut Vec::new());
        state
    }

    #[test]
    fn test_seed_survives_session_restart() {
        let mut state = running_state(0xF1A9);
        spawn_obstacle(&mut state);
        state.start_session(&mut Vec::new());
        assert_eq!(state.spawner.seed(), 0xF1A9);
    }

    #[test]
    fn test_obstacle_waits_for_interval() {
        let mut state = running_state(1);
        advance(&mut state, 1499.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawner.obstacle_timer_ms, 1499.0);

        advance(&mut state, 1.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawner.obstacle_timer_ms, 0.0);
    }

    #[test]
    fn test_every_obstacle_gets_one_embedded_pickup() {
        let mut state = running_state(2);
        for _ in 0..5 {
            spawn_obstacle(&mut state);
        }
        assert_eq!(state.obstacles.len(), 5);
        assert_eq!(state.pickups.len(), 5);

        for (obstacle, pickup) in state.obstacles.iter().zip(&state.pickups) {
            assert_eq!(
                pickup.origin,
                PickupOrigin::Embedded {
                    obstacle_id: obstacle.id
                }
            );
            assert_eq!(pickup.pos.x, obstacle.x + obstacle.width / 2.0);
            let jitter = obstacle.gap * PICKUP_GAP_JITTER;
            assert!((pickup.pos.y - obstacle.gap_center()).abs() <= jitter);
            assert_eq!(pickup.radius, PICKUP_RADIUS);
        }
    }

    #[test]
    fn test_gap_fits_between_margins() {
        let mut state = running_state(3);
        for _ in 0..200 {
            spawn_obstacle(&mut state);
        }
        let ground_y = state.viewport.ground_y();
        for obstacle in &state.obstacles {
            assert!(obstacle.top_height >= MIN_OBSTACLE_HEIGHT);
            assert!(obstacle.gap_bottom() <= ground_y - MIN_OBSTACLE_HEIGHT);
            assert_eq!(obstacle.x, 800.0);
            assert_eq!(obstacle.speed, 3.0);
        }
    }

    #[test]
    fn test_tiny_viewport_pins_gap_to_minimum() {
        let mut state = GameState::new(Viewport::new(300.0, 320.0), SimSettings::default(), 4);
        spawn_obstacle(&mut state);
        assert_eq!(state.obstacles[0].top_height, MIN_OBSTACLE_HEIGHT);
    }

    #[test]
    fn test_sky_pickup_cadence() {
        let mut state = running_state(5);
        state.settings.spawn_interval_ms = 10_000.0;
        advance(&mut state, 4999.0);
        assert!(state.pickups.is_empty());
        advance(&mut state, 1.0);
        assert_eq!(state.pickups.len(), 1);

        let pickup = &state.pickups[0];
        assert_eq!(pickup.origin, PickupOrigin::Sky);
        assert_eq!(pickup.radius, SKY_PICKUP_RADIUS);
        assert!(pickup.pos.y >= SKY_PICKUP_MIN_Y);
        assert!(pickup.pos.y <= state.viewport.ground_y() - SKY_PICKUP_GROUND_CLEARANCE);
    }

    #[test]
    fn test_sky_pickup_cap() {
        let mut state = running_state(6);
        for _ in 0..MAX_LIVE_PICKUPS {
            spawn_obstacle(&mut state);
        }
        assert!(!spawn_sky_pickup(&mut state));
        assert_eq!(state.pickups.len(), MAX_LIVE_PICKUPS);

        // Timer keeps running while capped, spawn happens once room frees up
        state.spawner.pickup_timer_ms = SKY_PICKUP_INTERVAL_MS;
        state.settings.spawn_interval_ms = 10_000.0;
        state.spawner.obstacle_timer_ms = 0.0;
        advance(&mut state, 16.0);
        assert_eq!(state.pickups.len(), MAX_LIVE_PICKUPS);
        assert!(state.spawner.pickup_timer_ms > SKY_PICKUP_INTERVAL_MS);

        state.pickups.pop();
        advance(&mut state, 16.0);
        assert_eq!(state.pickups.len(), MAX_LIVE_PICKUPS);
        assert_eq!(state.spawner.pickup_timer_ms, 0.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = running_state(99);
        let mut b = running_state(99);
        for _ in 0..10 {
            spawn_obstacle(&mut a);
            spawn_obstacle(&mut b);
        }
        for (x, y) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(x.top_height, y.top_height);
        }
    }
}
