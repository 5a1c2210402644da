//! Scene snapshot
//!
//! `build_scene` is a pure function of the game state and preferences. The
//! host draws the items in order; nothing here touches the simulation.

use glam::Vec2;
use serde::Serialize;

use super::vertex::{SpriteInstance, SpriteKind, colors};
use crate::settings::{ObstacleSkin, Preferences};
use crate::sim::{
    Avatar, AvatarPose, Backdrop, Collidable, GamePhase, GameState, Ground, Obstacle, Pickup,
    PickupOrigin, Rect, Viewport,
};

/// One drawable element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum SceneItem {
    /// Looping background, drawn twice side by side from `offset`
    Backdrop { offset: f32, width: f32, height: f32 },
    /// One obstacle column; `facing_down` marks the top column (cap at its bottom)
    Column {
        rect: Rect,
        skin: ObstacleSkin,
        facing_down: bool,
    },
    Pickup {
        center: Vec2,
        radius: f32,
        spin: f32,
        sky: bool,
    },
    Ground {
        y: f32,
        width: f32,
        height: f32,
        offset: f32,
        sway: f32,
    },
    Avatar {
        rect: Rect,
        rotation: f32,
        pose: AvatarPose,
    },
}

/// Score panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub overall: u64,
    pub obstacles: u64,
    pub pickups: u64,
    pub session_best: u64,
    pub all_time_best: u64,
    pub phase: GamePhase,
}

/// Hitboxes for the debug toggle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebugOverlay {
    pub avatar: Option<Rect>,
    /// Top and bottom column of every live obstacle
    pub columns: Vec<Rect>,
    /// Passable gap of every live obstacle
    pub gaps: Vec<Rect>,
    /// (center, radius) of every live pickup
    pub pickups: Vec<(Vec2, f32)>,
    pub ground_y: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Back to front
    pub items: Vec<SceneItem>,
    pub hud: Hud,
    pub debug: Option<DebugOverlay>,
}

/// Shared inputs for `Drawable`
#[derive(Debug, Clone, Copy)]
pub struct DrawContext {
    pub viewport: Viewport,
    pub skin: ObstacleSkin,
}

/// Entities that contribute scene items
pub trait Drawable {
    fn draw(&self, ctx: &DrawContext, out: &mut Vec<SceneItem>);
}

impl Drawable for Backdrop {
    fn draw(&self, ctx: &DrawContext, out: &mut Vec<SceneItem>) {
        out.push(SceneItem::Backdrop {
            offset: self.offset,
            width: ctx.viewport.width,
            height: ctx.viewport.height,
        });
    }
}

impl Drawable for Obstacle {
    fn draw(&self, ctx: &DrawContext, out: &mut Vec<SceneItem>) {
        out.push(SceneItem::Column {
            rect: self.top_rect(),
            skin: ctx.skin,
            facing_down: true,
        });
        out.push(SceneItem::Column {
            rect: self.bottom_rect(),
            skin: ctx.skin,
            facing_down: false,
        });
    }
}

impl Drawable for Pickup {
    fn draw(&self, _ctx: &DrawContext, out: &mut Vec<SceneItem>) {
        if self.collected {
            return;
        }
        out.push(SceneItem::Pickup {
            center: self.pos,
            radius: self.radius,
            spin: self.spin,
            sky: self.origin == PickupOrigin::Sky,
        });
    }
}

impl Drawable for Ground {
    fn draw(&self, ctx: &DrawContext, out: &mut Vec<SceneItem>) {
        out.push(SceneItem::Ground {
            y: ctx.viewport.ground_y(),
            width: ctx.viewport.width,
            height: ctx.viewport.ground_height,
            offset: self.offset,
            sway: self.sway_clock,
        });
    }
}

impl Drawable for Avatar {
    fn draw(&self, _ctx: &DrawContext, out: &mut Vec<SceneItem>) {
        out.push(SceneItem::Avatar {
            rect: self.bounds(),
            rotation: self.rotation,
            pose: self.pose,
        });
    }
}

/// Snapshot the state for drawing
pub fn build_scene(state: &GameState, prefs: &Preferences) -> Scene {
    let ctx = DrawContext {
        viewport: state.viewport,
        skin: prefs.obstacle_skin,
    };

    let mut items = Vec::with_capacity(3 + state.obstacles.len() * 2 + state.pickups.len());
    state.backdrop.draw(&ctx, &mut items);
    for obstacle in &state.obstacles {
        obstacle.draw(&ctx, &mut items);
    }
    for pickup in &state.pickups {
        pickup.draw(&ctx, &mut items);
    }
    state.ground.draw(&ctx, &mut items);
    if let Some(avatar) = &state.avatar {
        avatar.draw(&ctx, &mut items);
    }

    let debug = prefs.debug_overlay.then(|| DebugOverlay {
        avatar: state.avatar.as_ref().map(|a| a.bounds()),
        columns: state
            .obstacles
            .iter()
            .flat_map(|o| [o.top_rect(), o.bottom_rect()])
            .collect(),
        gaps: state.obstacles.iter().map(|o| o.gap_rect()).collect(),
        pickups: state
            .pickups
            .iter()
            .filter(|p| !p.collected)
            .map(|p| (p.pos, p.radius))
            .collect(),
        ground_y: state.viewport.ground_y(),
    });

    Scene {
        width: state.viewport.width,
        height: state.viewport.height,
        items,
        hud: Hud {
            overall: state.scores.overall,
            obstacles: state.scores.obstacles,
            pickups: state.scores.pickups,
            session_best: state.records.session_best,
            all_time_best: state.records.all_time_best,
            phase: state.phase,
        },
        debug,
    }
}

fn skin_color(skin: ObstacleSkin) -> [f32; 4] {
    match skin {
        ObstacleSkin::Green => colors::COLUMN_GREEN,
        ObstacleSkin::Red => colors::COLUMN_RED,
        ObstacleSkin::Blue => colors::COLUMN_BLUE,
    }
}

fn pose_index(pose: AvatarPose) -> f32 {
    match pose {
        AvatarPose::Idle => 0.0,
        AvatarPose::Ascending => 1.0,
        AvatarPose::Crying => 2.0,
    }
}

impl SceneItem {
    pub fn to_instance(&self) -> SpriteInstance {
        match *self {
            SceneItem::Backdrop {
                offset,
                width,
                height,
            } => SpriteInstance::new(SpriteKind::Backdrop, [0.0, 0.0], [width, height], colors::SKY)
                .with_params(offset, 0.0),
            SceneItem::Column {
                rect,
                skin,
                facing_down,
            } => SpriteInstance::new(
                SpriteKind::Column,
                [rect.x, rect.y],
                [rect.width, rect.height],
                skin_color(skin),
            )
            .with_params(if facing_down { 1.0 } else { 0.0 }, 0.0),
            SceneItem::Pickup {
                center,
                radius,
                spin,
                sky,
            } => SpriteInstance::new(
                SpriteKind::Pickup,
                [center.x - radius, center.y - radius],
                [radius * 2.0, radius * 2.0],
                if sky { colors::SKY_PICKUP } else { colors::PICKUP },
            )
            .with_params(spin, 0.0),
            SceneItem::Ground {
                y,
                width,
                height,
                offset,
                sway,
            } => SpriteInstance::new(SpriteKind::Ground, [0.0, y], [width, height], colors::GROUND)
                .with_params(offset, sway),
            SceneItem::Avatar {
                rect,
                rotation,
                pose,
            } => SpriteInstance::new(
                SpriteKind::Avatar,
                [rect.x, rect.y],
                [rect.width, rect.height],
                if pose == AvatarPose::Crying {
                    colors::AVATAR_CRYING
                } else {
                    colors::AVATAR
                },
            )
            .with_rotation(rotation)
            .with_params(pose_index(pose), 0.0),
        }
    }
}

impl Scene {
    /// Flatten the items into GPU instances, preserving draw order
    pub fn instances(&self) -> Vec<SpriteInstance> {
        self.items.iter().map(SceneItem::to_instance).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimSettings;
    use crate::sim::spawner;

    fn playing() -> GameState {
        let mut state = GameState::new(Viewport::new(800.0, 720.0), SimSettings::default(), 21);
        state.start_session(&mut Vec::new());
        spawner::spawn_obstacle(&mut state);
        spawner::spawn_sky_pickup(&mut state);
        state
    }

    fn kinds(scene: &Scene) -> Vec<&'static str> {
        scene
            .items
            .iter()
            .map(|item| match item {
                SceneItem::Backdrop { .. } => "backdrop",
                SceneItem::Column { .. } => "column",
                SceneItem::Pickup { .. } => "pickup",
                SceneItem::Ground { .. } => "ground",
                SceneItem::Avatar { .. } => "avatar",
            })
            .collect()
    }

    #[test]
    fn test_draw_order() {
        let scene = build_scene(&playing(), &Preferences::default());
        assert_eq!(
            kinds(&scene),
            vec!["backdrop", "column", "column", "pickup", "pickup", "ground", "avatar"]
        );
        assert!(scene.debug.is_none());
    }

    #[test]
    fn test_collected_pickups_are_not_drawn() {
        let mut state = playing();
        state.pickups[0].collected = true;
        let scene = build_scene(&state, &Preferences::default());
        assert_eq!(kinds(&scene).iter().filter(|k| **k == "pickup").count(), 1);
    }

    #[test]
    fn test_idle_scene_has_no_avatar() {
        let state = GameState::new(Viewport::default(), SimSettings::default(), 1);
        let scene = build_scene(&state, &Preferences::default());
        assert_eq!(kinds(&scene), vec!["backdrop", "ground"]);
        assert_eq!(scene.hud.phase, GamePhase::Idle);
    }

    #[test]
    fn test_skin_and_hud() {
        let mut state = playing();
        state.scores.obstacles = 2;
        state.scores.pickups = 1;
        state.score_changed(&mut Vec::new());
        let prefs = Preferences {
            obstacle_skin: ObstacleSkin::Red,
            ..Preferences::default()
        };

        let scene = build_scene(&state, &prefs);
        assert_eq!(scene.hud.overall, 12);
        assert_eq!(scene.hud.session_best, 12);

        let instances = scene.instances();
        assert_eq!(instances.len(), scene.items.len());
        assert_eq!(instances[1].color, colors::COLUMN_RED);
        assert_eq!(instances[1].kind, SpriteKind::Column as u32);
    }

    #[test]
    fn test_debug_overlay_hitboxes() {
        let state = playing();
        let prefs = Preferences {
            debug_overlay: true,
            ..Preferences::default()
        };
        let debug = build_scene(&state, &prefs).debug.unwrap();

        assert_eq!(debug.columns.len(), 2);
        assert_eq!(debug.gaps, vec![state.obstacles[0].gap_rect()]);
        assert_eq!(debug.pickups.len(), 2);
        assert_eq!(debug.ground_y, 620.0);
        assert_eq!(debug.avatar, Some(state.avatar.as_ref().unwrap().bounds()));
    }

    #[test]
    fn test_scene_serializes_for_the_host() {
        let scene = build_scene(&playing(), &Preferences::default());
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["items"][0]["kind"], "Backdrop");
        assert_eq!(json["hud"]["phase"], "Running");
    }
}
