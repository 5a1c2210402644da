//! Instance data for sprite rendering

use bytemuck::{Pod, Zeroable};

/// What a sprite instance draws (selects the shader branch / atlas region)
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Backdrop = 0,
    Column = 1,
    Pickup = 2,
    Ground = 3,
    Avatar = 4,
}

/// One textured quad, laid out for direct upload into an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in screen pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Rotation around the quad center (radians)
    pub rotation: f32,
    /// `SpriteKind` discriminant
    pub kind: u32,
    pub color: [f32; 4],
    /// Kind-specific: scroll offset, spin, pose, sway clock
    pub params: [f32; 2],
}

impl SpriteInstance {
    pub const fn new(kind: SpriteKind, position: [f32; 2], size: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            size,
            rotation: 0.0,
            kind: kind as u32,
            color,
            params: [0.0, 0.0],
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_params(mut self, a: f32, b: f32) -> Self {
        self.params = [a, b];
        self
    }
}

/// View a slice of instances as raw bytes for a GPU buffer write
pub fn instance_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.44, 0.77, 0.81, 1.0];
    pub const COLUMN_GREEN: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const COLUMN_RED: [f32; 4] = [0.85, 0.25, 0.2, 1.0];
    pub const COLUMN_BLUE: [f32; 4] = [0.25, 0.45, 0.9, 1.0];
    pub const PICKUP: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const SKY_PICKUP: [f32; 4] = [1.0, 0.92, 0.45, 1.0]; // Paler gold
    pub const GROUND: [f32; 4] = [0.87, 0.85, 0.58, 1.0];
    pub const AVATAR: [f32; 4] = [1.0, 0.85, 0.25, 1.0];
    pub const AVATAR_CRYING: [f32; 4] = [0.75, 0.75, 0.85, 1.0];
}
