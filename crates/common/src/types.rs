use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A packed `0xAARRGGBB` pixel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffff_ffff);
    pub const DARK_GREY: Color = Color(0xff40_4040);
    pub const BLACK: Color = Color(0xff00_0000);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xff00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Byte order expected by RGBA8 presentation surfaces.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }
}

/// Player pose in map space. One map cell is one unit; `angle` is in radians,
/// with 0 facing +x and positive angles turning towards +y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub angle: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            angle,
        }
    }

    /// Unit vector the player is facing.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(3.0, 3.0, 0.0)
    }
}
