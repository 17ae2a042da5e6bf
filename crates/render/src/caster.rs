use glam::Vec2;
use wolfcast_common::{EngineConfig, Player};
use wolfcast_kernel::Map;

/// Result of marching one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Euclidean distance from the ray origin to `point`.
    pub distance: f32,
    /// Where the ray stopped.
    pub point: Vec2,
    /// False if the ray reached the distance cap without finding a wall.
    pub hit: bool,
}

/// Fixed-step ray marcher.
///
/// Each ray advances `step` cells at a time until the cell under it is a
/// wall, so a frame costs O(distance / step) per column. `step` must stay
/// well below one cell or rays can skip over wall corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCaster {
    fov: f32,
    step: f32,
    max_distance: f32,
}

impl RayCaster {
    /// `fov` in radians; `step` and `max_distance` in map cells.
    pub fn new(fov: f32, step: f32, max_distance: f32) -> Self {
        assert!(step > 0.0, "step must be positive");
        assert!(max_distance > 0.0, "max_distance must be positive");
        Self {
            fov,
            step,
            max_distance,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.fov(), config.step_size, config.max_distance)
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Direction of the ray for `column` of `width`: the view cone is swept
    /// left to right starting at `angle - fov / 2`.
    pub fn ray_angle(&self, angle: f32, column: usize, width: usize) -> f32 {
        angle - self.fov / 2.0 + self.fov * (column as f32 / width as f32)
    }

    /// March from `origin` along `angle` until a wall cell or the distance cap.
    pub fn cast(&self, map: &Map, origin: Vec2, angle: f32) -> RayHit {
        let dir = Vec2::new(angle.cos(), angle.sin());
        let max_steps = (self.max_distance / self.step).ceil() as u32;

        let mut point = origin;
        let mut steps = 0u32;
        while !map.is_wall_at(point) {
            if steps >= max_steps {
                tracing::trace!(angle, x = origin.x, y = origin.y, "ray reached distance cap");
                return RayHit {
                    distance: self.max_distance,
                    point,
                    hit: false,
                };
            }
            steps += 1;
            // Measured from the origin each time so error does not accumulate.
            point = origin + dir * (steps as f32 * self.step);
        }

        RayHit {
            distance: point.distance(origin),
            point,
            hit: true,
        }
    }

    pub fn cast_column(&self, map: &Map, player: &Player, column: usize, width: usize) -> RayHit {
        let angle = self.ray_angle(player.angle, column, width);
        self.cast(map, player.position, angle)
    }

    /// Cast every column of a `width`-wide view into `out`, replacing its contents.
    pub fn cast_all(&self, map: &Map, player: &Player, width: usize, out: &mut Vec<RayHit>) {
        out.clear();
        out.extend((0..width).map(|column| self.cast_column(map, player, column, width)));
    }
}
