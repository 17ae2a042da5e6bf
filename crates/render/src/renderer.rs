use wolfcast_common::{Color, EngineConfig};
use wolfcast_kernel::World;

use crate::caster::{RayCaster, RayHit};
use crate::framebuffer::Framebuffer;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the world and produces one frame. It never mutates the
/// world; the player pose is owned by the game loop.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state.
    fn render(&mut self, world: &World) -> Self::Output;
}

/// Half the height, in pixels, of a wall slab seen at `distance` on a view
/// `render_height` pixels tall. Never exceeds `render_height`; a zero (or
/// NaN) distance fills the whole column.
pub fn half_height(render_height: usize, distance: f32) -> i64 {
    let full = render_height as i64;
    if distance.is_nan() || distance <= 0.0 {
        return full;
    }
    ((render_height as f32 / (distance * 2.0)).floor() as i64).min(full)
}

/// Per-frame figures from [`SlabRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderStats {
    pub columns: usize,
    pub wall_pixels: usize,
    /// Rays that hit the distance cap instead of a wall.
    pub capped_rays: usize,
    pub nearest: f32,
}

/// Draws one flat-colored vertical wall slab per screen column, centered on
/// the horizon, over a single background color.
#[derive(Debug, Clone)]
pub struct SlabRenderer {
    caster: RayCaster,
    framebuffer: Framebuffer,
    wall_color: Color,
    background_color: Color,
    hits: Vec<RayHit>,
}

impl SlabRenderer {
    pub fn new(
        caster: RayCaster,
        width: usize,
        height: usize,
        wall_color: Color,
        background_color: Color,
    ) -> Self {
        Self {
            caster,
            framebuffer: Framebuffer::new(width, height),
            wall_color,
            background_color,
            hits: Vec::with_capacity(width),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            RayCaster::from_config(config),
            config.render_width,
            config.render_height,
            config.wall_color,
            config.background_color,
        )
    }

    pub fn caster(&self) -> &RayCaster {
        &self.caster
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Ray results of the last rendered frame, one per column.
    pub fn hits(&self) -> &[RayHit] {
        &self.hits
    }
}

impl Renderer for SlabRenderer {
    type Output = RenderStats;

    fn render(&mut self, world: &World) -> RenderStats {
        let _span = tracing::trace_span!("render_frame", tick = world.tick()).entered();

        let width = self.framebuffer.width();
        let mid = self.framebuffer.height() as i64 / 2;
        self.framebuffer.clear(self.background_color);
        self.caster
            .cast_all(world.map(), world.player(), width, &mut self.hits);

        let mut stats = RenderStats {
            columns: width,
            nearest: f32::INFINITY,
            ..RenderStats::default()
        };
        for (column, hit) in self.hits.iter().enumerate() {
            let half = half_height(self.framebuffer.height(), hit.distance);
            stats.wall_pixels +=
                self.framebuffer
                    .fill_column(column, mid - half, mid + half, self.wall_color);
            if !hit.hit {
                stats.capped_rays += 1;
            }
            stats.nearest = stats.nearest.min(hit.distance);
        }
        stats
    }
}

/// Debug text renderer: the same slab projection drawn as ASCII.
///
/// Walls are shaded by distance, the background is blank. Useful for CLI
/// output and for eyeballing the projection without a window.
#[derive(Debug, Clone)]
pub struct DebugTextRenderer {
    caster: RayCaster,
    columns: usize,
    rows: usize,
}

impl DebugTextRenderer {
    pub fn new(caster: RayCaster, columns: usize, rows: usize) -> Self {
        Self {
            caster,
            columns,
            rows,
        }
    }

    fn shade(hit: &RayHit) -> char {
        match hit.distance {
            _ if !hit.hit => '-',
            d if d < 2.0 => '#',
            d if d < 4.0 => '%',
            d if d < 8.0 => '+',
            _ => '-',
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, world: &World) -> String {
        let player = world.player();
        let mut hits = Vec::with_capacity(self.columns);
        self.caster
            .cast_all(world.map(), player, self.columns, &mut hits);

        let mut out = format!(
            "=== tick={} pos=({:.2}, {:.2}) angle={:.3} ===\n",
            world.tick(),
            player.position.x,
            player.position.y,
            player.angle
        );
        let mid = self.rows as i64 / 2;
        let spans: Vec<(i64, i64, char)> = hits
            .iter()
            .map(|hit| {
                let half = half_height(self.rows, hit.distance);
                (mid - half, mid + half, Self::shade(hit))
            })
            .collect();
        for row in 0..self.rows as i64 {
            let line: String = spans
                .iter()
                .map(|&(top, bottom, glyph)| {
                    if (top..bottom).contains(&row) {
                        glyph
                    } else {
                        ' '
                    }
                })
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
