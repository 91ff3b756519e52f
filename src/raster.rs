//! CPU rasteriser: turns a scene and a camera into an RGBA8 pixel buffer.

use glam::Vec3;

use crate::core::camera::Camera;
use crate::math::{shade, to_rgba8};
use crate::scene::{ObjectId, Scene};

pub type Rgba = [u8; 4];

pub const BACKGROUND: Rgba = [0, 0, 0, 255];
pub const HIGHLIGHT: Rgba = [255, 220, 64, 255];

/// Projected coordinates past this are not rasterised
const MAX_SCREEN_COORD: f32 = 16_384.0;

/// 2D drawing operations, recorded first and executed in order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    Line { from: (i32, i32), to: (i32, i32), color: Rgba },
    /// Sphere impostor lit from `to_light`, given in view space (+Z toward the eye)
    ShadedDisc { center: (f32, f32), radius: f32, color: [f32; 3], to_light: Vec3 },
    Ring { center: (i32, i32), radius: i32, color: Rgba },
}

#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BACKGROUND; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reallocate for a new size, contents are cleared
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Raw RGBA bytes, row-major, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn execute(&mut self, ops: &[DrawOp]) {
        for op in ops {
            match op {
                DrawOp::Clear(color) => self.clear(*color),
                DrawOp::Line { from, to, color } => self.draw_line(*from, *to, *color),
                DrawOp::ShadedDisc {
                    center,
                    radius,
                    color,
                    to_light,
                } => self.draw_shaded_disc(*center, *radius, *color, *to_light),
                DrawOp::Ring { center, radius, color } => self.draw_ring(*center, *radius, *color),
            }
        }
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = color;
    }

    /// Bresenham
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba) {
        let (mut x, mut y) = from;
        let (x2, y2) = to;

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_shaded_disc(&mut self, center: (f32, f32), radius: f32, color: [f32; 3], to_light: Vec3) {
        if radius <= 0.0 {
            return;
        }
        let (w, h) = (self.width as f32, self.height as f32);
        let x0 = (center.0 - radius).floor().max(0.0) as i32;
        let x1 = (center.0 + radius).ceil().min(w - 1.0) as i32;
        let y0 = (center.1 - radius).floor().max(0.0) as i32;
        let y1 = (center.1 + radius).ceil().min(h - 1.0) as i32;

        for py in y0..=y1 {
            for px in x0..=x1 {
                let nx = (px as f32 + 0.5 - center.0) / radius;
                let ny = -(py as f32 + 0.5 - center.1) / radius;
                let d2 = nx * nx + ny * ny;
                if d2 > 1.0 {
                    continue;
                }
                let normal = Vec3::new(nx, ny, (1.0 - d2).sqrt());
                self.set_pixel(px, py, to_rgba8(shade(color, normal, to_light)));
            }
        }
    }

    /// Midpoint circle outline
    fn draw_ring(&mut self, center: (i32, i32), radius: i32, color: Rgba) {
        let (cx, cy) = center;
        let (mut x, mut y) = (radius, 0);
        let mut p = 1 - radius;

        while x >= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ] {
                self.set_pixel(px, py, color);
            }
            y += 1;
            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }
}

fn on_screen(x: f32, y: f32) -> bool {
    x.abs() < MAX_SCREEN_COORD && y.abs() < MAX_SCREEN_COORD
}

/// Draw list for one frame: background, lines, then spheres far to near
pub fn scene_ops(scene: &Scene, camera: &Camera, width: u32, height: u32, selection: Option<ObjectId>) -> Vec<DrawOp> {
    let mut ops = vec![DrawOp::Clear(BACKGROUND)];

    for line in scene.lines() {
        let color = to_rgba8(line.color);
        let projected: Vec<_> = line.points.iter().map(|p| camera.project(*p, width, height)).collect();
        for pair in projected.windows(2) {
            if let [Some((x0, y0, _)), Some((x1, y1, _))] = pair {
                if on_screen(*x0, *y0) && on_screen(*x1, *y1) {
                    ops.push(DrawOp::Line {
                        from: (*x0 as i32, *y0 as i32),
                        to: (*x1 as i32, *y1 as i32),
                        color,
                    });
                }
            }
        }
    }

    let pose = &camera.pose;
    let pixels_per_unit = height as f32 * 0.5 / camera.projection.half_height();
    let light = scene.lights().first().map(|l| l.position);

    let mut discs: Vec<_> = scene
        .objects()
        .iter()
        .filter_map(|object| {
            let center = object.world_center();
            let (x, y, depth) = camera.project(center, width, height)?;
            if !on_screen(x, y) {
                return None;
            }
            let radius = object.world_radius() * pixels_per_unit / depth;
            let to_light_world = light.map_or(-pose.forward(), |l| l - center);
            let to_light = Vec3::new(
                to_light_world.dot(pose.right()),
                to_light_world.dot(pose.up()),
                -to_light_world.dot(pose.forward()),
            );
            Some((depth, object.id, x, y, radius, object.color, to_light))
        })
        .collect();
    discs.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, id, x, y, radius, color, to_light) in discs {
        ops.push(DrawOp::ShadedDisc {
            center: (x, y),
            radius,
            color,
            to_light,
        });
        if selection == Some(id) {
            ops.push(DrawOp::Ring {
                center: (x as i32, y as i32),
                radius: radius.ceil() as i32 + 2,
                color: HIGHLIGHT,
            });
        }
    }

    ops
}

/// Rasterise the scene into `canvas`
pub fn render_scene(canvas: &mut Canvas, scene: &Scene, camera: &Camera, selection: Option<ObjectId>) {
    let (width, height) = canvas.dimensions();
    let ops = scene_ops(scene, camera, width, height, selection);
    log::trace!("Rasterising {} draw ops", ops.len());
    canvas.execute(&ops);
}
