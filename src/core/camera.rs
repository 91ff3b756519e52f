use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Fallback view direction when a look target collapses onto the eye
pub const DEFAULT_FORWARD: Vec3 = Vec3::NEG_Z;

/// Camera position plus the point it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Pose looking from `position` along `direction`
    pub fn looking_along(position: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(DEFAULT_FORWARD);
        Self::new(position, position + direction)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(DEFAULT_FORWARD)
    }

    pub fn right(&self) -> Vec3 {
        let forward = self.forward();
        // Looking straight up or down, fall back to world X
        forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.target.is_finite()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_along(Vec3::new(0.0, 0.0, 30.0), DEFAULT_FORWARD)
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// `tan(fov / 2)`, half the view plane height at unit distance
    pub fn half_height(&self) -> f32 {
        (self.fov_y_degrees.to_radians() * 0.5).tan()
    }

    pub fn with_aspect(mut self, width: u32, height: u32) -> Self {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
        self
    }
}

/// What the picker and the renderer see
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub pose: CameraPose,
    pub projection: Projection,
}

impl Camera {
    pub fn new(pose: CameraPose, projection: Projection) -> Self {
        Self { pose, projection }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.pose.view_matrix()
    }

    /// Project a world point to screen pixels plus view depth, `None` behind the eye
    pub fn project(&self, point: Vec3, width: u32, height: u32) -> Option<(f32, f32, f32)> {
        let view = self.pose.view_matrix().transform_point3(point);
        let depth = -view.z;
        if depth <= self.projection.near {
            return None;
        }

        let ndc = self.view_projection().project_point3(point);
        if !ndc.x.is_finite() || !ndc.y.is_finite() {
            return None;
        }

        let x = (ndc.x * 0.5 + 0.5) * width as f32;
        let y = (0.5 - ndc.y * 0.5) * height as f32;
        Some((x, y, depth))
    }
}
