use glam::{Mat4, Vec3};

use crate::math::{Ray, AABB};

/// Stable identifier handed out by the scene on insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Object-space bounding volume used for picking and drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Sphere { center: Vec3, radius: f32 },
    Box(AABB),
}

impl BoundingVolume {
    pub fn unit_sphere() -> Self {
        Self::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        }
    }

    /// Ray parameter of the nearest positive hit, in whatever space `ray` lives in
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Self::Sphere { center, radius } => ray.intersect_sphere(*center, *radius),
            Self::Box(aabb) => ray.intersect_aabb(aabb),
        }
    }

    pub fn local_bounds(&self) -> AABB {
        match self {
            Self::Sphere { center, radius } => AABB::from_sphere(*center, *radius),
            Self::Box(aabb) => *aabb,
        }
    }
}

/// Named object the pointer can select
#[derive(Debug, Clone, PartialEq)]
pub struct PickableObject {
    pub id: ObjectId,
    pub name: String,
    pub bounds: BoundingVolume,
    pub transform: Mat4,
    pub color: [f32; 3],
}

impl PickableObject {
    pub fn world_center(&self) -> Vec3 {
        self.transform.transform_point3(self.bounds.local_bounds().center())
    }

    pub fn world_bounds(&self) -> AABB {
        self.bounds.local_bounds().transformed(&self.transform)
    }

    /// Sphere radius after the largest axis scale of the transform
    pub fn world_radius(&self) -> f32 {
        let scale = self.transform.to_scale_rotation_translation().0.abs().max_element();
        match self.bounds {
            BoundingVolume::Sphere { radius, .. } => radius * scale,
            BoundingVolume::Box(aabb) => (aabb.max - aabb.min).length() * 0.5 * scale,
        }
    }
}

/// Connected line strip drawn through the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec3>,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// Scene construction seam
pub trait SceneSink {
    /// Insert a pickable object, returns its id
    fn add_object(&mut self, name: &str, bounds: BoundingVolume, transform: Mat4, color: [f32; 3]) -> ObjectId;

    /// Insert a line strip
    fn add_line(&mut self, points: Vec<Vec3>, color: [f32; 3]);

    fn add_light(&mut self, light: PointLight);
}

/// In-memory scene, objects keep insertion order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<PickableObject>,
    lines: Vec<Polyline>,
    lights: Vec<PointLight>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &[PickableObject] {
        &self.objects
    }

    pub fn lines(&self) -> &[Polyline] {
        &self.lines
    }

    /// Replace the points of line `index`, used when the path is rescaled
    pub fn set_line_points(&mut self, index: usize, points: Vec<Vec3>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.points = points;
        }
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn object(&self, id: ObjectId) -> Option<&PickableObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}

impl SceneSink for Scene {
    fn add_object(&mut self, name: &str, bounds: BoundingVolume, transform: Mat4, color: [f32; 3]) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(PickableObject {
            id,
            name: name.to_string(),
            bounds,
            transform,
            color,
        });
        id
    }

    fn add_line(&mut self, points: Vec<Vec3>, color: [f32; 3]) {
        self.lines.push(Polyline { points, color });
    }

    fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }
}
