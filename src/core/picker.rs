use glam::{Vec2, Vec3};

use super::camera::Camera;
use crate::math::Ray;
use crate::scene::PickableObject;

/// Nearest object under the pointer and its distance along the pick ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit<'a> {
    pub object: &'a PickableObject,
    pub distance: f32,
}

/// Screen pixels to device coordinates in `[-1, 1]`, +Y up
///
/// `None` for an empty viewport.
pub fn screen_to_ndc(pointer_x: f32, pointer_y: f32, viewport_width: f32, viewport_height: f32) -> Option<Vec2> {
    if !(viewport_width > 0.0 && viewport_height > 0.0) {
        return None;
    }
    let x = (pointer_x / viewport_width) * 2.0 - 1.0;
    let y = -(pointer_y / viewport_height) * 2.0 + 1.0;
    Some(Vec2::new(x, y))
}

impl Ray {
    /// World-space ray from the camera through a device-space point
    ///
    /// The direction is normalized so hit distances are world units.
    pub fn from_ndc(camera: &Camera, ndc: Vec2) -> Ray {
        let pose = &camera.pose;
        let half_height = camera.projection.half_height();
        let half_width = half_height * camera.projection.aspect;

        let direction = pose.forward()
            + pose.right() * (ndc.x * half_width)
            + pose.up() * (ndc.y * half_height);

        Ray::new(pose.position, direction.try_normalize().unwrap_or(pose.forward()))
    }

    /// Pick ray for a pointer position in screen pixels
    pub fn from_screen(
        camera: &Camera,
        pointer_x: f32,
        pointer_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<Ray> {
        screen_to_ndc(pointer_x, pointer_y, viewport_width, viewport_height).map(|ndc| Ray::from_ndc(camera, ndc))
    }
}

/// Distance along `ray` to `object`, tested in the object's local space
fn hit_distance(ray: &Ray, object: &PickableObject) -> Option<f32> {
    let inverse = object.transform.inverse();
    if !inverse.is_finite() {
        log::debug!("Skipping '{}': transform is not invertible", object.name);
        return None;
    }
    let local = ray.transformed(&inverse);
    object.bounds.intersect(&local).filter(|t| t.is_finite())
}

/// Closest candidate hit by `ray`, first inserted wins ties
pub fn pick_along<'a>(ray: &Ray, candidates: &'a [PickableObject]) -> Option<PickHit<'a>> {
    candidates.iter().fold(None, |best: Option<PickHit<'a>>, object| {
        match (hit_distance(ray, object), best) {
            (Some(distance), Some(current)) if distance < current.distance => Some(PickHit { object, distance }),
            (Some(distance), None) => Some(PickHit { object, distance }),
            (_, current) => current,
        }
    })
}

/// Resolve a pointer position to the nearest pickable object
pub fn pick_hit<'a>(
    pointer_x: f32,
    pointer_y: f32,
    viewport_width: f32,
    viewport_height: f32,
    camera: &Camera,
    candidates: &'a [PickableObject],
) -> Option<PickHit<'a>> {
    let ray = Ray::from_screen(camera, pointer_x, pointer_y, viewport_width, viewport_height)?;
    pick_along(&ray, candidates)
}

/// [`pick_hit`] without the distance
pub fn pick<'a>(
    pointer_x: f32,
    pointer_y: f32,
    viewport_width: f32,
    viewport_height: f32,
    camera: &Camera,
    candidates: &'a [PickableObject],
) -> Option<&'a PickableObject> {
    pick_hit(pointer_x, pointer_y, viewport_width, viewport_height, camera, candidates).map(|hit| hit.object)
}

/// World point at `distance` along the pick ray, for overlays
pub fn hit_point(ray: &Ray, hit: &PickHit<'_>) -> Vec3 {
    ray.at(hit.distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::{CameraPose, Projection};
    use crate::scene::{BoundingVolume, ObjectId};
    use glam::Mat4;

    fn sphere(id: u32, center: Vec3) -> PickableObject {
        PickableObject {
            id: ObjectId(id),
            name: format!("sphere {id}"),
            bounds: BoundingVolume::unit_sphere(),
            transform: Mat4::from_translation(center),
            color: [0.0, 1.0, 0.0],
        }
    }

    fn camera() -> Camera {
        Camera::new(CameraPose::default(), Projection::default().with_aspect(800, 600))
    }

    #[test]
    fn test_screen_to_ndc_corners() {
        assert_eq!(screen_to_ndc(0.0, 0.0, 800.0, 600.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(screen_to_ndc(800.0, 600.0, 800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(screen_to_ndc(400.0, 300.0, 800.0, 600.0), Some(Vec2::ZERO));
        assert_eq!(screen_to_ndc(1.0, 1.0, 0.0, 600.0), None);
    }

    #[test]
    fn test_center_ray_is_forward() {
        let ray = Ray::from_ndc(&camera(), Vec2::ZERO);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 30.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_top_edge_ray_matches_fov() {
        let cam = camera();
        let ray = Ray::from_ndc(&cam, Vec2::new(0.0, 1.0));
        let angle = ray.direction.angle_between(Vec3::NEG_Z).to_degrees();
        assert!((angle - cam.projection.fov_y_degrees * 0.5).abs() < 1e-3);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_nearest_wins() {
        let candidates = vec![sphere(0, Vec3::new(0.0, 0.0, -10.0)), sphere(1, Vec3::new(0.0, 0.0, 0.0))];
        let hit = pick_hit(400.0, 300.0, 800.0, 600.0, &camera(), &candidates).unwrap();
        assert_eq!(hit.object.id, ObjectId(1));
        assert!((hit.distance - 29.0).abs() < 1e-4);
    }

    #[test]
    fn test_singular_transform_is_skipped() {
        let mut flat = sphere(0, Vec3::ZERO);
        flat.transform = Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0));
        let candidates = vec![flat, sphere(1, Vec3::new(0.0, 0.0, -10.0))];
        let hit = pick(400.0, 300.0, 800.0, 600.0, &camera(), &candidates).unwrap();
        assert_eq!(hit.id, ObjectId(1));
    }

    #[test]
    fn test_tiny_sphere_is_pickable() {
        let mut tiny = sphere(0, Vec3::ZERO);
        tiny.transform = Mat4::from_translation(Vec3::new(0.0, 0.0, 29.0)) * Mat4::from_scale(Vec3::splat(0.004));
        let candidates = vec![tiny];

        let hit = pick_hit(400.0, 300.0, 800.0, 600.0, &camera(), &candidates).unwrap();
        assert_eq!(hit.object.id, ObjectId(0));
        assert!((hit.distance - 0.996).abs() < 1e-3);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(pick(400.0, 300.0, 800.0, 600.0, &camera(), &[]).is_none());
    }

    #[test]
    fn test_hit_point_on_surface() {
        let candidates = vec![sphere(0, Vec3::new(0.0, 0.0, -10.0))];
        let ray = Ray::from_screen(&camera(), 400.0, 300.0, 800.0, 600.0).unwrap();
        let hit = pick_along(&ray, &candidates).unwrap();
        assert!((hit_point(&ray, &hit) - Vec3::new(0.0, 0.0, -9.0)).length() < 1e-4);
    }
}
