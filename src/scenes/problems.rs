use glam::{Mat4, Vec3};

use crate::core::path::ControlPath;
use crate::math::from_hex;
use crate::scene::{BoundingVolume, PointLight, Scene, SceneSink};

/// Index of the travel path in the scene's line list
pub const PATH_LINE: usize = 0;

/// Open problems placed around the path, name and position
pub const PROBLEMS: [(&str, [f32; 3]); 3] = [
    ("Riemann Hypothesis", [0.0, 0.0, -10.0]),
    ("P vs NP", [-20.0, 10.0, -30.0]),
    ("Navier-Stokes", [20.0, -15.0, 10.0]),
];

const PATH_COLOR: u32 = 0xff0000;
const PLANET_COLOR: u32 = 0x00ff00;
const LIGHT_POSITION: Vec3 = Vec3::new(50.0, 50.0, 50.0);

/// Draw resolution of the path line, matches the original 50-segment curve
const PATH_SEGMENTS: usize = 50;

/// Add the path line, the problem planets and the light to any sink
pub fn populate_problem_scene(sink: &mut impl SceneSink, path: &ControlPath) {
    let segments_per_span = PATH_SEGMENTS.div_ceil(path.segment_count());
    sink.add_line(path.polyline(segments_per_span), from_hex(PATH_COLOR));

    for (name, position) in PROBLEMS {
        let transform = Mat4::from_translation(Vec3::from_array(position));
        sink.add_object(name, BoundingVolume::unit_sphere(), transform, from_hex(PLANET_COLOR));
    }

    sink.add_light(PointLight {
        position: LIGHT_POSITION,
        intensity: 1.0,
    });
}

pub fn create_problem_scene(path: &ControlPath) -> Scene {
    let mut scene = Scene::new();
    populate_problem_scene(&mut scene, path);
    log::debug!(
        "Problem scene: {} objects, {} lines",
        scene.objects().len(),
        scene.lines().len()
    );
    scene
}
