use super::camera::{Camera, Projection};
use super::input::{InputEvent, KeyCode};
use super::navigation::{CameraController, NavigationState};
use super::picker;
use crate::frame::FrameInfo;
use crate::scene::{ObjectId, PickableObject, Scene};

/// What an input event did to the navigation state
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    Picked { id: ObjectId, name: String },
    Missed,
    Moved,
    Scaled { scale: f32 },
    /// A scale key would have produced an invalid scale
    Rejected,
}

/// Text shown when an object is selected
pub fn welcome_message(name: &str) -> String {
    format!("Welcome to {name}! Here you'll explore {name} and dive into one of the unsolved problems of mathematics!")
}

/// Path line kept in sync with the controller's scale
#[derive(Debug, Clone, Copy)]
struct PathLine {
    index: usize,
    segments_per_span: usize,
    drawn_scale: f32,
}

/// Owns everything a navigation session mutates
///
/// Input handlers and the frame tick are the only writers. Renderers get a
/// copied [`Camera`] and a shared borrow of the scene.
pub struct NavigationContext {
    controller: CameraController,
    scene: Scene,
    viewport: (u32, u32),
    camera: Camera,
    selection: Option<ObjectId>,
    scale_factor: f32,
    path_line: Option<PathLine>,
}

impl NavigationContext {
    pub fn new(controller: CameraController, scene: Scene, viewport: (u32, u32), projection: Projection) -> Self {
        let projection = projection.with_aspect(viewport.0, viewport.1);
        let camera = Camera::new(controller.pose(), projection);
        Self {
            controller,
            scene,
            viewport,
            camera,
            selection: None,
            scale_factor: 1.1,
            path_line: None,
        }
    }

    /// Multiplier (or divisor) applied by the scale keys
    pub fn with_scale_factor(mut self, factor: f32) -> Self {
        self.scale_factor = factor;
        self
    }

    /// Redraw scene line `index` from the scaled path whenever the scale changes
    pub fn with_path_line(mut self, index: usize, segments_per_span: usize) -> Self {
        let mut line = PathLine {
            index,
            segments_per_span,
            drawn_scale: f32::NAN,
        };
        self.sync_path_line(&mut line);
        self.path_line = Some(line);
        self
    }

    fn sync_path_line(&mut self, line: &mut PathLine) {
        let scale = self.controller.state().scale;
        if line.drawn_scale == scale {
            return;
        }
        let points = self.controller.scaled_polyline(line.segments_per_span);
        self.scene.set_line_points(line.index, points);
        line.drawn_scale = scale;
    }

    /// Tick the controller and cache the camera for this frame
    pub fn frame(&mut self, frame: &FrameInfo) -> Camera {
        let pose = self.controller.tick(frame);
        self.camera = Camera::new(pose, self.camera.projection);

        if let Some(mut line) = self.path_line {
            self.sync_path_line(&mut line);
            self.path_line = Some(line);
        }
        self.camera
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::PointerDown { x, y } => self.handle_pointer(x, y),
            InputEvent::KeyDown { code } => self.handle_key(code),
        }
    }

    fn handle_pointer(&mut self, x: f32, y: f32) -> InputOutcome {
        let (width, height) = self.viewport;
        let hit = picker::pick(x, y, width as f32, height as f32, &self.camera, self.scene.objects());

        match hit {
            Some(object) => {
                log::info!("{}", welcome_message(&object.name));
                self.selection = Some(object.id);
                InputOutcome::Picked {
                    id: object.id,
                    name: object.name.clone(),
                }
            }
            None => {
                log::debug!("Pointer at ({x}, {y}) hit nothing");
                InputOutcome::Missed
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> InputOutcome {
        if let Some(direction) = code.direction() {
            self.controller.apply_discrete_move(direction);
            return InputOutcome::Moved;
        }

        let current = self.controller.state().scale;
        let requested = match code {
            KeyCode::ScaleDown => current / self.scale_factor,
            _ => current * self.scale_factor,
        };
        match self.controller.set_scale(requested) {
            Ok(()) => InputOutcome::Scaled { scale: requested },
            Err(_) => InputOutcome::Rejected,
        }
    }

    /// Track a new viewport size, the projection aspect follows
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.projection = self.camera.projection.with_aspect(width, height);
        log::debug!("Viewport resized to {width}x{height}");
    }

    /// Last picked object, misses keep the previous selection
    pub fn selection(&self) -> Option<&PickableObject> {
        self.selection.and_then(|id| self.scene.object(id))
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &NavigationState {
        self.controller.state()
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Set the path scale directly, same rules as the scale keys
    pub fn set_scale(&mut self, value: f32) -> Result<(), crate::error::ScaleError> {
        self.controller.set_scale(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::ControllerSettings;
    use crate::core::path::{ControlPath, PathClosure};
    use crate::scene::{BoundingVolume, SceneSink};
    use glam::{Mat4, Vec3};

    fn context() -> NavigationContext {
        let path = ControlPath::build(vec![Vec3::new(-5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)], PathClosure::Closed)
            .unwrap();
        let controller = CameraController::new(path, ControllerSettings::default());
        let mut scene = Scene::new();
        scene.add_line(Vec::new(), [1.0, 0.0, 0.0]);
        NavigationContext::new(controller, scene, (800, 600), Projection::default()).with_path_line(0, 4)
    }

    #[test]
    fn test_welcome_message_names_object_twice() {
        let text = welcome_message("P vs NP");
        assert!(text.starts_with("Welcome to P vs NP!"));
        assert!(text.contains("explore P vs NP and dive"));
    }

    #[test]
    fn test_path_line_drawn_on_construction() {
        let ctx = context();
        assert_eq!(ctx.scene().lines()[0].points.len(), 9);
        assert_eq!(ctx.scene().lines()[0].points[0], Vec3::new(-5.0, 0.0, 0.0));
    }

    #[test]
    fn test_scale_keys_rescale_path_line() {
        let mut ctx = context();
        assert_eq!(
            ctx.handle_input(InputEvent::KeyDown { code: KeyCode::ScaleUp }),
            InputOutcome::Scaled { scale: 1.1 }
        );
        ctx.handle_input(InputEvent::KeyDown { code: KeyCode::ScaleDown });
        ctx.handle_input(InputEvent::KeyDown { code: KeyCode::ScaleUp });
        ctx.frame(&FrameInfo::new(0, 0.0, 0.0));
        let first = ctx.scene().lines()[0].points[0];
        assert!((first.x + 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_arrow_key_moves() {
        let mut ctx = context();
        let outcome = ctx.handle_input(InputEvent::KeyDown { code: KeyCode::ArrowUp });
        assert_eq!(outcome, InputOutcome::Moved);
        assert_eq!(ctx.state().keyboard_offset, Vec3::Y);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut ctx = context();
        ctx.resize(1000, 500);
        assert_eq!(ctx.viewport(), (1000, 500));
        assert_eq!(ctx.camera().projection.aspect, 2.0);
    }

    #[test]
    fn test_zero_viewport_misses() {
        let mut ctx = context();
        ctx.resize(0, 0);
        assert_eq!(ctx.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 }), InputOutcome::Missed);
    }

    #[test]
    fn test_selection_survives_miss() {
        let path = ControlPath::build(vec![Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 5.0)], PathClosure::Closed)
            .unwrap();
        let settings = ControllerSettings {
            depth_offset: 0.0,
            ..Default::default()
        };
        let controller = CameraController::new(path, settings);
        let mut scene = Scene::new();
        let id = scene.add_object("Target", BoundingVolume::unit_sphere(), Mat4::IDENTITY, [0.0, 1.0, 0.0]);
        let mut ctx = NavigationContext::new(controller, scene, (800, 600), Projection::default());

        // Default pose looks down -Z from (0, 0, 5) at the sphere at the origin
        let picked = ctx.handle_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        assert_eq!(
            picked,
            InputOutcome::Picked {
                id,
                name: "Target".to_string()
            }
        );
        assert_eq!(ctx.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 }), InputOutcome::Missed);
        assert_eq!(ctx.selection().map(|o| o.id), Some(id));
    }
}
