use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::CameraPose;
use super::path::{ControlPath, PathClosure};
use crate::error::ScaleError;
use crate::frame::FrameInfo;

/// How the camera orients itself while travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FollowMode {
    /// Look along the direction of travel
    #[default]
    OffsetForward,
    /// Keep the scene origin centred
    LookAtOrigin,
}

/// How the path parameter moves from one tick to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum AdvanceMode {
    /// Constant increment per tick, ignores elapsed time
    FixedStep { step: f32 },
    /// `t = (time / period) mod 1`, frame-rate independent
    WallClock { period: f32 },
}

impl Default for AdvanceMode {
    fn default() -> Self {
        Self::FixedStep { step: 0.001 }
    }
}

/// Discrete nudge direction, world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(self) -> Vec3 {
        match self {
            Direction::Up => Vec3::Y,
            Direction::Down => Vec3::NEG_Y,
            Direction::Left => Vec3::NEG_X,
            Direction::Right => Vec3::X,
        }
    }
}

/// Tunables for [`CameraController`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub follow_mode: FollowMode,
    pub advance: AdvanceMode,
    /// Added to the camera z so it rides above the curve
    pub depth_offset: f32,
    /// Distance of one discrete move
    pub nudge_step: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            follow_mode: FollowMode::default(),
            advance: AdvanceMode::default(),
            depth_offset: 10.0,
            nudge_step: 1.0,
        }
    }
}

/// Headroom multiplier on the path's reach when bounding the scale
///
/// Covers Hermite overshoot between knots plus the unscaled offsets.
const SCALE_HEADROOM: f32 = 4.0;

/// Per-session navigation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    /// Traversal phase in `[0, 1)`
    ///
    /// Equals the curve parameter on closed paths. Open paths are ridden out
    /// and back, so there the curve parameter is `1 - |2t - 1|` instead.
    pub path_parameter: f32,
    /// Sum of all discrete moves
    pub keyboard_offset: Vec3,
    /// Uniform scale about the path centroid, always > 0
    pub scale: f32,
    pub ticks: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            path_parameter: 0.0,
            keyboard_offset: Vec3::ZERO,
            scale: 1.0,
            ticks: 0,
        }
    }
}

fn wrap_unit(t: f32) -> f32 {
    let wrapped = t.rem_euclid(1.0);
    if wrapped.is_finite() && wrapped < 1.0 {
        wrapped
    } else {
        0.0
    }
}

/// Moves the camera along a path and merges in discrete nudges
pub struct CameraController {
    path: ControlPath,
    center: Vec3,
    /// Largest distance from `center` to a control point
    reach: f32,
    settings: ControllerSettings,
    state: NavigationState,
    pose: CameraPose,
}

impl CameraController {
    pub fn new(path: ControlPath, settings: ControllerSettings) -> Self {
        let center = path.centroid();
        let reach = path
            .points()
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);
        let mut controller = Self {
            path,
            center,
            reach,
            settings,
            state: NavigationState::default(),
            pose: CameraPose::default(),
        };
        controller.pose = controller.compose_pose();
        controller
    }

    pub fn path(&self) -> &ControlPath {
        &self.path
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Scaling anchor, the path's geometric center
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Advance, sample, offset, orient, in that order
    pub fn tick(&mut self, frame: &FrameInfo) -> CameraPose {
        self.advance(frame);
        self.pose = self.compose_pose();
        self.state.ticks += 1;

        log::trace!(
            "tick {} t={:.4} pos={:?}",
            self.state.ticks,
            self.state.path_parameter,
            self.pose.position
        );
        self.pose
    }

    fn advance(&mut self, frame: &FrameInfo) {
        self.state.path_parameter = match self.settings.advance {
            AdvanceMode::FixedStep { step } => wrap_unit(self.state.path_parameter + step),
            AdvanceMode::WallClock { period } if period > 0.0 => wrap_unit(frame.time / period),
            AdvanceMode::WallClock { .. } => self.state.path_parameter,
        };
    }

    /// Curve parameter for the navigation parameter, plus travel sign
    ///
    /// Open paths are ridden out and back so the wrap never jumps.
    fn curve_parameter(&self, t: f32) -> (f32, f32) {
        match self.path.closure() {
            PathClosure::Closed => (t, 1.0),
            PathClosure::Open => {
                let s = 1.0 - (2.0 * t - 1.0).abs();
                (s, if t <= 0.5 { 1.0 } else { -1.0 })
            }
        }
    }

    /// Path point after scaling about the centroid
    pub fn scaled_point(&self, point: Vec3) -> Vec3 {
        self.center + (point - self.center) * self.state.scale
    }

    fn compose_pose(&self) -> CameraPose {
        let (s, travel_sign) = self.curve_parameter(self.state.path_parameter);
        let base = self.scaled_point(self.path.sample(s));
        let position = base + self.state.keyboard_offset + Vec3::Z * self.settings.depth_offset;
        if !position.is_finite() {
            log::warn!("Composed camera position {position:?} is not finite, keeping previous pose");
            return self.pose;
        }

        let previous = self.pose.forward();
        let direction = match self.settings.follow_mode {
            FollowMode::OffsetForward => self.path.tangent(s) * travel_sign,
            FollowMode::LookAtOrigin => -position,
        };
        let direction = direction.try_normalize().unwrap_or(previous);

        CameraPose::looking_along(position, direction)
    }

    /// Nudge the camera one step along a world axis, accumulates without bound
    pub fn apply_discrete_move(&mut self, direction: Direction) {
        self.state.keyboard_offset += direction.axis() * self.settings.nudge_step;
        log::debug!("Moved {:?}, offset now {:?}", direction, self.state.keyboard_offset);
    }

    /// Set the path scale, the previous value stays on error
    pub fn set_scale(&mut self, value: f32) -> Result<(), ScaleError> {
        if !(value.is_finite() && value > 0.0) {
            log::warn!("Rejected scale {value}, keeping {}", self.state.scale);
            return Err(ScaleError::NonPositive(value));
        }
        let extent = (self.reach * SCALE_HEADROOM + self.center.abs().max_element()) * value.max(1.0);
        if !extent.is_finite() {
            log::warn!("Rejected scale {value}, path would leave f32 range");
            return Err(ScaleError::OutOfRange(value));
        }
        self.state.scale = value;
        log::info!("Path scale set to {value}");
        Ok(())
    }

    /// Travel path tessellated and scaled for drawing
    pub fn scaled_polyline(&self, segments_per_span: usize) -> Vec<Vec3> {
        self.path
            .polyline(segments_per_span)
            .into_iter()
            .map(|p| self.scaled_point(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(closure: PathClosure) -> ControlPath {
        ControlPath::build(
            vec![
                Vec3::new(-10.0, 0.0, 0.0),
                Vec3::new(-5.0, 5.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(5.0, -5.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
            ],
            closure,
        )
        .unwrap()
    }

    fn frame(number: u64, time: f32) -> FrameInfo {
        FrameInfo::new(number, time, 1.0 / 60.0)
    }

    #[test]
    fn test_initial_state() {
        let controller = CameraController::new(zigzag(PathClosure::Closed), ControllerSettings::default());
        assert_eq!(*controller.state(), NavigationState::default());
        assert_eq!(controller.pose().position, Vec3::new(-10.0, 0.0, 10.0));
    }

    #[test]
    fn test_fixed_step_advances_per_tick() {
        let settings = ControllerSettings {
            advance: AdvanceMode::FixedStep { step: 0.25 },
            ..Default::default()
        };
        let mut controller = CameraController::new(zigzag(PathClosure::Closed), settings);
        controller.tick(&frame(0, 100.0));
        controller.tick(&frame(1, 0.0));
        assert_eq!(controller.state().path_parameter, 0.5);
        controller.tick(&frame(2, 0.0));
        controller.tick(&frame(3, 0.0));
        assert_eq!(controller.state().path_parameter, 0.0);
        assert_eq!(controller.state().ticks, 4);
    }

    #[test]
    fn test_wall_clock_uses_time() {
        let settings = ControllerSettings {
            advance: AdvanceMode::WallClock { period: 10.0 },
            ..Default::default()
        };
        let mut controller = CameraController::new(zigzag(PathClosure::Closed), settings);
        controller.tick(&frame(0, 2.5));
        assert!((controller.state().path_parameter - 0.25).abs() < 1e-6);
        controller.tick(&frame(1, 12.5));
        assert!((controller.state().path_parameter - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_open_path_turns_around() {
        let settings = ControllerSettings {
            advance: AdvanceMode::FixedStep { step: 0.5 },
            ..Default::default()
        };
        let mut controller = CameraController::new(zigzag(PathClosure::Open), settings);
        let pose = controller.tick(&frame(0, 0.0));
        assert_eq!(pose.position, Vec3::new(10.0, 0.0, 10.0));
        let pose = controller.tick(&frame(1, 0.0));
        assert_eq!(pose.position, Vec3::new(-10.0, 0.0, 10.0));
    }

    #[test]
    fn test_discrete_moves_accumulate() {
        let mut controller = CameraController::new(zigzag(PathClosure::Closed), ControllerSettings::default());
        controller.apply_discrete_move(Direction::Up);
        controller.apply_discrete_move(Direction::Up);
        controller.apply_discrete_move(Direction::Left);
        assert_eq!(controller.state().keyboard_offset, Vec3::new(-1.0, 2.0, 0.0));
        controller.apply_discrete_move(Direction::Down);
        controller.apply_discrete_move(Direction::Right);
        assert_eq!(controller.state().keyboard_offset, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_set_scale_rejects_non_positive() {
        let mut controller = CameraController::new(zigzag(PathClosure::Closed), ControllerSettings::default());
        assert!(controller.set_scale(2.0).is_ok());
        assert_eq!(controller.set_scale(0.0), Err(ScaleError::NonPositive(0.0)));
        assert!(controller.set_scale(-1.0).is_err());
        assert!(controller.set_scale(f32::NAN).is_err());
        assert_eq!(controller.state().scale, 2.0);
    }

    #[test]
    fn test_set_scale_rejects_overflowing_values() {
        let mut controller = CameraController::new(zigzag(PathClosure::Closed), ControllerSettings::default());
        controller.set_scale(2.0).unwrap();
        assert_eq!(controller.set_scale(1e38), Err(ScaleError::OutOfRange(1e38)));
        assert_eq!(controller.state().scale, 2.0);

        let pose = controller.tick(&frame(0, 0.0));
        assert!(pose.is_finite());
    }

    #[test]
    fn test_non_finite_position_keeps_previous_pose() {
        let settings = ControllerSettings {
            nudge_step: f32::MAX,
            ..Default::default()
        };
        let mut controller = CameraController::new(zigzag(PathClosure::Closed), settings);
        let before = controller.tick(&frame(0, 0.0));
        controller.apply_discrete_move(Direction::Up);
        controller.apply_discrete_move(Direction::Up);

        let pose = controller.tick(&frame(1, 0.0));
        assert!(pose.is_finite());
        assert_eq!(pose, before);
    }

    #[test]
    fn test_look_at_origin_faces_origin() {
        let settings = ControllerSettings {
            follow_mode: FollowMode::LookAtOrigin,
            ..Default::default()
        };
        let mut controller = CameraController::new(zigzag(PathClosure::Closed), settings);
        let pose = controller.tick(&frame(0, 0.0));
        let expected = (-pose.position).normalize();
        assert!((pose.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn test_look_at_origin_on_origin_keeps_direction() {
        let path = ControlPath::build(vec![Vec3::ZERO, Vec3::ZERO], PathClosure::Open).unwrap();
        let settings = ControllerSettings {
            follow_mode: FollowMode::LookAtOrigin,
            depth_offset: 0.0,
            ..Default::default()
        };
        let mut controller = CameraController::new(path, settings);
        let before = controller.pose().forward();
        let pose = controller.tick(&frame(0, 0.0));
        assert_eq!(pose.position, Vec3::ZERO);
        assert_eq!(pose.forward(), before);
        assert!(pose.is_finite());
    }

    #[test]
    fn test_scaled_polyline_keeps_center() {
        let mut controller = CameraController::new(zigzag(PathClosure::Open), ControllerSettings::default());
        controller.set_scale(3.0).unwrap();
        let line = controller.scaled_polyline(4);
        assert_eq!(line[0], Vec3::new(-30.0, 0.0, 0.0));
        assert_eq!(*line.last().unwrap(), Vec3::new(30.0, 0.0, 0.0));
    }
}
