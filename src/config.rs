//! Navigator configuration, loaded from JSON with every field optional.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::camera::Projection;
use crate::core::context::NavigationContext;
use crate::core::navigation::{AdvanceMode, CameraController, ControllerSettings, FollowMode};
use crate::core::path::{ControlPath, PathClosure};
use crate::error::{NavError, PathError};
use crate::scenes::{create_problem_scene, PATH_LINE};

/// Control points of the original travel curve
pub const DEFAULT_CONTROL_POINTS: [[f32; 3]; 5] = [
    [-10.0, 0.0, 0.0],
    [-5.0, 5.0, 0.0],
    [0.0, 0.0, 0.0],
    [5.0, -5.0, 0.0],
    [10.0, 0.0, 0.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub follow_mode: FollowMode,
    pub advance: AdvanceMode,
    pub closure: PathClosure,
    pub control_points: Vec<[f32; 3]>,
    /// Camera height above the curve along +Z
    pub depth_offset: f32,
    /// Distance of one arrow-key move
    pub nudge_step: f32,
    pub initial_scale: f32,
    /// Multiplier applied by the scale keys
    pub scale_factor: f32,
    /// Drawing resolution of the curve between control points
    pub segments_per_span: usize,
    pub projection: Projection,
    pub window: WindowConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            follow_mode: FollowMode::default(),
            advance: AdvanceMode::default(),
            closure: PathClosure::default(),
            control_points: DEFAULT_CONTROL_POINTS.to_vec(),
            depth_offset: 10.0,
            nudge_step: 1.0,
            initial_scale: 1.0,
            scale_factor: 1.1,
            segments_per_span: 12,
            projection: Projection::default(),
            window: WindowConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// Load a JSON config file, missing fields use defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read config file {path:?}"))?;
        let config: Self =
            serde_json::from_str(&content).with_context(|| format!("Failed to parse config file {path:?}"))?;
        config.validate()?;
        log::info!("Loaded config from {path:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(NavError::Config(format!("{name} must be positive, got {value}")))
            }
        };

        match self.advance {
            AdvanceMode::FixedStep { step } => positive("advance.step", step)?,
            AdvanceMode::WallClock { period } => positive("advance.period", period)?,
        }
        positive("nudge_step", self.nudge_step)?;
        positive("initial_scale", self.initial_scale)?;
        positive("scale_factor", self.scale_factor)?;
        positive("projection.fov_y_degrees", self.projection.fov_y_degrees)?;
        positive("projection.near", self.projection.near)?;

        if !self.depth_offset.is_finite() {
            return Err(NavError::Config("depth_offset must be finite".to_string()));
        }
        if self.projection.fov_y_degrees >= 180.0 {
            return Err(NavError::Config("projection.fov_y_degrees must be below 180".to_string()));
        }
        if self.projection.far <= self.projection.near {
            return Err(NavError::Config("projection.far must exceed projection.near".to_string()));
        }
        if self.segments_per_span == 0 {
            return Err(NavError::Config("segments_per_span must be at least 1".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(NavError::Config("window size must be non-zero".to_string()));
        }

        // Surface path problems before anything is built
        self.build_path()?;
        Ok(())
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            follow_mode: self.follow_mode,
            advance: self.advance,
            depth_offset: self.depth_offset,
            nudge_step: self.nudge_step,
        }
    }

    pub fn build_path(&self) -> Result<ControlPath, PathError> {
        let points = self.control_points.iter().copied().map(Vec3::from_array).collect();
        ControlPath::build(points, self.closure)
    }

    pub fn projection_for_window(&self) -> Projection {
        self.projection.with_aspect(self.window.width, self.window.height)
    }

    /// Problem scene and controller wired into a ready navigation context
    pub fn build_context(&self) -> Result<NavigationContext, NavError> {
        let path = self.build_path()?;
        let scene = create_problem_scene(&path);
        let mut controller = CameraController::new(path, self.controller_settings());
        controller.set_scale(self.initial_scale)?;

        let viewport = (self.window.width, self.window.height);
        Ok(NavigationContext::new(controller, scene, viewport, self.projection)
            .with_scale_factor(self.scale_factor)
            .with_path_line(PATH_LINE, self.segments_per_span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_viewer() {
        let config = NavigatorConfig::default();
        assert_eq!(config.advance, AdvanceMode::FixedStep { step: 0.001 });
        assert_eq!(config.depth_offset, 10.0);
        assert_eq!(config.nudge_step, 1.0);
        assert_eq!(config.projection.fov_y_degrees, 75.0);
        assert_eq!(config.control_points.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NavigatorConfig = serde_json::from_str(
            r#"{
                "follow_mode": "look-at-origin",
                "advance": { "mode": "wall-clock", "period": 20.0 },
                "closure": "open"
            }"#,
        )
        .unwrap();
        assert_eq!(config.follow_mode, FollowMode::LookAtOrigin);
        assert_eq!(config.advance, AdvanceMode::WallClock { period: 20.0 });
        assert_eq!(config.closure, PathClosure::Open);
        assert_eq!(config.window, WindowConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = NavigatorConfig {
            advance: AdvanceMode::FixedStep { step: 0.0 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NavError::Config(_))));

        let config = NavigatorConfig {
            initial_scale: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NavigatorConfig {
            control_points: vec![[0.0, 0.0, 0.0]],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(NavError::Path(PathError::TooFewPoints { got: 1 }))
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = NavigatorConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_round_trip_file() {
        let path = std::env::temp_dir().join(format!("curve-nav-config-{}.json", std::process::id()));
        let config = NavigatorConfig {
            nudge_step: 2.5,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = NavigatorConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_build_context_applies_initial_scale() {
        let config = NavigatorConfig {
            initial_scale: 2.0,
            closure: PathClosure::Open,
            ..Default::default()
        };
        let ctx = config.build_context().unwrap();
        assert_eq!(ctx.state().scale, 2.0);
        assert_eq!(ctx.scene().objects().len(), 3);
        assert_eq!(ctx.scene().lines()[PATH_LINE].points[0], Vec3::new(-20.0, 0.0, 0.0));
    }

    #[test]
    fn test_projection_for_window() {
        let config = NavigatorConfig {
            window: WindowConfig { width: 1000, height: 500 },
            ..Default::default()
        };
        assert_eq!(config.projection_for_window().aspect, 2.0);
    }
}
