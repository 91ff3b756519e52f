// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::NavigatorConfig;
use crate::core::navigation::{AdvanceMode, FollowMode};
use crate::core::path::PathClosure;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowArg {
    OffsetForward,
    LookAtOrigin,
}

impl From<FollowArg> for FollowMode {
    fn from(arg: FollowArg) -> Self {
        match arg {
            FollowArg::OffsetForward => FollowMode::OffsetForward,
            FollowArg::LookAtOrigin => FollowMode::LookAtOrigin,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceArg {
    FixedStep,
    WallClock,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureArg {
    Open,
    Closed,
}

impl From<ClosureArg> for PathClosure {
    fn from(arg: ClosureArg) -> Self {
        match arg {
            ClosureArg::Open => PathClosure::Open,
            ClosureArg::Closed => PathClosure::Closed,
        }
    }
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "curve-nav")]
#[command(about = "Fly a camera along a curve and pick objects with the pointer", long_about = None)]
pub struct Cli {
    /// JSON config file, flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Camera orientation while travelling
    #[arg(long, value_enum)]
    pub follow: Option<FollowArg>,

    /// How the path parameter advances each frame
    #[arg(long, value_enum)]
    pub advance: Option<AdvanceArg>,

    /// Parameter increment per frame for fixed-step advance
    #[arg(long)]
    pub step: Option<f32>,

    /// Seconds per lap for wall-clock advance
    #[arg(long)]
    pub period: Option<f32>,

    /// Whether the path loops back to its first point
    #[arg(long, value_enum)]
    pub closure: Option<ClosureArg>,

    /// Initial path scale
    #[arg(long)]
    pub scale: Option<f32>,

    /// Disable UI elements
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

const DEFAULT_PERIOD: f32 = 20.0;

impl Cli {
    /// Config file (or defaults) with command-line overrides, validated
    pub fn resolve_config(&self) -> Result<NavigatorConfig> {
        let mut config = match &self.config {
            Some(path) => NavigatorConfig::load(path)?,
            None => NavigatorConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut NavigatorConfig) {
        if let Some(follow) = self.follow {
            config.follow_mode = follow.into();
        }
        if let Some(closure) = self.closure {
            config.closure = closure.into();
        }
        if let Some(scale) = self.scale {
            config.initial_scale = scale;
        }

        config.advance = match (self.advance, config.advance) {
            (Some(AdvanceArg::FixedStep), AdvanceMode::WallClock { .. }) => AdvanceMode::default(),
            (Some(AdvanceArg::WallClock), AdvanceMode::FixedStep { .. }) => AdvanceMode::WallClock {
                period: DEFAULT_PERIOD,
            },
            (_, current) => current,
        };
        config.advance = match config.advance {
            AdvanceMode::FixedStep { step } => AdvanceMode::FixedStep {
                step: self.step.unwrap_or(step),
            },
            AdvanceMode::WallClock { period } => AdvanceMode::WallClock {
                period: self.period.unwrap_or(period),
            },
        };
    }
}
