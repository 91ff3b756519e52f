pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod math;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod scenes;

pub use config::NavigatorConfig;
pub use error::{NavError, PathError, ScaleError};
pub use scenes::create_problem_scene;
