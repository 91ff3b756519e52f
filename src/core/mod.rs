pub mod camera;
pub mod clock;
pub mod context;
pub mod input;
pub mod navigation;
pub mod path;
pub mod picker;
pub mod scheduler;

pub use camera::{Camera, CameraPose, Projection};
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use context::{welcome_message, InputOutcome, NavigationContext};
pub use input::{InputEvent, KeyCode, WinitInput};
pub use navigation::{AdvanceMode, CameraController, ControllerSettings, Direction, FollowMode, NavigationState};
pub use path::{ControlPath, PathClosure};
pub use picker::{pick, pick_hit, PickHit};
pub use scheduler::{FrameScheduler, SchedulerHandle};
