use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::navigation::Direction;

/// Key codes the navigator reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ScaleUp,
    ScaleDown,
}

impl KeyCode {
    /// Discrete move bound to this key, if any
    pub fn direction(self) -> Option<Direction> {
        match self {
            KeyCode::ArrowUp => Some(Direction::Up),
            KeyCode::ArrowDown => Some(Direction::Down),
            KeyCode::ArrowLeft => Some(Direction::Left),
            KeyCode::ArrowRight => Some(Direction::Right),
            KeyCode::ScaleUp | KeyCode::ScaleDown => None,
        }
    }
}

/// Input delivered to the navigation context
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed at screen pixel `(x, y)`, y grows downward
    PointerDown { x: f32, y: f32 },
    KeyDown { code: KeyCode },
}

/// Bridges winit window events to [`InputEvent`]s
///
/// Tracks the cursor because winit reports button presses without a position.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    cursor: Option<(f32, f32)>,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Map one window event, updating cursor tracking on the way
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.cursor.map(|(x, y)| InputEvent::PointerDown { x, y }),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(code) => Self::map_keycode(code).map(|code| InputEvent::KeyDown { code }),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            _ => None,
        }
    }

    /// Map a winit key code, `None` for keys the navigator ignores
    pub fn map_keycode(code: WinitKeyCode) -> Option<KeyCode> {
        match code {
            WinitKeyCode::ArrowUp => Some(KeyCode::ArrowUp),
            WinitKeyCode::ArrowDown => Some(KeyCode::ArrowDown),
            WinitKeyCode::ArrowLeft => Some(KeyCode::ArrowLeft),
            WinitKeyCode::ArrowRight => Some(KeyCode::ArrowRight),
            WinitKeyCode::Equal | WinitKeyCode::NumpadAdd => Some(KeyCode::ScaleUp),
            WinitKeyCode::Minus | WinitKeyCode::NumpadSubtract => Some(KeyCode::ScaleDown),
            _ => None,
        }
    }
}
