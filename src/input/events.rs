use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Pointer and keyboard input, already converted to map coordinates by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single click/tap
    Click {
        position: LatLng,
        button: MouseButton,
    },
    /// Secondary click; finishes a draw gesture
    ContextMenu { position: LatLng },
    /// Button pressed; may start a polygon drag
    PointerDown { position: LatLng },
    /// Mouse/finger move
    PointerMove { position: LatLng },
    /// Button released; ends any drag
    PointerUp { position: LatLng },
    /// Keyboard input
    KeyPress { key: KeyCode },
    /// Touch events; the first touch point drives the gesture
    Touch {
        event_type: TouchEventType,
        touches: Vec<TouchPoint>,
    },
}

/// Types of touch events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: LatLng,
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Escape,
    Enter,
    Other(u32),
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Whether an event was handled; a handled pointer-down must not pan the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl InputEvent {
    /// Checks if this is a touch event
    pub fn is_touch_event(&self) -> bool {
        matches!(self, InputEvent::Touch { .. })
    }

    /// Rewrites a single-finger touch as the equivalent pointer event
    pub fn to_pointer(&self) -> Option<InputEvent> {
        let InputEvent::Touch {
            event_type,
            touches,
        } = self
        else {
            return Some(self.clone());
        };
        let position = touches.first()?.position;
        Some(match event_type {
            TouchEventType::Start => InputEvent::PointerDown { position },
            TouchEventType::Move => InputEvent::PointerMove { position },
            TouchEventType::End | TouchEventType::Cancel => InputEvent::PointerUp { position },
        })
    }
}
