use serde::{Deserialize, Serialize};

/// Interaction signals that count as genuine user activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PointerDown,
    PointerMove,
    KeyDown,
    TouchStart,
    Scroll,
    Wheel,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::PointerDown,
        ActivityKind::PointerMove,
        ActivityKind::KeyDown,
        ActivityKind::TouchStart,
        ActivityKind::Scroll,
        ActivityKind::Wheel,
    ];

    /// Map a host event name onto an activity kind.
    ///
    /// Both the mouse and pointer spellings are accepted. Anything else is
    /// not activity and yields `None`.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "mousedown" | "pointerdown" | "click" => Some(ActivityKind::PointerDown),
            "mousemove" | "pointermove" => Some(ActivityKind::PointerMove),
            "keydown" | "keypress" => Some(ActivityKind::KeyDown),
            "touchstart" => Some(ActivityKind::TouchStart),
            "scroll" => Some(ActivityKind::Scroll),
            "wheel" => Some(ActivityKind::Wheel),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::PointerDown => "pointer_down",
            ActivityKind::PointerMove => "pointer_move",
            ActivityKind::KeyDown => "key_down",
            ActivityKind::TouchStart => "touch_start",
            ActivityKind::Scroll => "scroll",
            ActivityKind::Wheel => "wheel",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
