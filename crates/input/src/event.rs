/// Physical keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    LeftCtrl,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Platform-neutral input event, translated by the host from its window system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
    /// Relative pointer motion in pixels.
    MouseMotion { dx: i32, dy: i32 },
    /// Wheel steps; positive is away from the user.
    MouseWheel { y: i32 },
    /// Window close or application quit request.
    Quit,
}
