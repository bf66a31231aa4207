/// A navigation request decoded from a keyboard or wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    First,
    Last,
    Exit,
    ToggleFullscreen,
}

/// Map a DOM-style key name (`KeyboardEvent.key`) to a navigation command.
/// Only meaningful while a presentation mode is active; unmapped keys return
/// `None` and fall through to the editor.
pub fn command_for_key(key: &str) -> Option<NavCommand> {
    match key {
        "ArrowRight" | "PageDown" | " " | "Space" | "ArrowDown" => Some(NavCommand::Next),
        "ArrowLeft" | "PageUp" | "ArrowUp" => Some(NavCommand::Previous),
        "Home" => Some(NavCommand::First),
        "End" => Some(NavCommand::Last),
        "Escape" => Some(NavCommand::Exit),
        "f" | "F" => Some(NavCommand::ToggleFullscreen),
        _ => None,
    }
}

/// Wheel-down advances, wheel-up goes back. A zero delta is not a gesture.
pub fn command_for_wheel(delta_y: f64) -> Option<NavCommand> {
    if delta_y > 0.0 {
        Some(NavCommand::Next)
    } else if delta_y < 0.0 {
        Some(NavCommand::Previous)
    } else {
        None
    }
}
