use crate::core::constants::SPEED_STEP;

/// Studio-level actions reachable from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    TogglePause,
    NextEffect,
    PrevEffect,
    /// Relative change of the manual speed multiplier.
    Speed(f32),
    ResetSpeed,
    ToggleAutoAdjust,
    ToggleStats,
}

#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        " " => Some(Command::TogglePause),
        "ArrowRight" | "n" | "N" => Some(Command::NextEffect),
        "ArrowLeft" | "b" | "B" => Some(Command::PrevEffect),
        "+" | "=" | "ArrowUp" => Some(Command::Speed(SPEED_STEP)),
        "-" | "_" | "ArrowDown" => Some(Command::Speed(-SPEED_STEP)),
        "0" => Some(Command::ResetSpeed),
        "a" | "A" => Some(Command::ToggleAutoAdjust),
        "s" | "S" => Some(Command::ToggleStats),
        _ => None,
    }
}
