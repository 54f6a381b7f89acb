//! GodotLogger — core logging → godot_print!/godot_error!

use fps_player_simulation::{LogLevel, LogPrinter};

pub struct GodotLogger;

impl LogPrinter for GodotLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level == LogLevel::Error {
            godot::prelude::godot_error!("[{}] {}", level.as_str(), message);
        } else {
            godot::prelude::godot_print!("[{}] {}", level.as_str(), message);
        }
    }
}
