//! Status messages on stderr.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;

static COLORS: AtomicBool = AtomicBool::new(true);

/// Decide once whether status messages are colored.
///
/// `--no-color` and `NO_COLOR` disable colors, `FORCE_COLOR` enables them
/// even when stderr is not a terminal.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended_stderr()
}

fn colors() -> bool {
    COLORS.load(Ordering::Relaxed)
}

pub fn success(message: &str) {
    if colors() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {}", message);
    }
}

pub fn info(message: &str) {
    if colors() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {}", message);
    }
}

pub fn warning(message: &str) {
    if colors() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

pub fn error(message: &str) {
    if colors() {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    } else {
        eprintln!("✗ {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_flag_disables_colors() {
        init_colors(true);
        assert!(!colors());
    }

    #[test]
    #[serial]
    fn test_no_color_env() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        let enabled = should_use_color();
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
        assert!(!enabled);
    }

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
    }
}
