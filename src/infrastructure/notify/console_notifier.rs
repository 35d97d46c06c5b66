//! Terminal rendering of notices.

use colored::Colorize;

use crate::application::notice::{Notice, NoticeKind, Notifier};

/// Prints notices to stderr, keeping stdout for command output.
///
/// Hide delays have no meaning on a terminal; notices with a delay are
/// rendered dimmed since they are only transient progress.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses informational notices; errors are always shown.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn render(notice: &Notice) -> String {
        match notice.kind {
            NoticeKind::Error => format!("✗ {}", notice.message).red().bold().to_string(),
            NoticeKind::Info if notice.hide_delay.is_some() => {
                notice.message.bright_black().to_string()
            }
            NoticeKind::Info => notice.message.cyan().to_string(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        tracing::trace!(message = %notice.message, kind = ?notice.kind, "Notice");
        if self.quiet && !notice.is_error() {
            return;
        }
        eprintln!("{}", Self::render(&notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_message() {
        colored::control::set_override(false);

        assert_eq!(
            ConsoleNotifier::render(&Notice::error("Something went wrong")),
            "✗ Something went wrong"
        );
        assert_eq!(ConsoleNotifier::render(&Notice::info("Done!")), "Done!");
    }
}
