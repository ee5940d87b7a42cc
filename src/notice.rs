//! Transient user-facing notices.

use std::io::Write;

use crate::diff::ChangeSummary;

/// Receives a message for the user. Delivery is fire-and-forget.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Writes notices to stderr, or drops them when quiet.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        if self.quiet {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{message}\n");
    }
}

/// Keeps every notice; used where output must be inspected afterwards.
#[derive(Debug, Default, Clone)]
pub struct BufferedNotifier {
    messages: Vec<String>,
}

impl BufferedNotifier {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Notifier for BufferedNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// The notice shown after a document has been formatted.
pub fn summary_notice(name: &str, summary: &ChangeSummary) -> String {
    format!("{name}:\n\n{summary}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_notice_layout() {
        let notice = summary_notice("notes/a.md", &ChangeSummary::new(2, 1, 0));
        assert_eq!(
            notice,
            "notes/a.md:\n\n2 lines modified.\n1 line inserted.\n0 lines deleted."
        );
    }

    #[test]
    fn test_buffered_notifier_keeps_order() {
        let mut notifier = BufferedNotifier::default();
        notifier.notify("first");
        notifier.notify("second");
        assert_eq!(notifier.messages(), ["first", "second"]);
    }
}
