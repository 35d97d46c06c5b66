//! Notice sinks.

pub mod console_notifier;

pub use console_notifier::ConsoleNotifier;
