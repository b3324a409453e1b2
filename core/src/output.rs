//! Output sinks for help text and verbose error messages.

use std::sync::{Arc, Mutex};

/// Prefix put in front of every verbose error message.
pub const OUTPUT_PREFIX: &str = "[parse-args] ";

/// Destination for text the parser prints on its own: help text when the
/// help option is given and argument errors in verbose mode.
///
/// Implemented for [`StdoutSink`], [`CaptureSink`] and any `Fn(&str)`.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
///
/// use parse_args_core::{Schema, parse_args_with};
///
/// let printed = RefCell::new(Vec::new());
/// let sink = |text: &str| printed.borrow_mut().push(text.to_string());
///
/// let schema = Schema::builder().help(true).build().unwrap();
/// parse_args_with(["--help"], &schema, &sink).unwrap();
/// assert_eq!(printed.borrow().len(), 1);
/// ```
pub trait OutputSink {
    fn print(&self, text: &str);
}

/// Any closure taking the text works as a sink.
impl<F: Fn(&str)> OutputSink for F {
    fn print(&self, text: &str) {
        self(text)
    }
}

/// Writes each message as a line on standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

/// One `println!` per message.
impl OutputSink for StdoutSink {
    fn print(&self, text: &str) {
        println!("{text}");
    }
}

/// Collects messages in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages printed so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Removes and returns the messages printed so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Appends to the shared buffer.
impl OutputSink for CaptureSink {
    fn print(&self, text: &str) {
        self.lock().push(text.to_string());
    }
}
