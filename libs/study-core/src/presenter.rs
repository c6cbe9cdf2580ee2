//! Status text shown beneath the matching board.

/// Renders a human-readable status line.
pub trait StatusPresenter {
    /// Replace the displayed status text.
    fn set_message(&mut self, text: &str);
}

/// In-memory status line holding the latest message.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: String,
    updates: usize,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of times the text was replaced.
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl StatusPresenter for StatusLine {
    fn set_message(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.updates += 1;
    }
}

impl<P: StatusPresenter + ?Sized> StatusPresenter for &mut P {
    fn set_message(&mut self, text: &str) {
        (**self).set_message(text);
    }
}
