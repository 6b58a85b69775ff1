use std::time::Duration;

use crate::selection::Field;

/// Quiet period after the last keystroke before a search goes out.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A scheduled callback that can be called off.
pub trait Cancel {
    fn cancel(self);
}

/// At most one pending search timer per field.
#[derive(Debug)]
pub struct PendingSearch<H> {
    start: Option<H>,
    end: Option<H>,
}

impl<H> Default for PendingSearch<H> {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
        }
    }
}

impl<H: Cancel> PendingSearch<H> {
    /// Stores `handle` for `field`, cancelling the timer it replaces.
    pub fn replace(&mut self, field: Field, handle: H) {
        if let Some(previous) = self.slot(field).replace(handle) {
            previous.cancel();
        }
    }

    pub fn cancel(&mut self, field: Field) {
        if let Some(previous) = self.slot(field).take() {
            previous.cancel();
        }
    }

    /// Forgets `field`'s timer once its callback has run.
    pub fn finish(&mut self, field: Field) {
        self.slot(field).take();
    }

    /// True from the keystroke that armed the timer until it fires or is
    /// cancelled.
    pub fn is_pending(&self, field: Field) -> bool {
        match field {
            Field::Start => self.start.is_some(),
            Field::End => self.end.is_some(),
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<H> {
        match field {
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
        }
    }
}
