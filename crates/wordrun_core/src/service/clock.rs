//! Wall-clock date sources.

use crate::model::date_key::DateKey;
use std::cell::Cell;

/// Source of today's calendar-day key.
pub trait Clock {
    fn today(&self) -> DateKey;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> DateKey {
        (**self).today()
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        DateKey::today()
    }
}

/// Clock pinned to a settable day, for replays and tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<DateKey>,
}

impl FixedClock {
    pub fn new(today: DateKey) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    /// Moves the clock to `today`.
    pub fn set(&self, today: DateKey) {
        self.today.set(today);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DateKey {
        self.today.get()
    }
}
