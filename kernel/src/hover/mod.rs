//! Hover preview - debounced popups over branch cards.
//!
//! [`HoverPreviewScheduler`] is a pure state machine: every input returns the
//! effects to perform (arm or cancel a timer, show or hide the popup) and the
//! caller owns the clock. [`HoverPreviewDriver`] runs those effects on tokio
//! timers.
//!
//! ```text
//! Closed -> PendingOpen -> Open -> PendingClose -> Closed
//!                           ^            |
//!                           +-- re-entry +
//! ```

mod driver;

pub use driver::HoverPreviewDriver;

use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use crate::domain::{BranchId, Position};
use crate::infrastructure::config::HoverSettings;

/// The popup for one branch, anchored next to its card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewPopup {
    /// Previewed branch.
    pub branch_id: BranchId,
    /// Screen anchor of the popup.
    pub anchor: Position,
}

/// Hover state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HoverState {
    /// No popup.
    #[default]
    Closed,
    /// Waiting for the open delay.
    PendingOpen(PreviewPopup),
    /// Popup visible.
    Open(PreviewPopup),
    /// Popup visible, waiting for the close delay.
    PendingClose(PreviewPopup),
}

/// The two debounce timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewTimer {
    /// Fires to open the popup.
    Open,
    /// Fires to close the popup.
    Close,
}

/// Side effect requested by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEffect {
    /// Start a timer, replacing any running timer of that kind.
    Arm {
        /// Timer to start.
        timer: PreviewTimer,
        /// Time until it fires.
        delay: Duration,
        /// Arming counter to pass back to `timer_fired`.
        generation: u64,
    },
    /// Stop a timer.
    Cancel(PreviewTimer),
    /// Show this popup.
    Show(PreviewPopup),
    /// Hide the visible popup.
    Hide,
}

/// Debounce state machine for the hover preview.
///
/// At most one popup and one timer are live at a time. Each arming gets a
/// fresh generation; a firing is honoured only for the latest arming of its
/// timer that has not been cancelled.
#[derive(Debug, Clone)]
pub struct HoverPreviewScheduler {
    settings: HoverSettings,
    state: HoverState,
    generation: u64,
    open_timer: Option<u64>,
    close_timer: Option<u64>,
}

impl HoverPreviewScheduler {
    /// Creates a closed scheduler.
    #[must_use]
    pub fn new(settings: HoverSettings) -> Self {
        Self {
            settings,
            state: HoverState::Closed,
            generation: 0,
            open_timer: None,
            close_timer: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &HoverState {
        &self.state
    }

    /// Returns the popup currently on screen.
    #[must_use]
    pub const fn visible_popup(&self) -> Option<&PreviewPopup> {
        match &self.state {
            HoverState::Open(popup) | HoverState::PendingClose(popup) => Some(popup),
            HoverState::Closed | HoverState::PendingOpen(_) => None,
        }
    }

    /// The pointer entered a branch card.
    pub fn card_entered(&mut self, branch_id: BranchId, anchor: Position) -> Vec<HoverEffect> {
        let popup = PreviewPopup { branch_id, anchor };
        match std::mem::take(&mut self.state) {
            HoverState::Closed => self.pend_open(popup, Vec::new()),
            HoverState::PendingOpen(current) if current.branch_id == popup.branch_id => {
                self.state = HoverState::PendingOpen(current);
                Vec::new()
            }
            HoverState::PendingOpen(_) => {
                let cancel = self.cancel(PreviewTimer::Open);
                self.pend_open(popup, vec![cancel])
            }
            HoverState::Open(current) if current.branch_id == popup.branch_id => {
                self.state = HoverState::Open(current);
                Vec::new()
            }
            HoverState::Open(_) => self.pend_open(popup, vec![HoverEffect::Hide]),
            HoverState::PendingClose(current) if current.branch_id == popup.branch_id => {
                self.state = HoverState::Open(current);
                vec![self.cancel(PreviewTimer::Close)]
            }
            HoverState::PendingClose(_) => {
                let cancel = self.cancel(PreviewTimer::Close);
                self.pend_open(popup, vec![cancel, HoverEffect::Hide])
            }
        }
    }

    /// The pointer left a branch card.
    pub fn card_left(&mut self, branch_id: &BranchId) -> Vec<HoverEffect> {
        match std::mem::take(&mut self.state) {
            HoverState::PendingOpen(current) if &current.branch_id == branch_id => {
                vec![self.cancel(PreviewTimer::Open)]
            }
            HoverState::Open(current) if &current.branch_id == branch_id => self.pend_close(current),
            other => {
                self.state = other;
                Vec::new()
            }
        }
    }

    /// The pointer entered the visible popup.
    pub fn popup_entered(&mut self) -> Vec<HoverEffect> {
        match std::mem::take(&mut self.state) {
            HoverState::PendingClose(current) => {
                self.state = HoverState::Open(current);
                vec![self.cancel(PreviewTimer::Close)]
            }
            other => {
                self.state = other;
                Vec::new()
            }
        }
    }

    /// The pointer left the visible popup.
    pub fn popup_left(&mut self) -> Vec<HoverEffect> {
        match std::mem::take(&mut self.state) {
            HoverState::Open(current) => self.pend_close(current),
            other => {
                self.state = other;
                Vec::new()
            }
        }
    }

    /// A timer fired.
    ///
    /// `generation` is the one carried by the `Arm` effect that started the
    /// timer. Firings of replaced or cancelled armings are ignored.
    pub fn timer_fired(&mut self, timer: PreviewTimer, generation: u64) -> Vec<HoverEffect> {
        if *self.slot(timer) != Some(generation) {
            trace!(?timer, generation, "Stale preview timer ignored");
            return Vec::new();
        }
        *self.slot(timer) = None;
        match (timer, std::mem::take(&mut self.state)) {
            (PreviewTimer::Open, HoverState::PendingOpen(popup)) => {
                self.state = HoverState::Open(popup.clone());
                vec![HoverEffect::Show(popup)]
            }
            (PreviewTimer::Close, HoverState::PendingClose(_)) => vec![HoverEffect::Hide],
            (_, other) => {
                self.state = other;
                Vec::new()
            }
        }
    }

    /// Closes everything immediately, e.g. when the canvas pans.
    pub fn dismiss(&mut self) -> Vec<HoverEffect> {
        match std::mem::take(&mut self.state) {
            HoverState::Closed => Vec::new(),
            HoverState::PendingOpen(_) => vec![self.cancel(PreviewTimer::Open)],
            HoverState::Open(_) => vec![HoverEffect::Hide],
            HoverState::PendingClose(_) => vec![self.cancel(PreviewTimer::Close), HoverEffect::Hide],
        }
    }

    fn pend_open(&mut self, popup: PreviewPopup, mut effects: Vec<HoverEffect>) -> Vec<HoverEffect> {
        self.state = HoverState::PendingOpen(popup);
        effects.push(self.arm(PreviewTimer::Open));
        effects
    }

    fn pend_close(&mut self, popup: PreviewPopup) -> Vec<HoverEffect> {
        self.state = HoverState::PendingClose(popup);
        vec![self.arm(PreviewTimer::Close)]
    }

    fn arm(&mut self, timer: PreviewTimer) -> HoverEffect {
        self.generation += 1;
        let generation = self.generation;
        *self.slot(timer) = Some(generation);
        let delay = match timer {
            PreviewTimer::Open => self.settings.open_delay(),
            PreviewTimer::Close => self.settings.close_delay(),
        };
        HoverEffect::Arm {
            timer,
            delay,
            generation,
        }
    }

    fn cancel(&mut self, timer: PreviewTimer) -> HoverEffect {
        *self.slot(timer) = None;
        HoverEffect::Cancel(timer)
    }

    fn slot(&mut self, timer: PreviewTimer) -> &mut Option<u64> {
        match timer {
            PreviewTimer::Open => &mut self.open_timer,
            PreviewTimer::Close => &mut self.close_timer,
        }
    }
}
