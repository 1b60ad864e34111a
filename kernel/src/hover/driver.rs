//! Runs the hover scheduler on tokio timers and publishes the visible popup.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use super::{HoverEffect, HoverPreviewScheduler, PreviewPopup, PreviewTimer};
use crate::domain::{BranchId, Position};
use crate::infrastructure::config::HoverSettings;
use crate::timers::TimerRegistry;

/// Timer-backed hover preview.
///
/// The visible popup is published on a watch channel. Must be used from
/// within a tokio runtime.
pub struct HoverPreviewDriver {
    scheduler: Arc<Mutex<HoverPreviewScheduler>>,
    timers: TimerRegistry<PreviewTimer>,
    popup: Arc<watch::Sender<Option<PreviewPopup>>>,
}

impl HoverPreviewDriver {
    /// Creates a driver with no popup.
    #[must_use]
    pub fn new(settings: HoverSettings) -> Self {
        let (popup, _) = watch::channel(None);
        Self {
            scheduler: Arc::new(Mutex::new(HoverPreviewScheduler::new(settings))),
            timers: TimerRegistry::new(),
            popup: Arc::new(popup),
        }
    }

    /// Watches the visible popup.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<PreviewPopup>> {
        self.popup.subscribe()
    }

    /// Returns the popup currently on screen.
    #[must_use]
    pub fn visible_popup(&self) -> Option<PreviewPopup> {
        self.popup.borrow().clone()
    }

    /// The pointer entered a branch card.
    pub fn card_entered(&mut self, branch_id: BranchId, anchor: Position) {
        self.apply(|scheduler| scheduler.card_entered(branch_id, anchor));
    }

    /// The pointer left a branch card.
    pub fn card_left(&mut self, branch_id: &BranchId) {
        self.apply(|scheduler| scheduler.card_left(branch_id));
    }

    /// The pointer entered the popup.
    pub fn popup_entered(&mut self) {
        self.apply(HoverPreviewScheduler::popup_entered);
    }

    /// The pointer left the popup.
    pub fn popup_left(&mut self) {
        self.apply(HoverPreviewScheduler::popup_left);
    }

    /// Closes the popup and stops both timers.
    pub fn dismiss(&mut self) {
        self.apply(HoverPreviewScheduler::dismiss);
    }

    /// Runs one transition and its effects under the scheduler lock, so a
    /// timer task never observes a state whose effects are still pending.
    fn apply<F>(&mut self, transition: F)
    where
        F: FnOnce(&mut HoverPreviewScheduler) -> Vec<HoverEffect>,
    {
        let scheduler = Arc::clone(&self.scheduler);
        let mut guard = scheduler.lock();
        let effects = transition(&mut *guard);
        self.run(effects);
    }

    fn run(&mut self, effects: Vec<HoverEffect>) {
        for effect in effects {
            match effect {
                HoverEffect::Arm {
                    timer,
                    delay,
                    generation,
                } => {
                    let scheduler = Arc::clone(&self.scheduler);
                    let popup = Arc::clone(&self.popup);
                    self.timers.arm(timer, delay, async move {
                        let mut guard = scheduler.lock();
                        for effect in guard.timer_fired(timer, generation) {
                            publish(&popup, effect);
                        }
                    });
                }
                HoverEffect::Cancel(timer) => {
                    self.timers.cancel(timer);
                }
                other => publish(&self.popup, other),
            }
        }
    }
}

fn publish(popup: &watch::Sender<Option<PreviewPopup>>, effect: HoverEffect) {
    match effect {
        HoverEffect::Show(shown) => {
            debug!(branch_id = %shown.branch_id, "Preview shown");
            popup.send_replace(Some(shown));
        }
        HoverEffect::Hide => {
            debug!("Preview hidden");
            popup.send_replace(None);
        }
        HoverEffect::Arm { .. } | HoverEffect::Cancel(_) => {}
    }
}
