//! Counter overlay shown while the pointer is over a slider.
//!
//! The overlay appears on enter and lingers after leave. Each leave hands out
//! a ticket; the hide timer only takes effect if its ticket is still the
//! latest, so re-entering before the timer fires keeps the overlay up even if
//! the timer itself could not be cancelled.

use crate::config::HOVER_LINGER_MS;
use crate::sync::Timer;
use std::cell::RefCell;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverOverlay {
    hovered: bool,
    visible: bool,
    generation: u64,
}

impl HoverOverlay {
    pub fn enter(&mut self) {
        self.hovered = true;
        self.visible = true;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns the ticket the delayed hide must present.
    pub fn leave(&mut self) -> u64 {
        self.hovered = false;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Hide the overlay if nothing happened since `ticket` was issued.
    pub fn hide_elapsed(&mut self, ticket: u64) -> bool {
        if ticket != self.generation || self.hovered {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Wait out the linger for `ticket`, then hide unless the pointer came back.
///
/// Returns `true` when the overlay was hidden.
pub async fn hide_after<T: Timer>(
    overlay: &RefCell<HoverOverlay>,
    ticket: u64,
    timer: &T,
) -> bool {
    timer.sleep(HOVER_LINGER_MS).await;
    overlay.borrow_mut().hide_elapsed(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock whose sleepers wake only when the test advances past their
    /// deadline.
    #[derive(Default)]
    struct ManualClock {
        now: Cell<u64>,
        sleepers: RefCell<Vec<(u64, oneshot::Sender<()>)>>,
    }

    impl ManualClock {
        fn advance_to(&self, at: u64) {
            self.now.set(at);
            let mut sleepers = self.sleepers.borrow_mut();
            let (due, pending): (Vec<_>, Vec<_>) = sleepers.drain(..).partition(|(deadline, _)| *deadline <= at);
            *sleepers = pending;
            for (_, wake) in due {
                let _ = wake.send(());
            }
        }
    }

    impl Timer for Rc<ManualClock> {
        async fn sleep(&self, ms: u32) {
            let (wake, woken) = oneshot::channel();
            self.sleepers
                .borrow_mut()
                .push((self.now.get() + ms as u64, wake));
            let _ = woken.await;
        }
    }

    fn leave_and_linger(
        pool: &LocalPool,
        overlay: &Rc<RefCell<HoverOverlay>>,
        clock: &Rc<ManualClock>,
    ) {
        let ticket = overlay.borrow_mut().leave();
        let overlay = overlay.clone();
        let clock = clock.clone();
        pool.spawner()
            .spawn_local(async move {
                hide_after(&overlay, ticket, &clock).await;
            })
            .expect("spawn hide");
    }

    #[test]
    fn overlay_lingers_for_the_full_delay() {
        let mut pool = LocalPool::new();
        let clock = Rc::new(ManualClock::default());
        let overlay = Rc::new(RefCell::new(HoverOverlay::default()));

        overlay.borrow_mut().enter();
        leave_and_linger(&pool, &overlay, &clock);
        pool.run_until_stalled();

        clock.advance_to(499);
        pool.run_until_stalled();
        assert!(overlay.borrow().is_visible());

        clock.advance_to(500);
        pool.run_until_stalled();
        assert!(!overlay.borrow().is_visible());
    }

    #[test]
    fn reentering_during_the_linger_keeps_it_visible() {
        let mut pool = LocalPool::new();
        let clock = Rc::new(ManualClock::default());
        let overlay = Rc::new(RefCell::new(HoverOverlay::default()));

        overlay.borrow_mut().enter();
        leave_and_linger(&pool, &overlay, &clock);
        pool.run_until_stalled();

        clock.advance_to(300);
        overlay.borrow_mut().enter();
        clock.advance_to(800);
        pool.run_until_stalled();
        assert!(overlay.borrow().is_visible());

        // leaving again restarts the full delay from 800
        leave_and_linger(&pool, &overlay, &clock);
        pool.run_until_stalled();
        clock.advance_to(1299);
        pool.run_until_stalled();
        assert!(overlay.borrow().is_visible());
        clock.advance_to(1300);
        pool.run_until_stalled();
        assert!(!overlay.borrow().is_visible());
    }

    #[test]
    fn stays_visible_until_the_linger_elapses() {
        let mut overlay = HoverOverlay::default();
        assert!(!overlay.is_visible());

        overlay.enter();
        let ticket = overlay.leave();
        assert!(overlay.is_visible());

        assert!(overlay.hide_elapsed(ticket));
        assert!(!overlay.is_visible());
    }

    #[test]
    fn reentering_cancels_the_pending_hide() {
        let mut overlay = HoverOverlay::default();
        overlay.enter();
        let stale = overlay.leave();
        overlay.enter();

        assert!(!overlay.hide_elapsed(stale));
        assert!(overlay.is_visible());

        let fresh = overlay.leave();
        assert!(!overlay.hide_elapsed(stale));
        assert!(overlay.hide_elapsed(fresh));
    }
}
