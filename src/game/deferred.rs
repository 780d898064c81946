//! Narrative beats that fire a fixed time after they are scheduled.
//!
//! Nothing is ever cancelled. Each action carries what it needs and is
//! checked against the current phase when it comes due.

use crate::map::Zone;

use super::GamePhase;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeferredAction {
    AreaNarrative(Zone),
    LensClarity,
    ChapterEnd,
    ChapterTeaser,
    SecondFlash,
    Thunder,
    FinalFade,
}

impl DeferredAction {
    pub fn still_valid(self, phase: GamePhase) -> bool {
        match self {
            DeferredAction::FinalFade => matches!(phase, GamePhase::GameOver(_)),
            DeferredAction::ChapterTeaser => phase == GamePhase::ChapterEnd,
            _ => !phase.is_terminal(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pending {
    due: f64,
    order: u64,
    action: DeferredAction,
}

#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<Pending>,
    now: f64,
    next_order: u64,
}

impl DeferredQueue {
    pub fn schedule(&mut self, delay: f64, action: DeferredAction) {
        self.pending.push(Pending {
            due: self.now + delay.max(0.0),
            order: self.next_order,
            action,
        });
        self.next_order += 1;
    }

    /// Advances the queue clock and returns due actions in firing order.
    pub fn advance(&mut self, dt: f64) -> Vec<DeferredAction> {
        self.now += dt;
        let now = self.now;
        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.order.cmp(&b.order)));
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EndReason;

    #[test]
    fn test_actions_fire_after_their_delay_in_order() {
        let mut queue = DeferredQueue::default();
        queue.schedule(0.08, DeferredAction::SecondFlash);
        queue.schedule(0.05, DeferredAction::Thunder);
        queue.schedule(2.0, DeferredAction::LensClarity);
        assert!(queue.advance(0.04).is_empty());
        assert_eq!(
            queue.advance(0.05),
            vec![DeferredAction::Thunder, DeferredAction::SecondFlash]
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.advance(2.0), vec![DeferredAction::LensClarity]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_guards_follow_the_phase() {
        let over = GamePhase::GameOver(EndReason::Sanity);
        assert!(!DeferredAction::LensClarity.still_valid(over));
        assert!(DeferredAction::FinalFade.still_valid(over));
        assert!(!DeferredAction::FinalFade.still_valid(GamePhase::Playing));
        assert!(DeferredAction::ChapterTeaser.still_valid(GamePhase::ChapterEnd));
        assert!(DeferredAction::AreaNarrative(Zone::TownSquare).still_valid(GamePhase::Dialogue));
    }
}
