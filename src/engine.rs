// Game engine API boundary. Agents (bots, UI-driven humans) read the table and
// act through this trait without touching session internals. It is implemented
// for `GameSession`.

use crate::config::SeatId;
use crate::game::{ActionOutcome, GameError, GameSession, PlayerAction, Stage};
use crate::hand::{Board, HoleCards};

pub trait GameEngine {
    fn apply_action(
        &mut self,
        seat: SeatId,
        action: PlayerAction,
    ) -> Result<ActionOutcome, GameError>;

    // Queries
    fn to_call(&self, seat: SeatId) -> u64;
    fn current_bet(&self) -> u64;
    fn raise_count(&self) -> u32;
    fn pot(&self) -> u64;
    fn small_blind(&self) -> u64;
    fn big_blind(&self) -> u64;
    fn hole_cards(&self, seat: SeatId) -> Option<HoleCards>;
    fn board(&self) -> &Board;
    fn chips(&self, seat: SeatId) -> u64;
    fn current_player(&self) -> SeatId;
    fn dealer(&self) -> SeatId;
    fn stage(&self) -> Stage;
    fn active_count(&self) -> usize;
}

impl GameEngine for GameSession {
    fn apply_action(
        &mut self,
        seat: SeatId,
        action: PlayerAction,
    ) -> Result<ActionOutcome, GameError> {
        GameSession::apply_action(self, seat, action)
    }

    fn to_call(&self, seat: SeatId) -> u64 {
        GameSession::to_call(self, seat)
    }
    fn current_bet(&self) -> u64 {
        self.table().current_bet()
    }
    fn raise_count(&self) -> u32 {
        self.table().raise_count()
    }
    fn pot(&self) -> u64 {
        self.table().pot()
    }
    fn small_blind(&self) -> u64 {
        self.table().small_blind()
    }
    fn big_blind(&self) -> u64 {
        self.table().big_blind()
    }
    fn hole_cards(&self, seat: SeatId) -> Option<HoleCards> {
        self.player(seat).and_then(|p| p.hand())
    }
    fn board(&self) -> &Board {
        self.table().community()
    }
    fn chips(&self, seat: SeatId) -> u64 {
        self.player(seat).map_or(0, |p| p.chips())
    }
    fn current_player(&self) -> SeatId {
        self.table().current_player()
    }
    fn dealer(&self) -> SeatId {
        self.table().dealer()
    }
    fn stage(&self) -> Stage {
        self.table().stage()
    }
    fn active_count(&self) -> usize {
        GameSession::active_count(self)
    }
}
