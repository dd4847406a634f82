//! Agents: pluggable players (bots, humans fed by a frontend).
//!
//! `PlayerAgent` is the seat controller trait and `AgentTable` maps seats to
//! agents. [`AgentTable::progress`] is the driver loop: it advances stages,
//! deals, settles, and asks agents to act until the round ends or a seat has
//! nothing to play.

use crate::config::SeatId;
use crate::engine::GameEngine;
use crate::game::{GameError, GameSession, PlayerAction, Stage};
use crate::settlement::Settlement;
use core::fmt;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent: Send {
    /// Called when `seat` is the current actor. Returns whether an action was applied.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: SeatId) -> Result<bool, GameError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an action from a frontend; default is to ignore and return false.
    fn receive(&mut self, _action: PlayerAction) -> bool {
        false
    }
}

mod bots;

pub use bots::{
    hand_strength, raise_amount, AggressiveStrategy, BotAgent, CheckCallStrategy,
    ConservativeStrategy, LooseStrategy, Strategy, Style, StyleParseError, TableView,
    TightStrategy,
};

/// Plays whatever single action it was last handed, when it is its turn.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<PlayerAction>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: PlayerAction) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: SeatId) -> Result<bool, GameError> {
        if matches!(engine.stage(), Stage::Waiting | Stage::Showdown) {
            self.pending = None;
            return Ok(false);
        }
        if engine.current_player() != seat {
            return Ok(false);
        }
        match self.pending.take() {
            Some(action) => engine.apply_action(seat, action).map(|_| true),
            None => Ok(false),
        }
    }
}

/// Where the driver loop stopped.
#[derive(Debug, Clone)]
pub enum Progress {
    /// `seat` is to act and its agent has nothing to play.
    AwaitingInput { seat: SeatId },
    /// The round was settled.
    RoundComplete(Settlement),
}

/// Optional agents, one per seat (seat 1 at index 0).
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: SeatId, agent: Option<Box<dyn PlayerAgent>>) {
        let Some(idx) = seat.checked_sub(1) else { return };
        if idx >= self.seats.len() {
            self.seats.resize_with(idx + 1, || None);
        }
        self.seats[idx] = agent;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: SeatId) -> Option<AgentKind> {
        self.slot(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    pub fn has_agent(&self, seat: SeatId) -> bool {
        self.slot(seat).is_some_and(|a| a.is_some())
    }

    /// Whether any non-human (bot) agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| ag.kind() == AgentKind::Bot)
    }

    /// Hand an action to the agent at `seat`, if any.
    pub fn receive(&mut self, seat: SeatId, action: PlayerAction) -> bool {
        match seat.checked_sub(1).and_then(|i| self.seats.get_mut(i)) {
            Some(Some(agent)) => agent.receive(action),
            _ => false,
        }
    }

    /// Drive the agent assigned to the current seat, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, GameError> {
        let seat = engine.current_player();
        match seat.checked_sub(1).and_then(|i| self.seats.get_mut(i)) {
            Some(Some(agent)) => agent.on_turn(engine, seat),
            _ => Ok(false),
        }
    }

    /// Run the round until it is settled or a seat is waiting for input.
    ///
    /// Each pass either closes the stage (settling at showdown or once a single
    /// player is left, otherwise dealing and posting blinds at preflop), plays
    /// check/call for an all-in seat, or lets the seat's agent act. After any
    /// action the turn moves on.
    pub fn progress(&mut self, session: &mut GameSession) -> Result<Progress, GameError> {
        loop {
            if session.is_round_complete()? {
                let stage = session.advance_stage()?;
                if stage == Stage::Showdown || session.active_count() <= 1 {
                    return session.settle().map(Progress::RoundComplete);
                }
                session.deal_for_stage()?;
                if stage == Stage::Preflop {
                    session.post_blinds()?;
                }
                continue;
            }

            let seat = session.table().current_player();
            if session.player(seat).is_some_and(|p| p.is_all_in()) {
                session.apply_action(seat, PlayerAction::CheckCall)?;
            } else if !self.on_turn(session)? {
                return Ok(Progress::AwaitingInput { seat });
            }
            session.advance_turn()?;
        }
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.seats {
            *a = None;
        }
    }

    fn slot(&self, seat: SeatId) -> Option<&Option<Box<dyn PlayerAgent>>> {
        seat.checked_sub(1).and_then(|i| self.seats.get(i))
    }
}
