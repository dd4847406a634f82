use crate::cards::Card;
use crate::config::SeatId;
use crate::engine::GameEngine;
use crate::evaluator::evaluate;
use crate::game::{GameError, PlayerAction, Stage};
use crate::hand::HoleCards;
use core::fmt;
use core::str::FromStr;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use super::{AgentKind, PlayerAgent};

/// Bot personalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Style {
    CheckCall,
    Tight,
    Loose,
    Aggressive,
    Conservative,
}

impl Style {
    pub const ALL: [Style; 5] =
        [Style::CheckCall, Style::Tight, Style::Loose, Style::Aggressive, Style::Conservative];

    pub fn name(self) -> &'static str {
        match self {
            Style::CheckCall => "check-call",
            Style::Tight => "tight",
            Style::Loose => "loose",
            Style::Aggressive => "aggressive",
            Style::Conservative => "conservative",
        }
    }

    pub fn strategy(self) -> Box<dyn Strategy> {
        match self {
            Style::CheckCall => Box::new(CheckCallStrategy),
            Style::Tight => Box::new(TightStrategy),
            Style::Loose => Box::new(LooseStrategy),
            Style::Aggressive => Box::new(AggressiveStrategy),
            Style::Conservative => Box::new(ConservativeStrategy),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown bot style: {0}")]
pub struct StyleParseError(String);

impl FromStr for Style {
    type Err = StyleParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "check-call" | "checkcall" | "check_call" => Ok(Style::CheckCall),
            "tight" => Ok(Style::Tight),
            "loose" => Ok(Style::Loose),
            "aggressive" => Ok(Style::Aggressive),
            "conservative" => Ok(Style::Conservative),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

/// The slice of table state a strategy decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableView {
    pub stage: Stage,
    pub chips: u64,
    pub to_call: u64,
    pub current_bet: u64,
    pub pot: u64,
    pub raise_count: u32,
    pub small_blind: u64,
}

impl TableView {
    pub fn of(engine: &dyn GameEngine, seat: SeatId) -> Self {
        Self {
            stage: engine.stage(),
            chips: engine.chips(seat),
            to_call: engine.to_call(seat),
            current_bet: engine.current_bet(),
            pot: engine.pot(),
            raise_count: engine.raise_count(),
            small_blind: engine.small_blind(),
        }
    }
}

/// A betting policy: hand strength in `[0, 1]` plus the table view to an action.
///
/// Implementations only return raises with `0 < amount <= view.chips`.
pub trait Strategy: Send {
    fn style(&self) -> Style;
    fn decide(&self, strength: f64, view: &TableView, rng: &mut dyn RngCore) -> PlayerAction;
}

/// Always checks or calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckCallStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct TightStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct LooseStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativeStrategy;

impl Strategy for CheckCallStrategy {
    fn style(&self) -> Style {
        Style::CheckCall
    }
    fn decide(&self, _strength: f64, _view: &TableView, _rng: &mut dyn RngCore) -> PlayerAction {
        PlayerAction::CheckCall
    }
}

impl Strategy for TightStrategy {
    fn style(&self) -> Style {
        Style::Tight
    }
    fn decide(&self, strength: f64, view: &TableView, _rng: &mut dyn RngCore) -> PlayerAction {
        if strength < 0.3 {
            return PlayerAction::Fold;
        }
        if strength < 0.6 || view.raise_count > 2 {
            return PlayerAction::CheckCall;
        }
        raise_or_call(view, 1.5)
    }
}

impl Strategy for LooseStrategy {
    fn style(&self) -> Style {
        Style::Loose
    }
    fn decide(&self, strength: f64, view: &TableView, rng: &mut dyn RngCore) -> PlayerAction {
        if strength < 0.2 && rng.random::<f64>() < 0.3 {
            return PlayerAction::Fold;
        }
        if strength < 0.5 || rng.random::<f64>() < 0.4 || view.raise_count > 3 {
            return PlayerAction::CheckCall;
        }
        raise_or_call(view, 2.0)
    }
}

impl Strategy for AggressiveStrategy {
    fn style(&self) -> Style {
        Style::Aggressive
    }
    fn decide(&self, strength: f64, view: &TableView, rng: &mut dyn RngCore) -> PlayerAction {
        if strength < 0.2 && rng.random::<f64>() < 0.1 {
            return PlayerAction::Fold;
        }
        if (strength < 0.4 && rng.random::<f64>() < 0.3) || view.raise_count > 4 {
            return PlayerAction::CheckCall;
        }
        raise_or_call(view, 3.0)
    }
}

impl Strategy for ConservativeStrategy {
    fn style(&self) -> Style {
        Style::Conservative
    }
    fn decide(&self, strength: f64, view: &TableView, _rng: &mut dyn RngCore) -> PlayerAction {
        if strength < 0.4 {
            return PlayerAction::Fold;
        }
        if strength < 0.8
            || view.current_bet as f64 > view.chips as f64 * 0.3
            || view.raise_count > 1
        {
            return PlayerAction::CheckCall;
        }
        raise_or_call(view, 1.2)
    }
}

fn raise_or_call(view: &TableView, multiplier: f64) -> PlayerAction {
    match raise_amount(view, multiplier) {
        0 => PlayerAction::CheckCall,
        amount if amount > view.chips => PlayerAction::CheckCall,
        amount => PlayerAction::Raise(amount),
    }
}

/// Chips to add for a raise: the larger of `multiplier` times the table bet
/// and 30% of the pot, capped at the stack. Short of all-in, the amount is
/// floored to a multiple of the table bet (but kept at `multiplier` times it)
/// and then to a multiple of the small blind.
pub fn raise_amount(view: &TableView, multiplier: f64) -> u64 {
    let chips = view.chips as f64;
    let bet = view.current_bet as f64;
    let base = (bet * multiplier).max(view.pot as f64 * 0.3);
    let mut amount = chips.min(base);
    if amount < chips {
        if view.current_bet > 0 {
            amount = (amount / bet).floor() * bet;
        }
        amount = amount.max(bet * multiplier);
        if view.small_blind > 0 {
            let sb = view.small_blind as f64;
            amount = (amount / sb).floor() * sb;
        }
    }
    amount.min(chips) as u64
}

/// Rough strength in `[0, 1]`: high card over 14 before the flop, then
/// `(category + 1) / 10` of the best hand so far.
pub fn hand_strength(hole: &HoleCards, community: &[Card]) -> f64 {
    if community.is_empty() {
        let high = hole.first().rank().value().max(hole.second().rank().value());
        return f64::from(high) / 14.0;
    }
    evaluate(hole, community).map_or(0.0, |e| f64::from(e.category.ordinal() + 1) / 10.0)
}

/// A seat played by one of the [`Style`] strategies.
pub struct BotAgent {
    strategy: Box<dyn Strategy>,
    rng: StdRng,
}

impl fmt::Debug for BotAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotAgent").field("style", &self.strategy.style()).finish_non_exhaustive()
    }
}

impl BotAgent {
    pub fn new(style: Style) -> Self {
        Self::with_strategy(style.strategy())
    }

    pub fn with_strategy(strategy: Box<dyn Strategy>) -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        Self { strategy, rng: StdRng::from_seed(seed) }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn style(&self) -> Style {
        self.strategy.style()
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: SeatId) -> Result<bool, GameError> {
        if matches!(engine.stage(), Stage::Waiting | Stage::Showdown) {
            return Ok(false);
        }
        if engine.current_player() != seat {
            return Ok(false);
        }
        let Some(hole) = engine.hole_cards(seat) else {
            return Ok(false);
        };
        let strength = hand_strength(&hole, engine.board().as_slice());
        let view = TableView::of(&*engine, seat);
        let action = self.strategy.decide(strength, &view, &mut self.rng);
        log::debug!("seat {seat} ({}) strength {strength:.2}: {action:?}", self.strategy.style());
        engine.apply_action(seat, action).map(|_| true)
    }
}
