//! Notifications emitted by a [`GameSession`](crate::game::GameSession) as the round progresses.

use crate::cards::Card;
use crate::config::SeatId;
use crate::game::{LastAction, Stage};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blind {
    Small,
    Big,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameEvent {
    RoundStarted { round: u64, dealer: SeatId },
    BlindPosted { seat: SeatId, blind: Blind, amount: u64 },
    HoleCardsDealt { seat: SeatId },
    CommunityDealt { stage: Stage, cards: Vec<Card> },
    ActionTaken { seat: SeatId, action: LastAction, amount: u64 },
    StageAdvanced { stage: Stage },
    PotAwarded { pot_index: usize, seat: SeatId, amount: u64 },
    RoundEnded { round: u64, winners: Vec<SeatId> },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::RoundStarted { round, dealer } => {
                write!(f, "round {round} started, dealer is seat {dealer}")
            }
            GameEvent::BlindPosted { seat, blind, amount } => {
                let which = match blind {
                    Blind::Small => "small",
                    Blind::Big => "big",
                };
                write!(f, "seat {seat} posts {which} blind {amount}")
            }
            GameEvent::HoleCardsDealt { seat } => write!(f, "seat {seat} is dealt hole cards"),
            GameEvent::CommunityDealt { stage, cards } => {
                let shown: Vec<String> = cards.iter().map(Card::to_string).collect();
                write!(f, "{}: {}", stage.title(), shown.join(", "))
            }
            GameEvent::ActionTaken { seat, action, amount } => match action {
                LastAction::Fold => write!(f, "seat {seat} folds"),
                LastAction::Check => write!(f, "seat {seat} checks"),
                LastAction::Call => write!(f, "seat {seat} calls {amount}"),
                LastAction::Raise => write!(f, "seat {seat} raises {amount}"),
                LastAction::AllIn => write!(f, "seat {seat} goes all-in for {amount}"),
                LastAction::SmallBlind | LastAction::BigBlind => {
                    write!(f, "seat {seat} posts {amount}")
                }
            },
            GameEvent::StageAdvanced { stage } => write!(f, "stage advanced to {stage}"),
            GameEvent::PotAwarded { pot_index, seat, amount } => {
                write!(f, "seat {seat} wins {amount} from pot #{}", pot_index + 1)
            }
            GameEvent::RoundEnded { round, winners } => {
                let seats: Vec<String> = winners.iter().map(|s| s.to_string()).collect();
                write!(f, "round {round} ended, winning seats: {}", seats.join(", "))
            }
        }
    }
}

/// Observer for game events. Closures taking `&GameEvent` implement it.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn events_read_as_sentences() {
        let flop = GameEvent::CommunityDealt {
            stage: Stage::Flop,
            cards: parse_cards("As Kd 2c").unwrap(),
        };
        assert_eq!(flop.to_string(), "Flop: As, Kd, 2c");
        let blind = GameEvent::BlindPosted { seat: 3, blind: Blind::Big, amount: 20 };
        assert_eq!(blind.to_string(), "seat 3 posts big blind 20");
        let call = GameEvent::ActionTaken { seat: 7, action: LastAction::Call, amount: 10 };
        assert_eq!(call.to_string(), "seat 7 calls 10");
        let end = GameEvent::RoundEnded { round: 2, winners: vec![1, 9] };
        assert_eq!(end.to_string(), "round 2 ended, winning seats: 1, 9");
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |e: &GameEvent| seen.push(e.clone());
            sink.on_event(&GameEvent::StageAdvanced { stage: Stage::Turn });
        }
        assert_eq!(seen, vec![GameEvent::StageAdvanced { stage: Stage::Turn }]);
    }
}
