//! Side-pot partition and pot distribution.
//!
//! Everything here is a pure function over a snapshot of the contenders; the
//! caller applies the returned [`Settlement`] to its own player state.

use crate::cards::Card;
use crate::config::SeatId;
use crate::evaluator::{evaluate, EvalError, Evaluation};
use crate::hand::HoleCards;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettlementError {
    #[error("no active players left to settle the pot")]
    NoContenders,
    #[error("seat {0} reached showdown without hole cards")]
    MissingHoleCards(SeatId),
    #[error("committed chips ({committed}) exceed the pot ({pot})")]
    PotMismatch { committed: u64, pot: u64 },
    #[error("hand evaluation failed: {0}")]
    Eval(#[from] EvalError),
}

/// One pot and the seats that may win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u64,
    pub eligible: Vec<SeatId>,
}

/// An active player as seen by settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contender {
    pub seat: SeatId,
    /// Chips committed over the whole round.
    pub committed: u64,
    pub hole: Option<HoleCards>,
}

/// Seat geometry used to order tied winners for odd chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatOrder {
    pub dealer: SeatId,
    pub seat_count: usize,
}

impl SeatOrder {
    /// Steps clockwise from the first seat after the dealer; 0 for that seat itself.
    pub fn distance(&self, seat: SeatId) -> usize {
        let n = self.seat_count;
        if n == 0 {
            return seat;
        }
        (seat + n).saturating_sub(self.dealer + 1) % n
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotAward {
    pub pot_index: usize,
    pub seat: SeatId,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub seat: SeatId,
    pub amount: u64,
}

/// Result of one settlement pass.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Settlement {
    /// Main pot first, then one pot per committed-bet level.
    pub pots: Vec<SidePot>,
    pub awards: Vec<PotAward>,
    /// Total won per seat, in seat order from the dealer.
    pub payouts: Vec<Payout>,
    /// Evaluated hands of the contenders; empty without a showdown.
    pub hands: Vec<(SeatId, Evaluation)>,
    pub showdown: bool,
}

impl Settlement {
    pub fn total_paid(&self) -> u64 {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    pub fn winnings_of(&self, seat: SeatId) -> u64 {
        self.payouts.iter().filter(|p| p.seat == seat).map(|p| p.amount).sum()
    }

    pub fn hand_of(&self, seat: SeatId) -> Option<&Evaluation> {
        self.hands.iter().find(|(s, _)| *s == seat).map(|(_, e)| e)
    }
}

/// Partition `total_pot` into the main pot and one side pot per distinct
/// committed level among the contenders.
///
/// ```
/// use holdem_engine::settlement::{build_side_pots, Contender};
///
/// let contenders = [
///     Contender { seat: 1, committed: 50, hole: None },
///     Contender { seat: 2, committed: 150, hole: None },
///     Contender { seat: 3, committed: 150, hole: None },
/// ];
/// let pots = build_side_pots(&contenders, 350).unwrap();
/// assert_eq!(pots.len(), 2);
/// assert_eq!(pots[0].amount, 150);
/// assert_eq!(pots[1].amount, 200);
/// assert_eq!(pots[1].eligible, vec![2, 3]);
/// ```
pub fn build_side_pots(
    contenders: &[Contender],
    total_pot: u64,
) -> Result<Vec<SidePot>, SettlementError> {
    if contenders.is_empty() {
        return Err(SettlementError::NoContenders);
    }
    let mut sorted: Vec<&Contender> = contenders.iter().collect();
    sorted.sort_by_key(|c| (c.committed, c.seat));

    let mut levels = Vec::new();
    let mut last_level = 0u64;
    for (i, c) in sorted.iter().enumerate() {
        if c.committed <= last_level {
            continue;
        }
        let eligible: Vec<SeatId> = sorted[i..].iter().map(|c| c.seat).collect();
        let amount = (c.committed - last_level) * eligible.len() as u64;
        levels.push(SidePot { amount, eligible });
        last_level = c.committed;
    }

    let covered: u64 = levels.iter().map(|p| p.amount).sum();
    if covered > total_pot {
        return Err(SettlementError::PotMismatch { committed: covered, pot: total_pot });
    }

    let mut pots = Vec::with_capacity(levels.len() + 1);
    let remainder = total_pot - covered;
    if remainder > 0 {
        let mut eligible: Vec<SeatId> = contenders.iter().map(|c| c.seat).collect();
        eligible.sort_unstable();
        pots.push(SidePot { amount: remainder, eligible });
    }
    pots.extend(levels);
    Ok(pots)
}

/// Distribute `total_pot` among the contenders.
///
/// A lone contender takes everything without any hand being evaluated.
/// Otherwise every pot goes to the best hand among its eligible seats; ties
/// split evenly and odd chips go one each to the tied seats nearest the
/// dealer's left.
pub fn settle(
    contenders: &[Contender],
    community: &[Card],
    total_pot: u64,
    order: SeatOrder,
) -> Result<Settlement, SettlementError> {
    let pots = build_side_pots(contenders, total_pot)?;

    if let [only] = contenders {
        let awards: Vec<PotAward> = pots
            .iter()
            .enumerate()
            .map(|(pot_index, p)| PotAward { pot_index, seat: only.seat, amount: p.amount })
            .collect();
        let payouts = if total_pot > 0 {
            vec![Payout { seat: only.seat, amount: total_pot }]
        } else {
            Vec::new()
        };
        return Ok(Settlement { pots, awards, payouts, hands: Vec::new(), showdown: false });
    }

    let mut hands = Vec::with_capacity(contenders.len());
    for c in contenders {
        let hole = c.hole.ok_or(SettlementError::MissingHoleCards(c.seat))?;
        hands.push((c.seat, evaluate(&hole, community)?));
    }
    let hand_of = |seat: SeatId| hands.iter().find(|(s, _)| *s == seat).map(|(_, e)| e);

    let mut awards = Vec::new();
    for (pot_index, pot) in pots.iter().enumerate() {
        let best = pot.eligible.iter().filter_map(|&s| hand_of(s)).max();
        let Some(best) = best else { continue };
        let mut winners: Vec<SeatId> =
            pot.eligible.iter().copied().filter(|&s| hand_of(s) == Some(best)).collect();
        winners.sort_by_key(|&s| order.distance(s));

        let share = pot.amount / winners.len() as u64;
        let mut odd = pot.amount % winners.len() as u64;
        for seat in winners {
            let mut amount = share;
            if odd > 0 {
                amount += 1;
                odd -= 1;
            }
            if amount > 0 {
                awards.push(PotAward { pot_index, seat, amount });
            }
        }
    }

    let mut payouts: Vec<Payout> = Vec::new();
    for a in &awards {
        match payouts.iter_mut().find(|p| p.seat == a.seat) {
            Some(p) => p.amount += a.amount,
            None => payouts.push(Payout { seat: a.seat, amount: a.amount }),
        }
    }
    payouts.sort_by_key(|p| order.distance(p.seat));
    log::debug!("settled {total_pot} chips over {} pot(s)", pots.len());

    Ok(Settlement { pots, awards, payouts, hands, showdown: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn c(seat: SeatId, committed: u64, hole: &str) -> Contender {
        Contender { seat, committed, hole: Some(hole.parse().expect("hole cards")) }
    }

    const ORDER: SeatOrder = SeatOrder { dealer: 1, seat_count: 6 };

    #[test]
    fn distance_wraps_from_dealer() {
        let order = SeatOrder { dealer: 3, seat_count: 6 };
        assert_eq!(order.distance(4), 0);
        assert_eq!(order.distance(6), 2);
        assert_eq!(order.distance(1), 3);
        assert_eq!(order.distance(3), 5);
    }

    #[test]
    fn folded_chips_form_a_main_pot_for_everyone() {
        let contenders = [c(3, 40, "Qh Qd"), c(2, 40, "As Ks")];
        let pots = build_side_pots(&contenders, 100).unwrap();
        assert_eq!(pots[0], SidePot { amount: 20, eligible: vec![2, 3] });
        assert_eq!(pots[1], SidePot { amount: 80, eligible: vec![2, 3] });
    }

    #[test]
    fn committed_above_pot_is_rejected() {
        let contenders = [c(2, 40, "As Ks"), c(3, 40, "Qh Qd")];
        assert_eq!(
            build_side_pots(&contenders, 60),
            Err(SettlementError::PotMismatch { committed: 80, pot: 60 })
        );
        assert_eq!(build_side_pots(&[], 60), Err(SettlementError::NoContenders));
    }

    #[test]
    fn short_all_in_only_wins_its_level() {
        let community = parse_cards("2c 7d 9h Jc 3s").unwrap();
        let contenders = [c(2, 50, "Ah Ad"), c(3, 150, "Kh Kd"), c(4, 150, "Qh Qd")];
        let s = settle(&contenders, &community, 350, ORDER).unwrap();
        assert!(s.showdown);
        assert_eq!(s.winnings_of(2), 150);
        assert_eq!(s.winnings_of(3), 200);
        assert_eq!(s.winnings_of(4), 0);
        assert_eq!(s.total_paid(), 350);
    }

    #[test]
    fn odd_chip_goes_left_of_dealer() {
        // both play the board
        let community = parse_cards("Ac Kd Qh Js Tc").unwrap();
        let contenders = [c(2, 50, "2d 3h"), c(6, 50, "2h 3d")];
        let order = SeatOrder { dealer: 4, seat_count: 6 };
        let s = settle(&contenders, &community, 101, order).unwrap();
        assert_eq!(s.pots[0], SidePot { amount: 1, eligible: vec![2, 6] });
        assert_eq!(s.pots[1], SidePot { amount: 100, eligible: vec![2, 6] });
        // seat 6 is one step from the dealer, seat 2 three steps
        assert_eq!(s.winnings_of(6), 51);
        assert_eq!(s.winnings_of(2), 50);
        assert_eq!(s.payouts[0].seat, 6);
    }

    #[test]
    fn lone_contender_wins_without_evaluation() {
        let contenders = [Contender { seat: 5, committed: 20, hole: None }];
        let s = settle(&contenders, &[], 90, ORDER).unwrap();
        assert!(!s.showdown);
        assert!(s.hands.is_empty());
        assert_eq!(s.payouts, vec![Payout { seat: 5, amount: 90 }]);
    }

    #[test]
    fn showdown_needs_hole_cards() {
        let community = parse_cards("2c 7d 9h Jc 3s").unwrap();
        let contenders = [c(2, 10, "Ah Ad"), Contender { seat: 3, committed: 10, hole: None }];
        assert_eq!(
            settle(&contenders, &community, 20, ORDER).unwrap_err(),
            SettlementError::MissingHoleCards(3)
        );
    }
}
