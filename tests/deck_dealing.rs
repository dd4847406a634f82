use holdem_engine::cards::Card;
use holdem_engine::config::TableConfig;
use holdem_engine::deck::{Deck, DeckError};
use holdem_engine::game::{GameSession, PlayerAction, Stage};
use std::collections::HashSet;

#[test]
fn shuffled_deck_deals_every_card_once() {
    let mut deck = Deck::standard();
    deck.shuffle_seeded(99);
    let mut seen = HashSet::new();
    while let Ok(card) = deck.draw() {
        assert!(seen.insert(card), "{card} dealt twice");
    }
    assert_eq!(seen.len(), Deck::SIZE);
    assert_eq!(deck.dealt(), Deck::SIZE);
    assert_eq!(deck.draw_n(1), Err(DeckError::Exhausted { requested: 1, remaining: 0 }));
}

#[test]
fn different_seeds_give_different_orders() {
    let mut a = Deck::standard();
    let mut b = Deck::standard();
    a.shuffle_seeded(1);
    b.shuffle_seeded(2);
    assert_ne!(a.as_slice(), b.as_slice());
}

#[test]
fn played_round_never_repeats_a_card() {
    let mut g = GameSession::with_seed(TableConfig::default(), 5).unwrap();
    g.start_round().unwrap();
    while g.table().stage() != Stage::River || !g.is_round_complete().unwrap() {
        if g.is_round_complete().unwrap() {
            let stage = g.advance_stage().unwrap();
            g.deal_for_stage().unwrap();
            if stage == Stage::Preflop {
                g.post_blinds().unwrap();
            }
            continue;
        }
        let seat = g.table().current_player();
        g.apply_action(seat, PlayerAction::CheckCall).unwrap();
        g.advance_turn().unwrap();
    }

    let mut dealt: Vec<Card> = g.table().community().as_slice().to_vec();
    for p in g.players().iter().filter(|p| p.is_active()) {
        dealt.extend(p.hand().expect("active players hold cards").as_array());
    }
    assert_eq!(dealt.len(), 6 * 2 + 5);
    let distinct: HashSet<Card> = dealt.iter().copied().collect();
    assert_eq!(distinct.len(), dealt.len());
    assert_eq!(g.table().deck().len() + dealt.len(), Deck::SIZE);
    assert!(dealt.iter().all(|c| !g.table().deck().as_slice().contains(c)));
}

#[test]
fn empty_seats_get_no_cards() {
    let mut g = GameSession::with_seed(TableConfig::default(), 8).unwrap();
    g.start_round().unwrap();
    g.advance_stage().unwrap();
    g.deal_for_stage().unwrap();
    let seated = g.config().seating_order();
    for p in g.players() {
        assert_eq!(p.hand().is_some(), seated.contains(&p.id()), "seat {}", p.id());
    }
}
