use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::evaluator::{compare_holdem, evaluate, evaluate_cards, Category};
use holdem_engine::hand::HoleCards;
use std::cmp::Ordering;

fn hole(s: &str) -> HoleCards {
    s.parse().expect("valid hole cards")
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid cards")
}

#[test]
fn royal_flush_scenario() {
    let eval = evaluate(&hole("A♥ K♥"), &cards("Q♥ J♥ 10♥")).unwrap();
    assert_eq!(eval.category, Category::RoyalFlush);
    assert_eq!(eval.tiebreak(), &[14]);
    assert_eq!(eval.cards().len(), 5);
}

#[test]
fn four_aces_with_king_kicker() {
    let eval = evaluate(&hole("A♥ A♦"), &cards("A♠ A♣ K♥")).unwrap();
    assert_eq!(eval.category, Category::FourOfAKind);
    assert_eq!(eval.tiebreak(), &[14, 13]);
}

#[test]
fn seven_card_categories() {
    let cases = [
        ("Ah Kh", "Qh Jh Th 2c 3d", Category::RoyalFlush),
        ("9c 8c", "7c 6c 5c Ad Ah", Category::StraightFlush),
        ("Qs Qd", "Qh Qc 2s 3d 9c", Category::FourOfAKind),
        ("Js Jd", "Jh 4c 4s 9d 2c", Category::FullHouse),
        ("Ah 2h", "9h 6h 4h Kc Ks", Category::Flush),
        ("Ad 2c", "3h 4s 5d Kc Qd", Category::Straight),
        ("7s 7d", "7h 2c 4s Jd Kc", Category::ThreeOfAKind),
        ("9s 9d", "4h 4c 2s Jd Kc", Category::TwoPair),
        ("Ts Td", "2h 4c 6s 8d Kc", Category::Pair),
        ("Ah Jd", "9s 7c 5d 3h 2s", Category::HighCard),
    ];
    for (h, board, expected) in cases {
        let eval = evaluate(&hole(h), &cards(board)).unwrap();
        assert_eq!(eval.category, expected, "{h} | {board}");
    }
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let board = cards("3h 4s 5d Kc Qd");
    let wheel = evaluate(&hole("Ad 2c"), &board).unwrap();
    let six_high = evaluate(&hole("6c 2d"), &board).unwrap();
    assert_eq!(wheel.category, Category::Straight);
    assert_eq!(wheel.tiebreak(), &[5]);
    assert_eq!(six_high.tiebreak(), &[6]);
    assert!(six_high > wheel);

    // the wheel still beats any three of a kind
    let trips = evaluate(&hole("Kh Ks"), &board).unwrap();
    assert_eq!(trips.category, Category::ThreeOfAKind);
    assert!(wheel > trips);
}

#[test]
fn kickers_decide_within_category() {
    let board = cards("Ks Kd 8c 5h 2d");
    let ace_kicker = hole("Ac 3c");
    let queen_kicker = hole("Qc 3d");
    assert_eq!(compare_holdem(&ace_kicker, &queen_kicker, &board).unwrap(), Ordering::Greater);

    // both play the board
    let board = cards("As Ks Qd Jc 9h");
    assert_eq!(
        compare_holdem(&hole("2c 3d"), &hole("4h 5s"), &board).unwrap(),
        Ordering::Equal
    );
}

#[test]
fn best_kicker_chosen_for_quads_and_trips() {
    let eval = evaluate_cards(&cards("9s 9d 9h 9c 2d 7s Qh")).unwrap();
    assert_eq!(eval.tiebreak(), &[9, 12]);
    let eval = evaluate_cards(&cards("9s 9d 9h 2c 3d Ks Qh")).unwrap();
    assert_eq!(eval.category, Category::ThreeOfAKind);
    assert_eq!(eval.tiebreak(), &[9, 13, 12]);
}

#[test]
fn two_trips_make_the_best_full_house() {
    let eval = evaluate_cards(&cards("8s 8d 8h 5c 5d 5s Ah")).unwrap();
    assert_eq!(eval.category, Category::FullHouse);
    assert_eq!(eval.tiebreak(), &[8, 5]);
}

#[test]
fn preflop_strength_uses_available_cards() {
    let eval = evaluate(&hole("Kd Ks"), &[]).unwrap();
    assert_eq!(eval.category, Category::Pair);
    assert_eq!(eval.tiebreak(), &[13]);
    assert_eq!(eval.cards().len(), 2);
}

#[test]
fn category_ordinals_follow_strength() {
    for pair in Category::ALL.windows(2) {
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[0].ordinal() + 1, pair[1].ordinal());
    }
    assert_eq!(Category::RoyalFlush.to_string(), "Royal Flush");
}
