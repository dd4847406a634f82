use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::evaluator::{evaluate_cards, score_five};
use holdem_engine::settlement::{settle, Contender, SeatOrder};

fn bench_score_five(c: &mut Criterion) {
    let hi = [
        Card::new(Rank::Ace, Suit::Hearts),
        Card::new(Rank::King, Suit::Diamonds),
        Card::new(Rank::Seven, Suit::Spades),
        Card::new(Rank::Five, Suit::Clubs),
        Card::new(Rank::Two, Suit::Diamonds),
    ];
    let royal = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
        Card::new(Rank::Jack, Suit::Spades),
        Card::new(Rank::Ten, Suit::Spades),
    ];

    let mut g = c.benchmark_group("score_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| score_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("royal_flush", "A-T"), &royal, |b, input| {
        b.iter(|| score_five(black_box(input)))
    });
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let seven = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::Ace, Suit::Hearts),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
        Card::new(Rank::Jack, Suit::Spades),
        Card::new(Rank::Ten, Suit::Spades),
        Card::new(Rank::Nine, Suit::Spades),
    ];
    c.bench_function("evaluate_seven", |b| b.iter(|| evaluate_cards(black_box(&seven))));
}

fn bench_settle_three_way(c: &mut Criterion) {
    let community = [
        Card::new(Rank::Two, Suit::Clubs),
        Card::new(Rank::Seven, Suit::Diamonds),
        Card::new(Rank::Nine, Suit::Hearts),
        Card::new(Rank::Jack, Suit::Clubs),
        Card::new(Rank::Three, Suit::Spades),
    ];
    let contenders = [
        Contender { seat: 1, committed: 50, hole: "Ah Ad".parse().ok() },
        Contender { seat: 4, committed: 150, hole: "Kh Kd".parse().ok() },
        Contender { seat: 7, committed: 150, hole: "Qh Qd".parse().ok() },
    ];
    let order = SeatOrder { dealer: 1, seat_count: 9 };
    c.bench_function("settle_three_way", |b| {
        b.iter(|| settle(black_box(&contenders), &community, 350, order))
    });
}

criterion_group!(benches, bench_score_five, bench_evaluate_seven, bench_settle_three_way);
criterion_main!(benches);
