use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_duel::cards::{parse_cards, Card};
use holdem_duel::deck::Deck;
use holdem_duel::evaluator::{evaluate, evaluate_cards};
use holdem_duel::hand::{Board, HoleCards};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap_or_default()
}

fn bench_evaluate_cards(c: &mut Criterion) {
    let inputs = [
        ("high_card", cards("Ah Kd 7s 5c 2d 9h 3c")),
        ("two_pair", cards("Ah Ad 7s 7c 2d 9h 3c")),
        ("flush", cards("Ah Kh 7h 5h 2h 9s 3c")),
        ("royal", cards("As Ks Qs Js 10s Ah 9s")),
    ];

    let mut g = c.benchmark_group("evaluate_cards");
    for (name, input) in &inputs {
        g.bench_with_input(BenchmarkId::new("seven", name), input, |b, input| {
            b.iter(|| evaluate_cards(black_box(input)))
        });
    }
    g.finish();
}

fn bench_evaluate_dealt(c: &mut Criterion) {
    let mut deck = Deck::standard();
    deck.shuffle_seeded(7);
    let Some(hole) = deck.draw_n(2).ok().and_then(|c| HoleCards::from_slice(&c).ok()) else {
        return;
    };
    let board = deck
        .draw_n(5)
        .ok()
        .and_then(|c| Board::try_new(c).ok())
        .unwrap_or_default();
    c.bench_function("evaluate_hole_and_board", |b| {
        b.iter(|| evaluate(black_box(&hole), black_box(&board)))
    });
}

criterion_group!(benches, bench_evaluate_cards, bench_evaluate_dealt);
criterion_main!(benches);
