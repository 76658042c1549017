use holdem_duel::cards::{Card, Rank, Suit};
use holdem_duel::evaluator::{evaluate_cards, Category};
use proptest::prelude::*;
use std::cmp::Ordering;

fn full_deck() -> Vec<Card> {
    Suit::ALL.iter().flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s))).collect()
}

fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck()).prop_shuffle().prop_map(move |d| d[..n].to_vec())
}

fn rank(v: u8) -> Rank {
    Rank::from_value(v).unwrap()
}

/// Straightforward five-card scoring, encoded as `[category, tiebreaks...]`.
fn reference_five(cards: &[Card]) -> Vec<u8> {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let mut distinct = values.clone();
    distinct.dedup();
    let straight_top = if distinct.len() == 5 && distinct[0] - distinct[4] == 4 {
        Some(distinct[0])
    } else if distinct == [14, 5, 4, 3, 2] {
        Some(5)
    } else {
        None
    };

    // (count, value) groups, biggest group first, then highest rank
    let mut groups: Vec<(usize, u8)> =
        distinct.iter().map(|&v| (values.iter().filter(|&&x| x == v).count(), v)).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let shape: Vec<usize> = groups.iter().map(|g| g.0).collect();
    let by_group: Vec<u8> = groups.iter().map(|g| g.1).collect();

    let mut out = match (straight_top, flush) {
        (Some(14), true) => return vec![9],
        (Some(top), true) => return vec![8, top],
        _ if shape == [4, 1] => vec![7],
        _ if shape == [3, 2] => vec![6],
        (_, true) => return [vec![5], values].concat(),
        (Some(top), false) => return vec![4, top],
        _ if shape == [3, 1, 1] => vec![3],
        _ if shape == [2, 2, 1] => vec![2],
        _ if shape == [2, 1, 1, 1] => vec![1],
        _ => return [vec![0], values].concat(),
    };
    out.extend(by_group);
    out
}

fn reference_best(cards: &[Card]) -> Vec<u8> {
    let n = cards.len();
    let mut best: Option<Vec<u8>> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            // drop cards i and j from the seven
            let five: Vec<Card> = cards
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != i && *k != j)
                .map(|(_, c)| *c)
                .collect();
            let score = reference_five(&five);
            if best.as_ref().map_or(true, |b| score > *b) {
                best = Some(score);
            }
        }
    }
    best.unwrap()
}

fn straight(top: u8) -> Vec<Card> {
    let values: Vec<u8> = if top == 5 { vec![14, 2, 3, 4, 5] } else { (top - 4..=top).collect() };
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    values.into_iter().zip(suits).map(|(v, s)| Card::new(rank(v), s)).collect()
}

proptest! {
    #[test]
    fn seven_cards_match_best_of_twenty_one(cards in distinct_cards(7)) {
        let got = evaluate_cards(&cards).unwrap().to_tuple();
        prop_assert_eq!(got, reference_best(&cards));
    }

    #[test]
    fn five_cards_match_reference(cards in distinct_cards(5)) {
        let got = evaluate_cards(&cards).unwrap().to_tuple();
        prop_assert_eq!(got, reference_five(&cards));
    }

    #[test]
    fn ordering_agrees_with_tuples(a in distinct_cards(7), b in distinct_cards(7)) {
        let ra = evaluate_cards(&a).unwrap();
        let rb = evaluate_cards(&b).unwrap();
        prop_assert_eq!(ra.cmp(&rb), ra.to_tuple().cmp(&rb.to_tuple()));
    }

    #[test]
    fn adding_cards_never_weakens(cards in distinct_cards(7)) {
        let five = evaluate_cards(&cards[..5]).unwrap();
        let six = evaluate_cards(&cards[..6]).unwrap();
        let seven = evaluate_cards(&cards).unwrap();
        prop_assert!(six >= five);
        prop_assert!(seven >= six);
    }

    #[test]
    fn straights_order_by_top_card(hi in 6u8..=14u8, lo in 5u8..=13u8) {
        prop_assume!(hi > lo);
        let e_hi = evaluate_cards(&straight(hi)).unwrap();
        let e_lo = evaluate_cards(&straight(lo)).unwrap();
        prop_assert_eq!(e_hi.category, Category::Straight);
        prop_assert_eq!(e_lo.category, Category::Straight);
        prop_assert_eq!(e_hi.cmp(&e_lo), Ordering::Greater);
    }
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let wheel = evaluate_cards(&straight(5)).unwrap();
    let six = evaluate_cards(&straight(6)).unwrap();
    assert_eq!(wheel.to_tuple(), vec![4, 5]);
    assert_eq!(six.to_tuple(), vec![4, 6]);
    assert!(wheel < six);
}
