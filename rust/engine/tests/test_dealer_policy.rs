use hilo_engine::cards::Card;
use hilo_engine::engine::RoundEngine;
use hilo_engine::events::GameEvent;
use hilo_engine::game::{Outcome, RoundState};
use hilo_engine::hand::hand_value;
use hilo_engine::rules::DEALER_STANDS_ON;

fn play_standing(seed: u64) -> RoundEngine {
    let mut eng = RoundEngine::new(1_000, Some(seed)).unwrap();
    eng.start_round(10).unwrap();
    eng.stand().unwrap();
    eng
}

#[test]
fn dealer_stops_at_seventeen_or_more() {
    for seed in 0..200u64 {
        let eng = play_standing(seed);
        let cards = eng.dealer_hand().cards();
        if eng.outcome() == Some(Outcome::DealerBlackjack)
            || eng.outcome() == Some(Outcome::BlackjackPush)
        {
            assert_eq!(cards.len(), 2);
            continue;
        }
        assert!(
            hand_value(cards) >= DEALER_STANDS_ON,
            "seed {}: dealer stopped on {}",
            seed,
            hand_value(cards)
        );
        // every earlier total was a draw
        for k in 2..cards.len() {
            assert!(
                hand_value(&cards[..k]) < DEALER_STANDS_ON,
                "seed {}: dealer drew on {}",
                seed,
                hand_value(&cards[..k])
            );
        }
    }
}

#[test]
fn dealer_stands_on_soft_seventeen() {
    for seed in 0..300u64 {
        let eng = play_standing(seed);
        let cards = eng.dealer_hand().cards();
        for k in 2..cards.len() {
            let prefix: &[Card] = &cards[..k];
            let hand = hilo_engine::hand::Hand::from_cards(prefix.to_vec());
            assert!(
                !(hand.is_soft() && hand.value() == 17),
                "seed {}: dealer hit soft 17",
                seed
            );
        }
    }
}

#[test]
fn running_count_matches_every_revealed_card() {
    for seed in 0..100u64 {
        let mut eng = RoundEngine::new(1_000, Some(seed)).unwrap();
        let mut expected = 0;
        // a handful of rounds stays well inside one 52-card shoe
        for _ in 0..3 {
            eng.start_round(10).unwrap();
            if eng.player_hand().value() < 12 {
                eng.hit().unwrap();
            }
            if eng.state() == RoundState::PlayerTurn {
                eng.stand().unwrap();
            }
            assert!(!eng.events().contains(&GameEvent::Reshuffled));
            expected += eng
                .player_hand()
                .cards()
                .iter()
                .chain(eng.dealer_hand().cards())
                .map(|c| c.count_value())
                .sum::<i32>();
            assert_eq!(eng.running_count(), expected, "seed {}", seed);
        }
    }
}

#[test]
fn count_excludes_hole_card_during_player_turn() {
    for seed in 0..50u64 {
        let mut eng = RoundEngine::new(1_000, Some(seed)).unwrap();
        eng.start_round(10).unwrap();
        let visible: i32 = eng
            .player_hand()
            .cards()
            .iter()
            .chain(eng.dealer_hand().first().iter())
            .map(|c| c.count_value())
            .sum();
        assert_eq!(eng.running_count(), visible, "seed {}", seed);
        assert_eq!(eng.snapshot().dealer_total, None);
    }
}

#[test]
fn chips_are_conserved_across_settlement() {
    for seed in 0..200u64 {
        let eng = play_standing(seed);
        let outcome = eng.outcome().unwrap();
        let expected = 990 + outcome.payout(10);
        assert_eq!(eng.chips(), expected, "seed {}: {:?}", seed, outcome);
    }
}

#[test]
fn count_returns_to_zero_when_shoe_is_dealt_out_exactly() {
    let mut exact = 0;
    for seed in 0..300u64 {
        let mut eng = RoundEngine::new(100_000, Some(seed)).unwrap();
        let mut reshuffled = false;
        while eng.cards_remaining() > 0 && !reshuffled {
            let mut events = eng.start_round(1).unwrap();
            if eng.state() == RoundState::PlayerTurn {
                events.extend(eng.stand().unwrap());
            }
            reshuffled = events.contains(&GameEvent::Reshuffled);
        }
        if reshuffled {
            continue;
        }
        exact += 1;
        assert_eq!(eng.state(), RoundState::Resolved, "seed {}", seed);
        assert_eq!(eng.running_count(), 0, "seed {}", seed);
    }
    assert!(exact > 0, "no seed dealt the shoe out on a round boundary");
}
