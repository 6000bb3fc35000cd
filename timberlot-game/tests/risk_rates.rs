//! Statistical acceptance tests: observed event rates must track their
//! configured probabilities within tolerance over a large sample.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use timberlot_game::risk::{self, RiskConfig};
use timberlot_game::{GameConfig, GameState, Inventory, Ledger, SellOutcome, Species, actions};

const SAMPLE_SIZE: u32 = 5_000;
const TOLERANCE: f64 = 0.025;

fn observed_rate(triggered: u32) -> f64 {
    f64::from(triggered) / f64::from(SAMPLE_SIZE)
}

#[test]
fn inspection_rate_tracks_configuration() {
    let cfg = RiskConfig::default_config();
    let mut rng = SmallRng::seed_from_u64(1234);
    let mut triggered = 0;
    for _ in 0..SAMPLE_SIZE {
        let mut inventory = Inventory::with_standing(5);
        inventory.harvest(Species::Oak).unwrap();
        if risk::inspection_check(&mut inventory, &cfg, &mut rng).is_some() {
            triggered += 1;
        }
    }
    let observed = observed_rate(triggered);
    assert!(
        (observed - cfg.inspection_chance).abs() <= TOLERANCE,
        "inspection rate drifted: observed {observed:.4}"
    );
}

#[test]
fn fire_rate_tracks_configuration() {
    let cfg = RiskConfig::default_config();
    let mut rng = SmallRng::seed_from_u64(99);
    let mut triggered = 0;
    for _ in 0..SAMPLE_SIZE {
        let mut inventory = Inventory::with_standing(8);
        if risk::fire_check(&mut inventory, &cfg, &mut rng).is_some() {
            triggered += 1;
        }
    }
    let observed = observed_rate(triggered);
    assert!(
        (observed - cfg.fire_chance).abs() <= TOLERANCE,
        "fire rate drifted: observed {observed:.4}"
    );
}

#[test]
fn sell_arrest_rate_tracks_configuration() {
    // Fresh state per draw so earlier arrests cannot gate later sales.
    let mut triggered = 0;
    for seed in 0..SAMPLE_SIZE {
        let mut cfg = GameConfig::default();
        cfg.risk.inspection_chance = 0.0;
        let mut state = GameState::with_config(u64::from(seed), cfg);
        actions::harvest(&mut state, Species::Pine).unwrap();
        if let SellOutcome::Arrested(_) = actions::sell(&mut state, Species::Pine).unwrap() {
            triggered += 1;
        }
    }
    let observed = observed_rate(triggered);
    assert!(
        (observed - 0.12).abs() <= TOLERANCE,
        "sell arrest rate drifted: observed {observed:.4}"
    );
}

#[test]
fn jail_fines_cover_the_whole_grid_uniformly() {
    let cfg = RiskConfig::default_config();
    let mut rng = SmallRng::seed_from_u64(7);
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..SAMPLE_SIZE {
        let mut ledger = Ledger::with_money(10_000);
        let mut jail = false;
        let report = risk::arrest(&mut ledger, &mut jail, &cfg, &mut rng);
        seen.insert(report.fine);
    }
    // 30 grid points from 5 to 150 in steps of 5; a 5000-draw sample
    // should hit every one.
    assert_eq!(seen.len(), 30);
    assert_eq!(seen.first(), Some(&5));
    assert_eq!(seen.last(), Some(&150));
}

#[test]
fn utility_charges_cover_their_band() {
    let mut mins = i64::MAX;
    let mut maxs = i64::MIN;
    for seed in 0..500 {
        let mut cfg = GameConfig::default();
        cfg.risk.fire_chance = 0.0;
        let mut state = GameState::with_config(seed, cfg);
        let summary = timberlot_game::end_day(&mut state, |_| false);
        let timberlot_game::DayEvent::Utility { charge } = summary.events[0] else {
            panic!("utility is always first");
        };
        assert!((10..=40).contains(&charge));
        mins = mins.min(charge);
        maxs = maxs.max(charge);
    }
    assert_eq!(mins, 10);
    assert_eq!(maxs, 40);
}

#[test]
fn wheel_of_fortune_expected_value_matches_the_table() {
    // E[multiplier] over {0, 2, 5, 10, 20} is 7.4.
    let mut state = {
        let mut cfg = GameConfig::default();
        cfg.economy.starting_money = 1_000_000;
        GameState::with_config(3, cfg)
    };
    let mut total_net: i64 = 0;
    for _ in 0..SAMPLE_SIZE {
        let receipt =
            actions::play_wager(&mut state, 10, &timberlot_game::WheelOfFortune).unwrap();
        total_net += receipt.net();
    }
    let per_play = timberlot_game::numbers::i64_to_f64(total_net) / f64::from(SAMPLE_SIZE);
    let expected = 10.0 * (7.4 - 1.0);
    assert!(
        (per_play - expected).abs() <= expected * 0.1,
        "wheel EV drifted: observed {per_play:.2} per play"
    );
}
