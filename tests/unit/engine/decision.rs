//! Unit tests for the decision mapper and target calculator

use coinsage::engine::decision::map_score;
use coinsage::engine::targets::calculate_targets;
use coinsage::models::recommendation::{Advice, TargetSet};

#[test]
fn threshold_boundaries_resolve_to_stronger_category() {
    assert_eq!(map_score(0.70).0, Advice::StrongBuy);
    assert_eq!(map_score(0.6999).0, Advice::Buy);
    assert_eq!(map_score(0.30).0, Advice::Buy);
    assert_eq!(map_score(0.2999).0, Advice::Hold);
    assert_eq!(map_score(-0.30).0, Advice::Sell);
    assert_eq!(map_score(-0.2999).0, Advice::Hold);
    assert_eq!(map_score(-0.70).0, Advice::StrongSell);
    assert_eq!(map_score(-0.6999).0, Advice::Sell);
}

#[test]
fn confidence_tracks_score_magnitude() {
    assert_eq!(map_score(0.5), (Advice::Buy, 0.5));
    assert_eq!(map_score(-0.5), (Advice::Sell, 0.5));
    assert_eq!(map_score(0.85), (Advice::StrongBuy, 0.85));
}

#[test]
fn hold_confidence_is_inverse_of_magnitude() {
    assert_eq!(map_score(0.0), (Advice::Hold, 1.0));
    let (advice, confidence) = map_score(0.2);
    assert_eq!(advice, Advice::Hold);
    assert!((confidence - 0.8).abs() < 1e-9);
}

#[test]
fn strong_confidence_is_capped_at_one() {
    // Composite can only exceed 1 in magnitude through rounding noise, but
    // the cap is part of the contract.
    let (_, confidence) = map_score(1.0);
    assert!(confidence <= 1.0);
}

#[test]
fn buy_targets_project_upside() {
    let targets = calculate_targets(100.0, Advice::Buy, 0.8);
    match targets {
        TargetSet::Directional {
            entry,
            target_1,
            target_2,
            stop_loss,
        } => {
            assert_eq!(entry, 100.0);
            assert_eq!(target_1, 104.0);
            assert_eq!(target_2, 108.0);
            assert_eq!(stop_loss, 97.6);
        }
        _ => panic!("expected directional targets"),
    }
}

#[test]
fn sell_targets_mirror_buy_targets() {
    let confidence = 0.8;
    let buy = calculate_targets(100.0, Advice::Buy, confidence);
    let sell = calculate_targets(100.0, Advice::Sell, confidence);
    match (buy, sell) {
        (
            TargetSet::Directional {
                target_1: buy_t1,
                target_2: buy_t2,
                stop_loss: buy_stop,
                ..
            },
            TargetSet::Directional {
                target_1: sell_t1,
                target_2: sell_t2,
                stop_loss: sell_stop,
                ..
            },
        ) => {
            assert_eq!(buy_t1 - 100.0, 100.0 - sell_t1);
            assert_eq!(buy_t2 - 100.0, 100.0 - sell_t2);
            assert_eq!(100.0 - buy_stop, sell_stop - 100.0);
        }
        _ => panic!("expected directional targets"),
    }
}

#[test]
fn strong_advices_use_the_same_target_math() {
    let strong = calculate_targets(100.0, Advice::StrongBuy, 1.0);
    match strong {
        TargetSet::Directional { target_1, .. } => assert_eq!(target_1, 105.0),
        _ => panic!("expected directional targets"),
    }
}

#[test]
fn hold_gets_a_neutral_band() {
    let targets = calculate_targets(200.0, Advice::Hold, 0.9);
    match targets {
        TargetSet::Neutral {
            entry,
            support,
            resistance,
        } => {
            assert_eq!(entry, 200.0);
            assert_eq!(support, 190.0);
            assert_eq!(resistance, 210.0);
        }
        _ => panic!("expected neutral band"),
    }
}

#[test]
fn contrarian_alert_gets_a_neutral_band() {
    let targets = calculate_targets(100.0, Advice::ContrarianAlert, 1.0);
    match targets {
        TargetSet::Neutral {
            support,
            resistance,
            ..
        } => {
            assert_eq!(support, 95.0);
            assert_eq!(resistance, 105.0);
        }
        _ => panic!("expected neutral band"),
    }
}
