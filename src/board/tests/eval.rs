//! Static evaluation and evaluation cache tests.

use super::{play, position};
use crate::board::{evaluate, BoardState, CastlingRights, Color, EvalCache, SearchEngine};

const EMPTY: &str = "........";

#[test]
fn test_initial_position_is_balanced() {
    assert_eq!(evaluate(&BoardState::initial()), 0);
}

#[test]
fn test_white_positive_convention() {
    let white_up = position(
        ["....k...", EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, "...Q....", "....K..."],
        Color::White,
        CastlingRights::none(),
    );
    let black_up = position(
        ["....k...", "...q....", EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, "....K..."],
        Color::White,
        CastlingRights::none(),
    );
    let score = evaluate(&white_up);
    assert!(score > 800, "extra queen should dominate, got {score}");
    assert_eq!(evaluate(&black_up), -score);
}

#[test]
fn test_eval_ignores_side_to_move() {
    let white_up = position(
        ["....k...", EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, "...Q....", "....K..."],
        Color::White,
        CastlingRights::none(),
    );
    let black_to_move = position(
        ["....k...", EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, "...Q....", "....K..."],
        Color::Black,
        CastlingRights::none(),
    );
    assert_eq!(evaluate(&white_up), evaluate(&black_to_move));
}

#[test]
fn test_cache_second_call_is_a_hit() {
    let state = play(&BoardState::initial(), &["e2e4", "d7d5"]);
    let mut cache = EvalCache::new(64);

    let first = cache.evaluate(&state);
    assert_eq!((cache.hits(), cache.misses()), (0, 1));

    let second = cache.evaluate(&state);
    assert_eq!(first, second);
    assert_eq!(first, evaluate(&state));
    assert_eq!((cache.hits(), cache.misses()), (1, 1));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_capacity_bound() {
    let mut cache = EvalCache::new(2);
    let a = BoardState::initial();
    let b = play(&a, &["e2e4"]);
    let c = play(&b, &["e7e5"]);
    cache.evaluate(&a);
    cache.evaluate(&b);
    cache.evaluate(&c);
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.hits(), 0);
}

#[test]
fn test_engine_evaluation_is_cached() {
    let engine = SearchEngine::new();
    let state = BoardState::initial();
    assert_eq!(engine.evaluate(&state), engine.evaluate(&state));
    let stats = engine.stats();
    assert_eq!(stats.eval_hits, 1);
    assert_eq!(stats.eval_misses, 1);
}
