//! Search tests: mates, determinism, time control and caching.

use std::time::{Duration, Instant};

use super::{find_move, position};
use crate::board::{
    BoardState, CastlingRights, ChessError, Color, EngineConfig, SearchEngine, SearchLimits,
};

const EMPTY: &str = "........";

fn white_mates_in_one() -> BoardState {
    position(
        [".......k", EMPTY, "......K.", EMPTY, EMPTY, EMPTY, EMPTY, "R......."],
        Color::White,
        CastlingRights::none(),
    )
}

fn black_mates_in_one() -> BoardState {
    position(
        ["r.......", EMPTY, EMPTY, EMPTY, EMPTY, "......k.", EMPTY, ".......K"],
        Color::Black,
        CastlingRights::none(),
    )
}

#[test]
fn test_finds_mate_in_one_for_white() {
    let engine = SearchEngine::new();
    let state = white_mates_in_one();
    let result = engine.generate_move(&state, SearchLimits::depth(3)).unwrap();
    assert_eq!(result.best_move, find_move(&state, "a1a8"));
    assert!(engine.config().is_mate_score(result.score));
    assert!(result.score > 0);
    // A fixed depth is searched to the end even once a mate is proven
    assert_eq!(result.depth, 3);
}

#[test]
fn test_timed_search_stops_at_proven_mate() {
    let engine = SearchEngine::new();
    let state = white_mates_in_one();
    let result = engine
        .generate_move(
            &state,
            SearchLimits::time(Duration::from_secs(30)).with_depth(5),
        )
        .unwrap();
    assert_eq!(result.best_move, find_move(&state, "a1a8"));
    assert_eq!(result.depth, 1);
}

#[test]
fn test_finds_mate_in_one_for_black() {
    let engine = SearchEngine::new();
    let state = black_mates_in_one();
    let result = engine.generate_move(&state, SearchLimits::depth(2)).unwrap();
    assert_eq!(result.best_move, find_move(&state, "a8a1"));
    assert!(result.score < 0);
    assert!(engine.config().is_mate_score(result.score));
}

#[test]
fn test_terminal_search_has_no_move() {
    let engine = SearchEngine::new();
    let state = white_mates_in_one();
    let mated = state.apply(find_move(&state, "a1a8")).unwrap();
    let (score, mv) = engine
        .search(&mated, 2, i32::MIN, i32::MAX, false)
        .unwrap();
    assert_eq!(mv, None);
    assert_eq!(score, engine.config().mate_score + 2);
}

#[test]
fn test_search_is_deterministic() {
    let engine = SearchEngine::new();
    let state = BoardState::initial();

    let first = engine.search(&state, 3, i32::MIN, i32::MAX, true).unwrap();
    engine.clear_cache();
    let second = engine.search(&state, 3, i32::MIN, i32::MAX, true).unwrap();
    assert_eq!(first, second);
    assert!(first.1.is_some());

    let other = SearchEngine::new();
    assert_eq!(
        other.search(&state, 3, i32::MIN, i32::MAX, true).unwrap(),
        first
    );
}

#[test]
fn test_transposition_table_reused() {
    let engine = SearchEngine::new();
    let state = BoardState::initial();
    let first = engine.generate_move(&state, SearchLimits::depth(2)).unwrap();
    let hits_before = engine.stats().tt_hits;
    let second = engine.generate_move(&state, SearchLimits::depth(2)).unwrap();
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert!(engine.stats().tt_hits > hits_before);
}

#[test]
fn test_time_bounded_search() {
    let engine = SearchEngine::new();
    let state = BoardState::initial();
    let result = engine
        .generate_move(&state, SearchLimits::time(Duration::from_millis(100)))
        .unwrap();
    assert!(result.depth >= 1);
    assert!(state.legal_moves().contains(&result.best_move));
}

#[test]
fn test_time_bounded_search_respects_depth_cap() {
    let engine = SearchEngine::new();
    let state = BoardState::initial();
    let result = engine
        .generate_move(
            &state,
            SearchLimits::time(Duration::from_secs(30)).with_depth(2),
        )
        .unwrap();
    assert_eq!(result.depth, 2);
}

#[test]
fn test_deadline_abandons_in_flight_depth() {
    let kiwipete = position(
        [
            "r...k..r", "p.ppqpb.", "bn..pnp.", "...PN...", ".p..P...", "..N..Q.p", "PPPBBPPP",
            "R...K..R",
        ],
        Color::White,
        CastlingRights::all(),
    );
    let engine = SearchEngine::with_config(EngineConfig::default().min_depth(1));

    let start = Instant::now();
    let result = engine
        .generate_move(
            &kiwipete,
            SearchLimits::time(Duration::from_millis(1)).with_depth(10),
        )
        .unwrap();
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(result.depth < 10);
    assert!(kiwipete.legal_moves().contains(&result.best_move));

    // The result is exactly what a fixed search to the same depth finds, so
    // nothing from the abandoned deeper iteration leaked into it
    let fixed = SearchEngine::new()
        .generate_move(&kiwipete, SearchLimits::depth(result.depth))
        .unwrap();
    assert_eq!(result, fixed);

    // The abandoned worker stops and hands the tables back
    let nodes_before = engine.stats().nodes;
    let state = BoardState::initial();
    let next = engine
        .generate_move(&state, SearchLimits::depth(2))
        .unwrap();
    assert!(state.legal_moves().contains(&next.best_move));
    assert_eq!(next.depth, 2);
    assert!(engine.stats().nodes >= nodes_before + next.nodes);
}

#[test]
fn test_zero_budget_still_completes_floor_depth() {
    let engine = SearchEngine::with_config(EngineConfig::default().min_depth(2));
    let state = BoardState::initial();
    let result = engine
        .generate_move(&state, SearchLimits::time(Duration::ZERO))
        .unwrap();
    assert_eq!(result.depth, 2);
    assert!(state.legal_moves().contains(&result.best_move));
}

#[test]
fn test_timed_and_fixed_agree_at_same_depth() {
    let state = BoardState::initial();
    let fixed = SearchEngine::new()
        .generate_move(&state, SearchLimits::depth(2))
        .unwrap();
    let timed = SearchEngine::new()
        .generate_move(
            &state,
            SearchLimits::time(Duration::from_secs(30)).with_depth(2),
        )
        .unwrap();
    assert_eq!(fixed, timed);
}

#[test]
fn test_finished_game_is_invalid_state() {
    let engine = SearchEngine::new();
    let state = white_mates_in_one();
    let mated = state.apply(find_move(&state, "a1a8")).unwrap();
    let err = engine
        .generate_move(&mated, SearchLimits::depth(2))
        .unwrap_err();
    assert!(matches!(err, ChessError::InvalidState { .. }));
}
