use sabre_core::{Board, GameStatus, Move};
use sabre_engine::{Engine, INF, MATE_SCORE, Searcher, evaluate};

const SCHOLARS_MATE: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
const FOOLS_MATE: &str = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
const ROOK_LADDER: &str = "7k/8/R7/1R6/8/8/8/6K1 w - - 0 1";
const STALEMATE: &str = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";
const LOCKED_PAWNS: &str = "4k3/8/8/p1p1p1p1/P1P1P1P1/8/8/4K3 w - - 0 1";
const LAST_FULLMOVE: &str = "4k3/8/8/8/8/8/8/R3K3 b - - 0 65535";

fn engine_at(fen: &str) -> Engine {
    let mut engine = Engine::default();
    engine.set_position(fen).unwrap();
    engine
}

fn leads_to_mate(board: &Board, mv: Move) -> bool {
    let mut child = board.clone();
    child.make_move(mv);
    child.status() == GameStatus::Checkmate
}

/// Plain minimax with no pruning and no table, scoring leaves statically.
fn minimax(board: &mut Board, depth: i32, ply: u32) -> i32 {
    if depth <= 0 || board.status().is_over() {
        return evaluate(board, ply);
    }
    let mut best = -INF;
    for &mv in board.legal_moves().iter() {
        board.make_move(mv);
        best = best.max(-minimax(board, depth - 1, ply + 1));
        board.unmake_move(mv);
    }
    best
}

#[test]
fn depth_one_from_the_start_picks_a_legal_opening_move() {
    let mut engine = Engine::default();
    let legal = engine.board().legal_moves();
    assert_eq!(legal.len(), 20);
    let mv = engine.best_move(1).expect("a move exists");
    assert!(legal.contains(&mv), "{mv} is not a legal opening move");
}

#[test]
fn mate_in_one_for_white() {
    for depth in 1..=3 {
        let mut engine = engine_at(SCHOLARS_MATE);
        let result = engine.search(depth);
        assert_eq!(result.best_move.map(|mv| mv.to_uci()).as_deref(), Some("h5f7"));
        assert_eq!(result.score, MATE_SCORE - 1);
    }
}

#[test]
fn mate_in_one_for_black() {
    let mut engine = engine_at(FOOLS_MATE);
    let result = engine.search(3);
    assert_eq!(result.best_move.map(|mv| mv.to_uci()).as_deref(), Some("d8h4"));
    assert_eq!(result.score, MATE_SCORE - 1);
}

#[test]
fn mate_in_two_is_forced() {
    let mut engine = engine_at(ROOK_LADDER);
    let result = engine.search(3);
    let first = result.best_move.expect("a move exists");
    // Mated side is three plies from the root.
    assert_eq!(result.score, MATE_SCORE - 3);

    engine.play(first);
    let after_first = engine.board().clone();
    let replies = after_first.legal_moves();
    assert!(!replies.is_empty(), "{first} stalemates");

    for &reply in replies.iter() {
        let mut line = engine_at(&after_first.to_string());
        line.play(reply);
        let finish = line.search(1);
        let mate = finish.best_move.expect("white has a move");
        assert!(leads_to_mate(line.board(), mate), "{first} {reply} {mate} is not mate");
        assert_eq!(finish.score, MATE_SCORE - 1);
    }
}

#[test]
fn defender_sees_mate_two_plies_away() {
    let mut engine = engine_at(ROOK_LADDER);
    let first = engine.best_move(3).unwrap();
    engine.play(first);

    let mut defender = engine_at(&engine.board().to_string());
    let result = defender.search(2);
    assert!(result.best_move.is_some());
    assert_eq!(result.score, -(MATE_SCORE - 2));
}

#[test]
fn stalemate_has_no_best_move() {
    let mut engine = engine_at(STALEMATE);
    assert_eq!(engine.best_move(4), None);

    let mut board: Board = STALEMATE.parse().unwrap();
    assert_eq!(evaluate(&mut board, 0), 0);
}

#[test]
fn pruning_matches_plain_minimax() {
    for (fen, depth) in [(LOCKED_PAWNS, 3), (ROOK_LADDER, 2)] {
        let mut board: Board = fen.parse().unwrap();
        let reference = minimax(&mut board, depth, 0);

        let mut searcher = Searcher::default();
        let pruned = searcher.negamax(&mut board, depth, -MATE_SCORE, MATE_SCORE, 0);
        assert_eq!(pruned, reference, "{fen}");

        let root = Searcher::default().search(&mut board, depth);
        assert_eq!(root.score, reference, "{fen}");
    }
}

#[test]
fn narrow_windows_bound_the_true_score() {
    let mut board: Board = LOCKED_PAWNS.parse().unwrap();
    let exact = minimax(&mut board, 2, 0);

    for (alpha, beta) in [(exact - 50, exact + 50), (exact + 10, exact + 60), (exact - 60, exact - 10)] {
        let score = Searcher::default().negamax(&mut board, 2, alpha, beta, 0);
        if exact <= alpha {
            assert!(score <= alpha, "({alpha}, {beta}) gave {score}, true {exact}");
        } else if exact >= beta {
            assert!(score >= beta, "({alpha}, {beta}) gave {score}, true {exact}");
        } else {
            assert_eq!(score, exact);
        }
    }
}

#[test]
fn search_restores_the_position() {
    for fen in [SCHOLARS_MATE, ROOK_LADDER, sabre_core::STARTING_FEN] {
        let mut engine = engine_at(fen);
        let before = engine.board().clone();
        engine.search(3);
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.board().hash(), engine.board().compute_hash());
    }
}

#[test]
fn warm_table_repeats_the_answer_with_fewer_nodes() {
    let mut engine = Engine::default();
    let cold = engine.search(2);
    let warm = engine.search(2);
    assert_eq!(warm.best_move, cold.best_move);
    assert_eq!(warm.score, cold.score);
    assert!(warm.nodes < cold.nodes);
    assert_eq!(warm.nodes, engine.board().legal_moves().len() as u64);
}

#[test]
fn shared_table_across_positions_stays_correct() {
    let mut engine = engine_at(ROOK_LADDER);
    engine.search(3);
    engine.set_position(SCHOLARS_MATE).unwrap();
    assert_eq!(engine.best_move(3).map(|mv| mv.to_uci()).as_deref(), Some("h5f7"));
}

#[test]
fn non_positive_depth_falls_back_to_quiescence() {
    for depth in [0, -1] {
        let mut engine = Engine::default();
        let result = engine.search(depth);
        let mv = result.best_move.expect("a move exists");
        assert!(engine.board().legal_moves().contains(&mv));
    }
}

#[test]
fn search_at_the_last_fullmove_number() {
    let mut engine = engine_at(LAST_FULLMOVE);
    let before = engine.board().clone();
    let result = engine.search(2);
    assert!(result.best_move.is_some());
    assert_eq!(engine.board(), &before);
    assert_eq!(engine.board().fullmove_number(), u16::MAX);
}

#[test]
fn node_counter_resets_per_search() {
    let mut engine = Engine::default();
    let deep = engine.search(3);
    engine.clear_tt();
    let shallow = engine.search(1);
    assert!(shallow.nodes < deep.nodes);
    assert_eq!(engine.positions_searched(), shallow.nodes);
}
