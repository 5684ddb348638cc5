//! Negamax alpha-beta search with quiescence.

use sabre_core::Board;

use crate::eval::{evaluate, piece_value};
use crate::guard::MoveGuard;
use crate::score::{INF, MATE_SCORE};
use crate::search::Searcher;
use crate::search::ordering::order_moves;
use crate::search::tt::Bound;

/// Quiescence skips a capture whose attacker outweighs its victim by more than this.
pub const EXCHANGE_MARGIN: i32 = 50;

/// Quiescence skips a capture that cannot lift the score to within this of alpha.
pub const DELTA_MARGIN: i32 = 200;

impl Searcher {
    /// Negamax alpha-beta search of `board` to `depth` plies.
    ///
    /// Returns the score for the side to move, `ply` plies from the root.
    /// The board is restored before returning.
    ///
    /// Order of work at each node:
    /// 1. Decided positions return the static evaluation.
    /// 2. A transposition entry that settles the window is returned as is.
    /// 3. At depth 0 or below the node resolves through [`Searcher::quiesce`].
    /// 4. Otherwise the ordered legal moves are searched, cutting off once
    ///    alpha reaches beta, and the result is stored with its bound.
    pub fn negamax(&mut self, board: &mut Board, depth: i32, mut alpha: i32, beta: i32, ply: u32) -> i32 {
        self.nodes += 1;

        let mut moves = board.legal_moves();
        if board.status_with(&moves).is_over() {
            return evaluate(board, ply);
        }

        let hash = board.hash();
        let probe = self.tt.probe(hash, depth, alpha, beta, ply);
        if let Some(score) = probe.cutoff {
            return score;
        }

        // Bound classification needs the window the node was entered with.
        let original_alpha = alpha;

        if depth <= 0 {
            let score = self.quiesce(board, alpha, beta, ply);
            self.tt.store(hash, 0, score, Bound::classify(score, original_alpha, beta), None, ply);
            return score;
        }

        order_moves(board, &mut moves, probe.best_move);

        let mut best_score = -INF;
        let mut best_move = None;
        for &mv in moves.iter() {
            let score = {
                let mut child = MoveGuard::new(board, mv);
                -self.negamax(&mut child, depth - 1, -beta, -alpha, ply + 1)
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = Bound::classify(best_score, original_alpha, beta);
        self.tt.store(hash, depth, best_score, bound, best_move, ply);
        best_score
    }

    /// Quiescence search: extend only captures and promotions (every move
    /// when in check) until the position is quiet.
    ///
    /// Fail-hard: the result lies within `[alpha, beta]`, except for a side
    /// with no legal moves, which returns the mate or stalemate score.
    ///
    /// When not in check, a capture is skipped if the attacker is worth more
    /// than the victim by over [`EXCHANGE_MARGIN`], or if even winning the
    /// victim leaves the score more than [`DELTA_MARGIN`] below alpha.
    /// Promotions are always searched. Past the configured ply ceiling the
    /// stand-pat score is final.
    pub fn quiesce(&mut self, board: &mut Board, mut alpha: i32, beta: i32, ply: u32) -> i32 {
        self.nodes += 1;

        // Stand pat: the side to move may decline every capture.
        let stand_pat = evaluate(board, ply);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = board.legal_moves();
        if moves.is_empty() {
            return if board.in_check() {
                -(MATE_SCORE - ply as i32)
            } else {
                0
            };
        }
        if board.status_with(&moves).is_over() || ply >= self.config.max_ply {
            return alpha;
        }

        let in_check = board.in_check();
        moves.retain(|mv| {
            if in_check {
                return true;
            }
            if mv.is_promotion() {
                return true;
            }
            let Some(victim) = board.captured_kind(mv) else {
                return false;
            };
            let attacker = board.piece_on(mv.from()).map_or(0, |p| piece_value(p.kind()));
            let victim = piece_value(victim);
            attacker - victim <= EXCHANGE_MARGIN && stand_pat + victim + DELTA_MARGIN >= alpha
        });
        order_moves(board, &mut moves, None);

        for &mv in moves.iter() {
            let score = {
                let mut child = MoveGuard::new(board, mv);
                -self.quiesce(&mut child, -beta, -alpha, ply + 1)
            };
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}
