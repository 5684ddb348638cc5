//! Endgame king drive: with material in hand, push the defending king to
//! the rim and bring our own king up to help mate it.

use sabre_core::{Board, Color, Square};

/// Bonus when the defending king stands in a corner.
const CORNER_BONUS: i32 = 50;
/// Bonus when the defending king stands on an edge.
const EDGE_BONUS: i32 = 30;
/// Bonus per step of manhattan distance the kings are closer than the maximum of 14.
const PROXIMITY_WEIGHT: i32 = 6;

/// Score for the attacking side, given the defending king's square and ours.
fn drive_score(defender: Square, attacker: Square) -> i32 {
    let rim = if defender.is_corner() {
        CORNER_BONUS
    } else if defender.is_edge() {
        EDGE_BONUS
    } else {
        0
    };
    rim + (14 - defender.manhattan_distance(attacker) as i32) * PROXIMITY_WEIGHT
}

/// King drive term from White's perspective.
///
/// `material` is the White-minus-Black balance; the side ahead is the
/// attacker. Level material scores zero.
pub fn king_drive(board: &Board, material: i32) -> i32 {
    let white = board.king_square(Color::White);
    let black = board.king_square(Color::Black);
    match material.signum() {
        1 => drive_score(black, white),
        -1 => -drive_score(white, black),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(fen: &str, material: i32) -> i32 {
        king_drive(&fen.parse::<Board>().unwrap(), material)
    }

    #[test]
    fn cornered_defender_scores_more() {
        let cornered = drive("7k/8/8/8/8/8/8/R3K3 w - - 0 1", 500);
        let centred = drive("8/8/8/4k3/8/8/8/R3K3 w - - 0 1", 500);
        assert!(cornered > centred, "{cornered} vs {centred}");
        assert_eq!(drive_score("h8".parse().unwrap(), "a1".parse().unwrap()), CORNER_BONUS);
    }

    #[test]
    fn closer_kings_score_more() {
        let far = drive("7k/8/8/8/8/8/8/KR6 w - - 0 1", 500);
        let near = drive("7k/8/5K2/8/8/8/8/R7 w - - 0 1", 500);
        assert!(near > far);
    }

    #[test]
    fn sign_follows_the_side_ahead() {
        let fen = "7k/8/5K2/8/8/8/8/8 w - - 0 1";
        assert!(drive(fen, 300) > 0);
        assert!(drive(fen, -300) < 0);
        assert_eq!(drive(fen, 0), 0);
    }
}
