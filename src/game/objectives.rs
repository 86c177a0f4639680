//! Round-win and run-loss conditions

use crate::core::Side;
use crate::game::rounds::Objective;
use crate::game::GameState;

/// Whether the current round's objective is met
///
/// The check objective is re-evaluated on every move, so a check delivered
/// earlier in the round still counts.
pub fn check_round_win(game: &GameState) -> bool {
    match game.objective {
        Objective::CaptureCount => game.capture_count >= game.target,
        Objective::Check => {
            game.delivered_check || game.is_in_check(Side::Enemy) || game.is_checkmate(Side::Enemy)
        }
    }
}

/// Whether the run is over, evaluated after each enemy phase
pub fn check_loss(game: &GameState) -> bool {
    game.king(Side::Player).is_none()
        || game.count_side(Side::Player) == 0
        || game.turn > game.turn_limit
        || game.is_checkmate(Side::Player)
}

pub fn objective_text(game: &GameState) -> String {
    match game.objective {
        Objective::CaptureCount => format!("Capture {} enemy pieces", game.target),
        Objective::Check => "Deliver check to enemy king".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceType;

    fn game_with_kings() -> GameState {
        let mut game = GameState::new(0);
        game.board_w = 6;
        game.board_h = 6;
        game.turn_limit = 10;
        game.spawn_piece(Side::Player, PieceType::King, 0, 5);
        game.spawn_piece(Side::Enemy, PieceType::King, 5, 0);
        game
    }

    #[test]
    fn test_capture_objective() {
        let mut game = game_with_kings();
        game.objective = Objective::CaptureCount;
        game.target = 2;
        game.capture_count = 1;
        assert!(!check_round_win(&game));
        game.capture_count = 2;
        assert!(check_round_win(&game));
        assert_eq!(objective_text(&game), "Capture 2 enemy pieces");
    }

    #[test]
    fn test_check_objective_is_stateful() {
        let mut game = game_with_kings();
        game.objective = Objective::Check;
        assert!(!check_round_win(&game));

        // a rook on the enemy king's file gives check right now
        let rook = game.spawn_piece(Side::Player, PieceType::Rook, 5, 4);
        assert!(check_round_win(&game));

        game.remove_piece(rook);
        assert!(!check_round_win(&game));
        game.delivered_check = true;
        assert!(check_round_win(&game));
        assert_eq!(objective_text(&game), "Deliver check to enemy king");
    }

    #[test]
    fn test_loss_conditions() {
        let mut game = game_with_kings();
        assert!(!check_loss(&game));

        game.turn = 11;
        assert!(check_loss(&game));
        game.turn = 10;
        assert!(!check_loss(&game));

        let king = game.king(Side::Player).unwrap().id;
        game.remove_piece(king);
        assert!(check_loss(&game));
    }

    #[test]
    fn test_loss_on_checkmate() {
        let mut game = game_with_kings();
        // back-rank mate: rooks on rows 4 and 5
        game.spawn_piece(Side::Enemy, PieceType::Rook, 3, 5);
        game.spawn_piece(Side::Enemy, PieceType::Rook, 4, 4);
        assert!(game.is_checkmate(Side::Player));
        assert!(check_loss(&game));
    }
}
