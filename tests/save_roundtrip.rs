//! Test suite for saved-game serialization
//! Round-trips live states through JSON and checks that corrupt saves are
//! rejected as a whole rather than partially restored.

use ultimate_ttt::{
    Cell, Difficulty, Error, GamePlayer, GameState, Player, SavedGame, SavedState,
};

/// Apply a scripted move list to a fresh size-3 game.
fn play_out(moves: &[(usize, usize)]) -> GameState {
    let mut state = GameState::new(3).expect("valid size");
    for &(board, tile) in moves {
        assert!(
            state.make_move(board, tile),
            "scripted move (board {board}, tile {tile}) must be legal"
        );
    }
    state
}

/// X wins boards 0, 1, and 2, completing the macro top row.
const X_MACRO_WIN: [(usize, usize); 19] = [
    (0, 3),
    (3, 0),
    (0, 6),
    (6, 0),
    (0, 0),
    (3, 1),
    (1, 3),
    (3, 6),
    (6, 7),
    (7, 1),
    (1, 6),
    (6, 1),
    (1, 0),
    (7, 2),
    (2, 3),
    (3, 2),
    (2, 6),
    (6, 2),
    (2, 0),
];

mod round_trips {
    use super::*;

    #[test]
    fn mid_game_state_round_trips_through_json() {
        let state = play_out(&X_MACRO_WIN[..9]);
        let saved = SavedGame::new(
            &state,
            GamePlayer::human("Ada", Player::X),
            GamePlayer::ai("Bot", Player::O, Difficulty::Hard),
        );

        let json = saved.to_json().expect("serializes");
        let loaded = SavedGame::from_json(&json).expect("parses");
        let (restored, player_x, player_o) = loaded.restore().expect("restores");

        assert_eq!(restored.macro_board(), state.macro_board());
        for i in 0..state.area() {
            assert_eq!(restored.micro_board(i), state.micro_board(i));
        }
        assert_eq!(restored.next_player(), state.next_player());
        assert_eq!(restored.next_board(), state.next_board());
        assert_eq!(restored.winner(), state.winner());
        assert_eq!(restored.valid_moves(), state.valid_moves());
        assert_eq!(player_x.name, "Ada");
        assert_eq!(player_o.name, "Bot");
    }

    #[test]
    fn finished_game_restores_its_winner_from_the_macro_board() {
        let state = play_out(&X_MACRO_WIN);
        assert_eq!(state.winner(), Some(Player::X));

        let restored = SavedState::capture(&state)
            .restore()
            .expect("a finished game is a valid save");
        assert_eq!(restored.winner(), Some(Player::X));
        assert!(restored.valid_moves().is_empty());
        assert!(restored.is_terminal());
    }

    #[test]
    fn restored_state_continues_playing_identically() {
        let state = play_out(&X_MACRO_WIN[..9]);
        let mut restored = SavedState::capture(&state).restore().expect("restores");
        let mut original = state.clone();

        let mv = original.valid_moves()[0];
        assert!(original.make_move(mv.board, mv.tile));
        assert!(restored.make_move(mv.board, mv.tile));
        assert_eq!(original.valid_moves(), restored.valid_moves());
        assert_eq!(original.next_board(), restored.next_board());
    }
}

mod corrupt_saves {
    use super::*;

    fn assert_corrupt(result: Result<GameState, Error>) {
        match result {
            Err(Error::CorruptSave { .. }) => {}
            Err(other) => panic!("expected CorruptSave, got {other}"),
            Ok(_) => panic!("corrupt save must not restore"),
        }
    }

    #[test]
    fn truncated_small_board_is_rejected() {
        let mut saved = SavedState::capture(&play_out(&X_MACRO_WIN[..5]));
        saved.small_boards[3].truncate(4);
        assert_corrupt(saved.restore());
    }

    #[test]
    fn macro_entry_claiming_an_unwon_board_is_rejected() {
        let mut saved = SavedState::capture(&play_out(&X_MACRO_WIN[..5]));
        saved.board[7] = Cell::X;
        assert_corrupt(saved.restore());
    }

    #[test]
    fn macro_entry_hiding_a_won_board_is_rejected() {
        let mut saved = SavedState::capture(&play_out(&X_MACRO_WIN[..5]));
        // board 0 was won by X; claim it is still open
        assert_eq!(saved.board[0], Cell::X);
        saved.board[0] = Cell::Empty;
        assert_corrupt(saved.restore());
    }

    #[test]
    fn forced_board_pointing_at_a_decided_board_is_rejected() {
        let mut saved = SavedState::capture(&play_out(&X_MACRO_WIN[..9]));
        saved.next_board = Some(0); // board 0 is already decided
        assert_corrupt(saved.restore());
    }

    #[test]
    fn forced_board_out_of_range_is_rejected() {
        let mut saved = SavedState::capture(&play_out(&X_MACRO_WIN[..9]));
        saved.next_board = Some(81);
        assert_corrupt(saved.restore());
    }

    #[test]
    fn turn_disagreeing_with_piece_counts_is_rejected() {
        let mut saved = SavedState::capture(&play_out(&X_MACRO_WIN[..9]));
        saved.next_player = saved.next_player.opponent();
        assert_corrupt(saved.restore());
    }

    #[test]
    fn finished_game_with_a_forced_board_is_rejected() {
        let mut saved = SavedState::capture(&play_out(&X_MACRO_WIN));
        saved.next_board = Some(4);
        assert_corrupt(saved.restore());
    }

    #[test]
    fn garbage_json_is_a_serialization_error() {
        let result = SavedGame::from_json("{\"state\": 42}");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
