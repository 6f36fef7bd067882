//! One-hot encoding of chess positions, used as network inputs.
//!
//! Positions are read from [FEN] strings. Each of the 64 squares
//! becomes a row of [`FEATURES_PER_SQUARE`] flags, and the side to
//! move is prepended as a single value, for a total of
//! [`ENCODED_LEN`] inputs.
//!
//! [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use crate::genomics::Topology;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BOARD_WIDTH: usize = 8;
pub const SQUARE_COUNT: usize = BOARD_WIDTH * BOARD_WIDTH;
pub const FEATURES_PER_SQUARE: usize = 7;
/// Length of an encoded position: the side to move,
/// then one row per square.
pub const ENCODED_LEN: usize = SQUARE_COUNT * FEATURES_PER_SQUARE + 1;

/// Column of each flag within a square's row.
pub mod feature {
    pub const BLACK: usize = 0;
    pub const PAWN: usize = 1;
    pub const KNIGHT: usize = 2;
    pub const BISHOP: usize = 3;
    pub const ROOK: usize = 4;
    pub const QUEEN: usize = 5;
    pub const KING: usize = 6;
}

/// Errors raised while encoding a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("FEN is missing its {0} field")]
    MissingField(&'static str),
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files instead of 8")]
    RankWidth { rank: usize, files: usize },
    #[error("unknown piece '{0}' in piece placement")]
    UnknownPiece(char),
    #[error("unknown side to move '{0}'")]
    UnknownSide(String),
    #[error("topology takes {expected} inputs, encoded positions have {actual}")]
    InputWidth { expected: usize, actual: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

/// A one-hot encoded chess position.
///
/// Squares are ordered as in FEN: from a8 to h8,
/// then down rank by rank to h1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardEncoding {
    side_to_move: Side,
    squares: [[u8; FEATURES_PER_SQUARE]; SQUARE_COUNT],
}

/// Encodes the piece placement and side to move of a FEN string.
/// Remaining fields (castling, en passant, clocks) are ignored.
///
/// # Examples
/// ```
/// use chessnet::encoding::{encode_fen, feature, Side, ENCODED_LEN};
///
/// let board = encode_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
///
/// assert_eq!(board.side_to_move(), Side::White);
/// // a8 holds a black rook.
/// assert_eq!(board.square(0)[feature::BLACK], 1);
/// assert_eq!(board.square(0)[feature::ROOK], 1);
/// // e1 holds the white king.
/// assert_eq!(board.square(60)[feature::KING], 1);
/// assert_eq!(board.square(60)[feature::BLACK], 0);
///
/// assert_eq!(board.to_inputs().len(), ENCODED_LEN);
/// ```
pub fn encode_fen(fen: &str) -> Result<BoardEncoding, EncodingError> {
    let mut fields = fen.split_whitespace();
    let placement = fields
        .next()
        .ok_or(EncodingError::MissingField("piece placement"))?;
    let side_to_move = match fields.next() {
        Some("w") => Side::White,
        Some("b") => Side::Black,
        Some(other) => return Err(EncodingError::UnknownSide(other.to_owned())),
        None => return Err(EncodingError::MissingField("side to move")),
    };

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != BOARD_WIDTH {
        return Err(EncodingError::RankCount(ranks.len()));
    }

    let mut squares = [[0; FEATURES_PER_SQUARE]; SQUARE_COUNT];
    for (row, rank) in ranks.iter().enumerate() {
        let mut file = 0;
        for symbol in rank.chars() {
            if let Some(empty) = symbol.to_digit(10) {
                file += empty as usize;
                continue;
            }
            let piece = piece_feature(symbol).ok_or(EncodingError::UnknownPiece(symbol))?;
            if file >= BOARD_WIDTH {
                file += 1;
                break;
            }
            let square = &mut squares[row * BOARD_WIDTH + file];
            square[piece] = 1;
            if symbol.is_ascii_lowercase() {
                square[feature::BLACK] = 1;
            }
            file += 1;
        }
        if file != BOARD_WIDTH {
            return Err(EncodingError::RankWidth {
                rank: BOARD_WIDTH - row,
                files: file,
            });
        }
    }

    Ok(BoardEncoding {
        side_to_move,
        squares,
    })
}

fn piece_feature(symbol: char) -> Option<usize> {
    match symbol.to_ascii_lowercase() {
        'p' => Some(feature::PAWN),
        'n' => Some(feature::KNIGHT),
        'b' => Some(feature::BISHOP),
        'r' => Some(feature::ROOK),
        'q' => Some(feature::QUEEN),
        'k' => Some(feature::KING),
        _ => None,
    }
}

impl BoardEncoding {
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Returns the flags of a square, indexed in FEN order.
    ///
    /// # Panics
    /// If `index` is not below [`SQUARE_COUNT`].
    pub fn square(&self, index: usize) -> &[u8; FEATURES_PER_SQUARE] {
        &self.squares[index]
    }

    /// Flattens the position into network inputs:
    /// the side to move (0 for white, 1 for black),
    /// followed by each square's flags.
    pub fn to_inputs(&self) -> Vec<f64> {
        let side = match self.side_to_move {
            Side::White => 0.0,
            Side::Black => 1.0,
        };
        std::iter::once(side)
            .chain(self.squares.iter().flatten().map(|&flag| f64::from(flag)))
            .collect()
    }

    /// Like [`to_inputs`], but first checks that
    /// networks of `topology` take encoded positions.
    ///
    /// [`to_inputs`]: BoardEncoding::to_inputs
    pub fn inputs_for(&self, topology: &Topology) -> Result<Vec<f64>, EncodingError> {
        let expected = topology.input_count().get();
        if expected != ENCODED_LEN {
            return Err(EncodingError::InputWidth {
                expected,
                actual: ENCODED_LEN,
            });
        }
        Ok(self.to_inputs())
    }
}
