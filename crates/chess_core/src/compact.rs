use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

use crate::board::{Board, CastlingRights};
use crate::piece::{Color, Piece, PieceType};
use crate::Position;

#[derive(Debug, Error)]
pub enum CompactError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is {0} bytes, shorter than the 8-byte occupancy header")]
    MissingHeader(usize),
    #[error("payload length {actual} does not match the {expected} bytes implied by {occupied} occupied squares")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        occupied: usize,
    },
}

// 4-bit piece codes. 0-11 cover the twelve plain piece/color pairs; 12-15
// are overloaded to carry the en-passant target (12), per-side castling
// rights (13/14) and the side to move (11 vs 15), so the blob needs no
// extra state bytes. Half-move clock and full-move number are not encoded.
impl Board {
    /// Compact blob: 8 occupancy bytes (one per rank, top to bottom, bit j =
    /// file j), then two 4-bit piece codes per byte in scan order, low
    /// nibble first, wrapped in unpadded URL-safe base64.
    pub fn to_base64(&self) -> String {
        let mut occupancy = [0u8; 8];
        let mut packed: Vec<u8> = Vec::new();
        let mut nibbles = 0usize;
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.squares[row][col] {
                    occupancy[row] |= 1 << col;
                    let code = self.piece_code(row, col, piece);
                    if nibbles % 2 == 0 {
                        packed.push(code);
                    } else if let Some(last) = packed.last_mut() {
                        *last |= code << 4;
                    }
                    nibbles += 1;
                }
            }
        }
        let mut bytes = Vec::with_capacity(8 + packed.len());
        bytes.extend_from_slice(&occupancy);
        bytes.extend_from_slice(&packed);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    pub fn from_base64(text: &str) -> Result<Self, CompactError> {
        let bytes = URL_SAFE_NO_PAD.decode(text)?;
        if bytes.len() < 8 {
            return Err(CompactError::MissingHeader(bytes.len()));
        }
        let occupied: usize = bytes[..8].iter().map(|b| b.count_ones() as usize).sum();
        let expected = 8 + (occupied + 1) / 2;
        if bytes.len() != expected {
            return Err(CompactError::LengthMismatch {
                expected,
                actual: bytes.len(),
                occupied,
            });
        }

        let mut board = Board::empty();
        board.castling_rights = CastlingRights::none();
        let mut piece_num = 0usize;
        for row in 0..8 {
            for col in 0..8 {
                if bytes[row] & (1 << col) == 0 {
                    continue;
                }
                let byte = bytes[8 + piece_num / 2];
                let code = if piece_num % 2 == 1 { byte >> 4 } else { byte & 15 };
                piece_num += 1;
                let piece = match code {
                    0 => Piece::new(PieceType::Pawn, Color::White),
                    1 => Piece::new(PieceType::Pawn, Color::Black),
                    2 => Piece::new(PieceType::Knight, Color::White),
                    3 => Piece::new(PieceType::Knight, Color::Black),
                    4 => Piece::new(PieceType::Bishop, Color::White),
                    5 => Piece::new(PieceType::Bishop, Color::Black),
                    6 => Piece::new(PieceType::Rook, Color::White),
                    7 => Piece::new(PieceType::Rook, Color::Black),
                    8 => Piece::new(PieceType::Queen, Color::White),
                    9 => Piece::new(PieceType::Queen, Color::Black),
                    10 => Piece::new(PieceType::King, Color::White),
                    11 => Piece::new(PieceType::King, Color::Black),
                    12 => {
                        // A just-advanced pawn; its rank tells the color and
                        // the en-passant target square.
                        if row == 3 {
                            board.en_passant_target = Position::new(col as u8 + 1, 6);
                            Piece::new(PieceType::Pawn, Color::Black)
                        } else {
                            board.en_passant_target = Position::new(col as u8 + 1, 3);
                            Piece::new(PieceType::Pawn, Color::White)
                        }
                    }
                    13 => {
                        if col == 0 {
                            board.castling_rights.white_queenside = true;
                        } else {
                            board.castling_rights.white_kingside = true;
                        }
                        Piece::new(PieceType::Rook, Color::White)
                    }
                    14 => {
                        if col == 0 {
                            board.castling_rights.black_queenside = true;
                        } else {
                            board.castling_rights.black_kingside = true;
                        }
                        Piece::new(PieceType::Rook, Color::Black)
                    }
                    // 15: black king, black to move
                    _ => {
                        board.active_color = Color::Black;
                        Piece::new(PieceType::King, Color::Black)
                    }
                };
                board.squares[row][col] = Some(piece);
            }
        }
        Ok(board)
    }

    fn piece_code(&self, row: usize, col: usize, piece: Piece) -> u8 {
        let rights = self.castling_rights;
        match (piece.piece_type, piece.color) {
            (PieceType::Pawn, Color::White) => {
                if row == 4 && self.en_passant_target == Position::new(col as u8 + 1, 3) {
                    12
                } else {
                    0
                }
            }
            (PieceType::Pawn, Color::Black) => {
                if row == 3 && self.en_passant_target == Position::new(col as u8 + 1, 6) {
                    12
                } else {
                    1
                }
            }
            (PieceType::Knight, Color::White) => 2,
            (PieceType::Knight, Color::Black) => 3,
            (PieceType::Bishop, Color::White) => 4,
            (PieceType::Bishop, Color::Black) => 5,
            (PieceType::Rook, Color::White) => {
                if (col == 0 && rights.white_queenside) || (col == 7 && rights.white_kingside) {
                    13
                } else {
                    6
                }
            }
            (PieceType::Rook, Color::Black) => {
                if (col == 0 && rights.black_queenside) || (col == 7 && rights.black_kingside) {
                    14
                } else {
                    7
                }
            }
            (PieceType::Queen, Color::White) => 8,
            (PieceType::Queen, Color::Black) => 9,
            (PieceType::King, Color::White) => 10,
            (PieceType::King, Color::Black) => {
                if self.active_color == Color::Black {
                    15
                } else {
                    11
                }
            }
        }
    }
}
