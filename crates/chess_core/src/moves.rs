use once_cell::sync::Lazy;
use thiserror::Error;

use crate::board::Board;
use crate::piece::{Color, Piece, PieceType};
use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveViolation {
    #[error("token does not match any recognized move shape")]
    UnrecognizedToken,
    #[error("castling right already forfeited")]
    CastlingForfeited,
    #[error("king or rook displaced, or squares between them occupied")]
    CastlingOutOfPlace,
    #[error("pawn may not move to that rank")]
    PawnRankOutOfRange,
    #[error("promotion piece missing")]
    MissingPromotion,
    #[error("pawn or required empty square not there")]
    PawnNotInPlace,
    #[error("pawn capture files must be adjacent")]
    CaptureFileNotAdjacent,
    #[error("capturing pawn or enemy piece missing")]
    PawnCaptureMismatch,
    #[error("capture target square is empty")]
    CaptureSquareEmpty,
    #[error("no {0} able to reach the target square")]
    PieceNotFound(char),
    #[error("multiple {0} able to reach the target square")]
    AmbiguousSource(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move `{token}`: {violation}")]
pub struct MoveError {
    pub token: String,
    pub violation: MoveViolation,
}

// Candidate-source offsets, added to the destination square. King and
// knight reach is one jump; the slider tables hold every cell along the
// 4 or 8 rays up to 7 steps out.
const KING_STEPS: [(i8, i8); 8] = [
    (-1, 1), (0, 1), (1, 1), (-1, 0), (1, 0), (-1, -1), (0, -1), (1, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2), (-1, 2), (2, 1), (-2, 1), (-1, -2), (1, -2), (-2, -1), (2, -1),
];

static BISHOP_RAYS: Lazy<Vec<(i8, i8)>> = Lazy::new(|| {
    let mut rays = Vec::with_capacity(28);
    for step in 1..8i8 {
        rays.extend([(step, step), (step, -step), (-step, step), (-step, -step)]);
    }
    rays
});

static ROOK_RAYS: Lazy<Vec<(i8, i8)>> = Lazy::new(|| {
    let mut rays = Vec::with_capacity(28);
    for step in 1..8i8 {
        rays.extend([(step, 0), (-step, 0), (0, step), (0, -step)]);
    }
    rays
});

static QUEEN_RAYS: Lazy<Vec<(i8, i8)>> =
    Lazy::new(|| BISHOP_RAYS.iter().chain(ROOK_RAYS.iter()).copied().collect());

fn offsets(piece_type: PieceType) -> &'static [(i8, i8)] {
    match piece_type {
        PieceType::King => &KING_STEPS,
        PieceType::Knight => &KNIGHT_JUMPS,
        PieceType::Bishop => &BISHOP_RAYS,
        PieceType::Rook => &ROOK_RAYS,
        PieceType::Queen => &QUEEN_RAYS,
        PieceType::Pawn => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastleSide {
    Kingside,
    Queenside,
}

// Grid rows (0 = rank 8) throughout, matching the board's internal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Castle(CastleSide),
    PawnPush {
        file: usize,
        row: usize,
        promotion: Option<PieceType>,
    },
    PawnCapture {
        from_file: usize,
        to_file: usize,
        row: usize,
        promotion: Option<PieceType>,
    },
    PieceMove {
        piece_type: PieceType,
        from_file: Option<usize>,
        from_row: Option<usize>,
        capture: bool,
        to_file: usize,
        to_row: usize,
    },
}

fn strip_annotations(token: &str) -> &str {
    token.trim_end_matches(|c| matches!(c, '+' | '#' | '?' | '!'))
}

fn file_index(b: u8) -> Option<usize> {
    (b'a'..=b'h').contains(&b).then(|| (b - b'a') as usize)
}

fn row_index(b: u8) -> Option<usize> {
    (b'1'..=b'8').contains(&b).then(|| (b'8' - b) as usize)
}

fn promotion_piece(b: u8) -> Option<PieceType> {
    match b {
        b'R' => Some(PieceType::Rook),
        b'N' => Some(PieceType::Knight),
        b'B' => Some(PieceType::Bishop),
        b'Q' => Some(PieceType::Queen),
        _ => None,
    }
}

fn parse_token(token: &str) -> Option<Token> {
    match token {
        "O-O" | "0-0" => return Some(Token::Castle(CastleSide::Kingside)),
        "O-O-O" | "0-0-0" => return Some(Token::Castle(CastleSide::Queenside)),
        _ => {}
    }
    let bytes = token.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    if let Some(file) = file_index(bytes[0]) {
        if bytes[1] == b'x' {
            // <fromFile>x<toFile><toRank>[=<promo>]
            if bytes.len() < 4 {
                return None;
            }
            let to_file = file_index(bytes[2])?;
            let row = row_index(bytes[3])?;
            let promotion = match bytes.len() {
                4 => None,
                6 if bytes[4] == b'=' => Some(promotion_piece(bytes[5])?),
                _ => return None,
            };
            return Some(Token::PawnCapture {
                from_file: file,
                to_file,
                row,
                promotion,
            });
        }
        // <file><rank>[=<promo>]
        let row = row_index(bytes[1])?;
        let promotion = match bytes.len() {
            2 => None,
            4 if bytes[2] == b'=' => Some(promotion_piece(bytes[3])?),
            _ => return None,
        };
        return Some(Token::PawnPush {
            file,
            row,
            promotion,
        });
    }

    // <PIECE>[fromFile][fromRank][x]<toFile><toRank>
    let piece_type = match bytes[0] {
        b'K' => PieceType::King,
        b'N' => PieceType::Knight,
        b'B' => PieceType::Bishop,
        b'R' => PieceType::Rook,
        b'Q' => PieceType::Queen,
        _ => return None,
    };
    if bytes.len() < 3 {
        return None;
    }
    let to_row = row_index(bytes[bytes.len() - 1])?;
    let to_file = file_index(bytes[bytes.len() - 2])?;
    let mut middle = &bytes[1..bytes.len() - 2];
    let capture = middle.last() == Some(&b'x');
    if capture {
        middle = &middle[..middle.len() - 1];
    }
    let mut from_file = None;
    let mut from_row = None;
    if let Some(&b) = middle.first() {
        if let Some(f) = file_index(b) {
            from_file = Some(f);
            middle = &middle[1..];
        }
    }
    if let Some(&b) = middle.first() {
        if let Some(r) = row_index(b) {
            from_row = Some(r);
            middle = &middle[1..];
        }
    }
    if !middle.is_empty() {
        return None;
    }
    Some(Token::PieceMove {
        piece_type,
        from_file,
        from_row,
        capture,
        to_file,
        to_row,
    })
}

impl Board {
    /// Applies one algebraic move token in place. Trailing check/mate and
    /// annotation marks are stripped first. The notation is trusted to
    /// describe an already-legal move; only syntax, piece geometry and
    /// occupancy are enforced. On error the board may be left partially
    /// updated; callers that need atomicity use [`Board::make_move_copy`].
    pub fn make_move(&mut self, token: &str) -> Result<(), MoveError> {
        let fail = |violation: MoveViolation| MoveError {
            token: token.to_string(),
            violation,
        };
        let parsed = parse_token(strip_annotations(token))
            .ok_or_else(|| fail(MoveViolation::UnrecognizedToken))?;

        let mut keep_en_passant = false;
        match parsed {
            Token::Castle(side) => self.castle(side).map_err(&fail)?,
            Token::PawnPush {
                file,
                row,
                promotion,
            } => {
                keep_en_passant = self.pawn_push(file, row, promotion).map_err(&fail)?;
            }
            Token::PawnCapture {
                from_file,
                to_file,
                row,
                promotion,
            } => self
                .pawn_capture(from_file, to_file, row, promotion)
                .map_err(&fail)?,
            Token::PieceMove {
                piece_type,
                from_file,
                from_row,
                capture,
                to_file,
                to_row,
            } => self
                .piece_move(piece_type, from_file, from_row, capture, to_file, to_row)
                .map_err(&fail)?,
        }

        if self.active_color == Color::Black {
            self.fullmove_number += 1;
        }
        self.active_color = self.active_color.opposite();
        if !keep_en_passant {
            self.en_passant_target = None;
        }
        Ok(())
    }

    /// Pure variant of [`Board::make_move`]: the receiver is left untouched
    /// and the advanced position is returned.
    pub fn make_move_copy(&self, token: &str) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.make_move(token)?;
        Ok(next)
    }

    fn castle(&mut self, side: CastleSide) -> Result<(), MoveViolation> {
        let color = self.active_color;
        let allowed = match (color, side) {
            (Color::White, CastleSide::Kingside) => self.castling_rights.white_kingside,
            (Color::White, CastleSide::Queenside) => self.castling_rights.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.castling_rights.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.castling_rights.black_queenside,
        };
        if !allowed {
            return Err(MoveViolation::CastlingForfeited);
        }

        let row = match color {
            Color::White => 7,
            Color::Black => 0,
        };
        let king = Some(Piece::new(PieceType::King, color));
        let rook = Some(Piece::new(PieceType::Rook, color));
        match side {
            CastleSide::Kingside => {
                if self.squares[row][4] != king
                    || self.squares[row][5].is_some()
                    || self.squares[row][6].is_some()
                    || self.squares[row][7] != rook
                {
                    return Err(MoveViolation::CastlingOutOfPlace);
                }
                self.squares[row][4] = None;
                self.squares[row][5] = rook;
                self.squares[row][6] = king;
                self.squares[row][7] = None;
            }
            CastleSide::Queenside => {
                if self.squares[row][4] != king
                    || self.squares[row][3].is_some()
                    || self.squares[row][2].is_some()
                    || self.squares[row][1].is_some()
                    || self.squares[row][0] != rook
                {
                    return Err(MoveViolation::CastlingOutOfPlace);
                }
                self.squares[row][0] = None;
                self.squares[row][2] = king;
                self.squares[row][3] = rook;
                self.squares[row][4] = None;
            }
        }
        self.clear_rights(color);
        self.halfmove_clock += 1;
        Ok(())
    }

    // Returns true when the push was a two-square advance, which sets the
    // en-passant target and is the only move that keeps it for a turn.
    fn pawn_push(
        &mut self,
        file: usize,
        row: usize,
        promotion: Option<PieceType>,
    ) -> Result<bool, MoveViolation> {
        let color = self.active_color;
        let pawn = Some(Piece::new(PieceType::Pawn, color));
        let (promo_row, two_square_row, skipped_row, home_row) = match color {
            Color::White => {
                if row >= 6 {
                    return Err(MoveViolation::PawnRankOutOfRange);
                }
                (0, 4, 5, 6)
            }
            Color::Black => {
                if row <= 1 {
                    return Err(MoveViolation::PawnRankOutOfRange);
                }
                (7, 3, 2, 1)
            }
        };
        if row == promo_row && promotion.is_none() {
            return Err(MoveViolation::MissingPromotion);
        }

        if row == two_square_row && self.squares[skipped_row][file].is_none() {
            if self.squares[home_row][file] != pawn || self.squares[row][file].is_some() {
                return Err(MoveViolation::PawnNotInPlace);
            }
            self.squares[home_row][file] = None;
            self.squares[row][file] = pawn;
            self.en_passant_target = Some(Position::from_row_col(skipped_row, file));
            self.halfmove_clock = 0;
            return Ok(true);
        }

        let src_row = match color {
            Color::White => row + 1,
            Color::Black => row - 1,
        };
        if self.squares[src_row][file] != pawn || self.squares[row][file].is_some() {
            return Err(MoveViolation::PawnNotInPlace);
        }
        self.squares[src_row][file] = None;
        self.squares[row][file] = Some(match (row == promo_row, promotion) {
            (true, Some(promo)) => Piece::new(promo, color),
            _ => Piece::new(PieceType::Pawn, color),
        });
        self.halfmove_clock = 0;
        Ok(false)
    }

    fn pawn_capture(
        &mut self,
        from_file: usize,
        to_file: usize,
        row: usize,
        promotion: Option<PieceType>,
    ) -> Result<(), MoveViolation> {
        if from_file.abs_diff(to_file) != 1 {
            return Err(MoveViolation::CaptureFileNotAdjacent);
        }
        let color = self.active_color;
        let pawn = Some(Piece::new(PieceType::Pawn, color));
        let (src_row, promo_row) = match color {
            Color::White => {
                if row >= 6 {
                    return Err(MoveViolation::PawnRankOutOfRange);
                }
                (row + 1, 0)
            }
            Color::Black => {
                if row <= 1 {
                    return Err(MoveViolation::PawnRankOutOfRange);
                }
                (row - 1, 7)
            }
        };
        if row == promo_row && promotion.is_none() {
            return Err(MoveViolation::MissingPromotion);
        }

        let target = Position::from_row_col(row, to_file);
        if self.en_passant_target == Some(target) {
            // The victim pawn sits beside the capturing pawn, on the
            // destination file.
            self.squares[src_row][from_file] = None;
            self.squares[src_row][to_file] = None;
        } else {
            let victim_ok = matches!(
                self.squares[row][to_file],
                Some(p) if p.color == color.opposite() && p.piece_type != PieceType::King
            );
            if self.squares[src_row][from_file] != pawn || !victim_ok {
                log::debug!("pawn capture mismatch:\n{}", self);
                return Err(MoveViolation::PawnCaptureMismatch);
            }
            self.squares[src_row][from_file] = None;
        }
        self.squares[row][to_file] = Some(match (row == promo_row, promotion) {
            (true, Some(promo)) => Piece::new(promo, color),
            _ => Piece::new(PieceType::Pawn, color),
        });
        self.halfmove_clock = 0;
        Ok(())
    }

    fn piece_move(
        &mut self,
        piece_type: PieceType,
        from_file: Option<usize>,
        from_row: Option<usize>,
        capture: bool,
        to_file: usize,
        to_row: usize,
    ) -> Result<(), MoveViolation> {
        let color = self.active_color;
        let (src_row, src_col) = self.find_source(piece_type, to_row, to_file, from_row, from_file)?;
        if capture && self.squares[to_row][to_file].is_none() {
            return Err(MoveViolation::CaptureSquareEmpty);
        }
        self.squares[src_row][src_col] = None;
        self.squares[to_row][to_file] = Some(Piece::new(piece_type, color));

        if capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if piece_type == PieceType::King {
            self.clear_rights(color);
        }
        if piece_type == PieceType::Rook {
            let home_row = match color {
                Color::White => 7,
                Color::Black => 0,
            };
            if src_row == home_row {
                match (color, src_col) {
                    (Color::White, 0) => self.castling_rights.white_queenside = false,
                    (Color::White, 7) => self.castling_rights.white_kingside = false,
                    (Color::Black, 0) => self.castling_rights.black_queenside = false,
                    (Color::Black, 7) => self.castling_rights.black_kingside = false,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn find_source(
        &self,
        piece_type: PieceType,
        to_row: usize,
        to_col: usize,
        from_row: Option<usize>,
        from_col: Option<usize>,
    ) -> Result<(usize, usize), MoveViolation> {
        let wanted = Some(Piece::new(piece_type, self.active_color));
        let mut found = None;
        for &(row_delta, col_delta) in offsets(piece_type) {
            let row = to_row as i8 + row_delta;
            let col = to_col as i8 + col_delta;
            if !(0..8).contains(&row) || !(0..8).contains(&col) {
                continue;
            }
            let (row, col) = (row as usize, col as usize);
            if from_row.map_or(false, |r| r != row) || from_col.map_or(false, |c| c != col) {
                continue;
            }
            if self.squares[row][col] != wanted
                || !self.path_is_clear(piece_type, row, col, to_row, to_col)
            {
                continue;
            }
            if found.is_some() {
                return Err(MoveViolation::AmbiguousSource(piece_type.letter()));
            }
            found = Some((row, col));
        }
        found.ok_or(MoveViolation::PieceNotFound(piece_type.letter()))
    }

    // Squares strictly between source and destination must be empty for
    // sliders; king and knight moves never pass through anything.
    fn path_is_clear(
        &self,
        piece_type: PieceType,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> bool {
        if matches!(piece_type, PieceType::King | PieceType::Knight) {
            return true;
        }
        let row_step = (to_row as i8 - from_row as i8).signum();
        let col_step = (to_col as i8 - from_col as i8).signum();
        let mut row = from_row as i8 + row_step;
        let mut col = from_col as i8 + col_step;
        while (row, col) != (to_row as i8, to_col as i8) {
            if self.squares[row as usize][col as usize].is_some() {
                return false;
            }
            row += row_step;
            col += col_step;
        }
        true
    }

    fn clear_rights(&mut self, color: Color) {
        match color {
            Color::White => {
                self.castling_rights.white_kingside = false;
                self.castling_rights.white_queenside = false;
            }
            Color::Black => {
                self.castling_rights.black_kingside = false;
                self.castling_rights.black_queenside = false;
            }
        }
    }
}
