use serde::{Deserialize, Serialize};

use crate::piece::Color;

/// File the king starts on and castles from.
pub const KING_HOME_COLUMN: u8 = 5;

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column step of the king toward this side's rook.
    pub fn direction(&self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    pub fn rook_home_column(&self) -> u8 {
        match self {
            CastleSide::Kingside => 8,
            CastleSide::Queenside => 1,
        }
    }

    /// The side whose rook starts on `column`, if any.
    pub fn from_rook_column(column: u8) -> Option<CastleSide> {
        match column {
            8 => Some(CastleSide::Kingside),
            1 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// The four castling flags. They only ever go from `true` to `false`.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::initial()
    }
}

impl CastlingRights {
    pub fn initial() -> Self {
        CastlingRights { white_kingside: true, white_queenside: true, black_kingside: true, black_queenside: true }
    }

    pub fn none() -> Self {
        CastlingRights { white_kingside: false, white_queenside: false, black_kingside: false, black_queenside: false }
    }

    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    /// Rights as they stand with some flags already spent.
    pub fn without(mut self, color: Color, side: CastleSide) -> Self {
        self.revoke(color, side);
        self
    }

    pub(crate) fn revoke(&mut self, color: Color, side: CastleSide) {
        let flag = match (color, side) {
            (Color::White, CastleSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastleSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastleSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastleSide::Queenside) => &mut self.black_queenside,
        };
        *flag = false;
    }

    pub(crate) fn king_moved(&mut self, color: Color) {
        for side in CastleSide::BOTH {
            self.revoke(color, side);
        }
    }
}
