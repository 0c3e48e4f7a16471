//! Move algebra: faces, turns, moves and move sequences.
//!
//! Moves are parsed once from text into typed values; nothing past this module
//! looks at move strings.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::{Error, TokenError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// How far a face is turned. A half turn has no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];

    /// Number of clockwise quarter turns this turn is equivalent to.
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::CounterClockwise => 3,
        }
    }

    /// Returns `None` for a multiple of four quarter turns (the identity).
    pub fn from_quarter_turns(quarter_turns: u8) -> Option<Self> {
        match quarter_turns % 4 {
            1 => Some(Turn::Clockwise),
            2 => Some(Turn::Half),
            3 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    /// Composes two turns of the same face: `R` then `R` is `R2`, `R` then
    /// `R'` is nothing.
    pub fn compose(self, other: Turn) -> Option<Self> {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Turn::Clockwise),
            "'" => Some(Turn::CounterClockwise),
            // A half turn marked counter-clockwise is still just a half turn.
            "2" | "2'" => Some(Turn::Half),
            _ => None,
        }
    }
}

/// Values with a group inverse.
pub trait Invert {
    fn inverse(&self) -> Self;
}

/// Returns the inverse of a move or a move sequence.
pub fn inverse<T: Invert>(value: &T) -> T {
    value.inverse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// The 18 face turns in canonical order: by face, then clockwise,
    /// counter-clockwise, half.
    pub const ALL: [Move; 18] = all_moves();

    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    pub const fn index(self) -> usize {
        self.face.index() * 3 + self.turn as usize
    }

    pub fn inverse(self) -> Self {
        Self::new(self.face, self.turn.inverse())
    }

    pub fn is_same_face(self, other: Move) -> bool {
        self.face == other.face
    }

    /// Parses a single move token such as `R`, `U'`, `F2` or `D2'`.
    pub fn parse(token: &str) -> Result<Self, Error> {
        Self::parse_at(token, 0)
    }

    fn parse_at(token: &str, position: usize) -> Result<Self, Error> {
        let normalized = token.trim().replace('’', "'");
        let mut chars = normalized.chars();
        let Some(letter) = chars.next() else {
            return Err(Error::token(token, position, TokenError::Empty));
        };
        let face = Face::from_letter(letter)
            .ok_or_else(|| Error::token(token, position, TokenError::UnknownFace(letter)))?;
        let suffix = chars.as_str();
        let turn = Turn::from_suffix(suffix).ok_or_else(|| {
            Error::token(
                token,
                position,
                TokenError::UnknownSuffix(suffix.to_string()),
            )
        })?;
        Ok(Self::new(face, turn))
    }
}

const fn all_moves() -> [Move; 18] {
    let mut moves = [Move::new(Face::U, Turn::Clockwise); 18];
    let mut i = 0;
    while i < 18 {
        moves[i] = Move::new(Face::ALL[i / 3], Turn::ALL[i % 3]);
        i += 1;
    }
    moves
}

impl Invert for Move {
    fn inverse(&self) -> Self {
        Move::inverse(*self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence(Vec<Move>);

impl MoveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.0.pop()
    }

    /// Returns `self` followed by `other`.
    pub fn concat(&self, other: &MoveSequence) -> Self {
        self.iter().chain(other.iter()).copied().collect()
    }

    /// The moves in reverse order, each inverted.
    pub fn inverse(&self) -> Self {
        self.iter().rev().map(|mv| mv.inverse()).collect()
    }

    /// Merges adjacent turns of the same face until none are left, dropping
    /// turns that cancel out. The resulting cube state is unchanged.
    pub fn simplified(&self) -> Self {
        let mut out: Vec<Move> = Vec::with_capacity(self.len());
        for &mv in self.iter() {
            match out.last().copied() {
                Some(last) if last.is_same_face(mv) => {
                    out.pop();
                    if let Some(turn) = last.turn.compose(mv.turn) {
                        out.push(Move::new(mv.face, turn));
                    }
                }
                _ => out.push(mv),
            }
        }
        Self(out)
    }
}

impl Invert for MoveSequence {
    fn inverse(&self) -> Self {
        MoveSequence::inverse(self)
    }
}

impl Deref for MoveSequence {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

impl FromStr for MoveSequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sequence(s)
    }
}

/// Parses whitespace-separated move tokens.
///
/// Fails on the first bad token; nothing is returned for the tokens before it.
pub fn parse_sequence(text: &str) -> Result<MoveSequence, Error> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| Move::parse_at(token, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn seq(text: &str) -> MoveSequence {
        parse_sequence(text).unwrap()
    }

    #[test]
    fn parses_each_suffix() {
        assert_eq!(Move::parse("R").unwrap(), Move::new(Face::R, Turn::Clockwise));
        assert_eq!(
            Move::parse("U'").unwrap(),
            Move::new(Face::U, Turn::CounterClockwise)
        );
        assert_eq!(Move::parse("F2").unwrap(), Move::new(Face::F, Turn::Half));
    }

    #[test]
    fn half_turn_direction_is_dropped() {
        assert_eq!(Move::parse("D2'").unwrap(), Move::parse("D2").unwrap());
        assert_eq!(Move::parse("D2'").unwrap().to_string(), "D2");
    }

    #[test]
    fn typographic_apostrophe_is_accepted() {
        assert_eq!(Move::parse("R’").unwrap(), Move::parse("R'").unwrap());
    }

    #[test]
    fn rejects_bad_tokens() {
        assert_eq!(
            Move::parse("X"),
            Err(Error::InvalidMoveToken {
                token: "X".to_string(),
                position: 0,
                reason: TokenError::UnknownFace('X'),
            })
        );
        assert_eq!(
            Move::parse("r").unwrap_err(),
            Error::token("r", 0, TokenError::UnknownFace('r'))
        );
        assert_eq!(
            Move::parse("R3").unwrap_err(),
            Error::token("R3", 0, TokenError::UnknownSuffix("3".to_string()))
        );
        assert_eq!(
            Move::parse("R''").unwrap_err(),
            Error::token("R''", 0, TokenError::UnknownSuffix("''".to_string()))
        );
        assert_eq!(
            Move::parse("").unwrap_err(),
            Error::token("", 0, TokenError::Empty)
        );
    }

    #[test]
    fn sequence_error_reports_position() {
        assert_eq!(
            parse_sequence("R U Q2 F").unwrap_err(),
            Error::token("Q2", 2, TokenError::UnknownFace('Q'))
        );
    }

    #[test]
    fn sequence_ignores_extra_whitespace() {
        assert_eq!(seq("  R\tU'\n F2 "), seq("R U' F2"));
        assert!(seq("   ").is_empty());
    }

    #[test]
    fn move_inverses() {
        for mv in Move::ALL {
            assert_eq!(mv.inverse().inverse(), mv);
            assert!(mv.inverse().is_same_face(mv));
        }
        assert_eq!(Move::parse("R").unwrap().inverse().to_string(), "R'");
        assert_eq!(Move::parse("R'").unwrap().inverse().to_string(), "R");
        assert_eq!(Move::parse("R2").unwrap().inverse().to_string(), "R2");
    }

    #[test]
    fn sequence_inverse_reverses_and_inverts() {
        assert_eq!(inverse(&seq("R U R' U'")), seq("U R U' R'"));
        assert_eq!(inverse(&MoveSequence::new()), MoveSequence::new());
    }

    #[test]
    fn canonical_order() {
        let text = Move::ALL
            .iter()
            .map(Move::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(
            text,
            "U U' U2 D D' D2 L L' L2 R R' R2 F F' F2 B B' B2"
        );
        for (i, mv) in Move::ALL.into_iter().enumerate() {
            assert_eq!(mv.index(), i);
        }
    }

    #[test]
    fn turn_composition() {
        use Turn::*;
        assert_eq!(Clockwise.compose(Clockwise), Some(Half));
        assert_eq!(Clockwise.compose(CounterClockwise), None);
        assert_eq!(Half.compose(Half), None);
        assert_eq!(Half.compose(Clockwise), Some(CounterClockwise));
        assert_eq!(CounterClockwise.compose(CounterClockwise), Some(Half));
    }

    #[test]
    fn simplify_merges_same_face_runs() {
        assert_eq!(seq("R R").simplified(), seq("R2"));
        assert_eq!(seq("R U U' R'").simplified(), MoveSequence::new());
        assert_eq!(seq("F R2 R L").simplified(), seq("F R' L"));
        assert_eq!(seq("R L R").simplified(), seq("R L R"));
    }

    #[test]
    fn display_round_trips() {
        let moves = seq("U D' L2 R F' B2");
        assert_eq!(moves.to_string(), "U D' L2 R F' B2");
        assert_eq!(moves.to_string().parse::<MoveSequence>().unwrap(), moves);
    }

    #[test]
    fn opposite_faces() {
        for face in Face::ALL {
            assert_ne!(face.opposite(), face);
            assert_eq!(face.opposite().opposite(), face);
        }
    }
}
