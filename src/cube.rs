use std::fmt;

use crate::moves::{Face, Move};

/// Sticker colour. Each face's solved colour is given by [`Color::of_face`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Green,
        Color::Blue,
    ];

    pub const fn of_face(face: Face) -> Self {
        Color::ALL[face.index()]
    }

    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }
}

pub const STICKER_COUNT: usize = 54;

/// `perm[i]` is the position whose sticker ends up at position `i`.
type Permutation = [u8; STICKER_COUNT];

// Sticker `i` of face `f` lives at index `9 * f + i`, faces in `Face::ALL`
// order, stickers row-major. U is seen from above with its top row against B,
// D from below with its top row against F, and the four side faces from the
// outside with their top row against U.
//
// Each entry is the clockwise quarter turn of one face as five 4-cycles
// `[a, b, c, d]`: the sticker at `a` moves to `b`, `b` to `c`, `c` to `d` and
// `d` back to `a`. The first two cycles turn the face itself.
const QUARTER_CYCLES: [[[u8; 4]; 5]; 6] = [
    // U
    [
        [0, 2, 8, 6],
        [1, 5, 7, 3],
        [18, 45, 27, 36],
        [19, 46, 28, 37],
        [20, 47, 29, 38],
    ],
    // D
    [
        [9, 11, 17, 15],
        [10, 14, 16, 12],
        [24, 42, 33, 51],
        [25, 43, 34, 52],
        [26, 44, 35, 53],
    ],
    // L
    [
        [18, 20, 26, 24],
        [19, 23, 25, 21],
        [0, 36, 9, 53],
        [3, 39, 12, 50],
        [6, 42, 15, 47],
    ],
    // R
    [
        [27, 29, 35, 33],
        [28, 32, 34, 30],
        [2, 51, 11, 38],
        [5, 48, 14, 41],
        [8, 45, 17, 44],
    ],
    // F
    [
        [36, 38, 44, 42],
        [37, 41, 43, 39],
        [6, 27, 11, 26],
        [7, 30, 10, 23],
        [8, 33, 9, 20],
    ],
    // B
    [
        [45, 47, 53, 51],
        [46, 50, 52, 48],
        [0, 24, 17, 29],
        [1, 21, 16, 32],
        [2, 18, 15, 35],
    ],
];

/// One permutation per move, indexed by [`Move::index`].
static MOVE_TABLE: [Permutation; 18] = build_move_table();

const fn identity() -> Permutation {
    let mut perm = [0; STICKER_COUNT];
    let mut i = 0;
    while i < STICKER_COUNT {
        perm[i] = i as u8;
        i += 1;
    }
    perm
}

const fn quarter_turn(face: usize) -> Permutation {
    let mut perm = identity();
    let mut c = 0;
    while c < 5 {
        let cycle = QUARTER_CYCLES[face][c];
        let mut k = 0;
        while k < 4 {
            perm[cycle[(k + 1) % 4] as usize] = cycle[k];
            k += 1;
        }
        c += 1;
    }
    perm
}

/// Permutation for doing `first` and then `then`.
const fn compose(first: &Permutation, then: &Permutation) -> Permutation {
    let mut perm = [0; STICKER_COUNT];
    let mut i = 0;
    while i < STICKER_COUNT {
        perm[i] = first[then[i] as usize];
        i += 1;
    }
    perm
}

const fn build_move_table() -> [Permutation; 18] {
    let mut table = [[0; STICKER_COUNT]; 18];
    let mut face = 0;
    while face < 6 {
        let quarter = quarter_turn(face);
        let half = compose(&quarter, &quarter);
        let three_quarters = compose(&half, &quarter);
        // Same order as `Turn::ALL`.
        table[face * 3] = quarter;
        table[face * 3 + 1] = three_quarters;
        table[face * 3 + 2] = half;
        face += 1;
    }
    table
}

/// Full sticker configuration of a 3x3x3 cube.
///
/// A `Cube` is a plain value: every method that applies moves either returns
/// a new cube or mutates through `&mut self`, so two cubes never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    stickers: [Color; STICKER_COUNT],
}

impl Cube {
    /// Returns a solved cube.
    pub fn new() -> Self {
        let mut stickers = [Color::White; STICKER_COUNT];
        for face in Face::ALL {
            for sticker in &mut stickers[face.index() * 9..face.index() * 9 + 9] {
                *sticker = Color::of_face(face);
            }
        }
        Self { stickers }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn twist(&mut self, mv: Move) {
        let old = self.stickers;
        for (dst, &src) in MOVE_TABLE[mv.index()].iter().enumerate() {
            self.stickers[dst] = old[src as usize];
        }
    }

    pub fn apply_move(&self, mv: Move) -> Self {
        let mut next = *self;
        next.twist(mv);
        next
    }

    /// Returns the cube after each move of `moves` in order.
    pub fn apply_sequence(&self, moves: &[Move]) -> Self {
        let next = moves.iter().fold(*self, |cube, &mv| cube.apply_move(mv));
        debug_assert!(next.has_valid_sticker_counts());
        next
    }

    /// Whether every face shows a single colour, with no colour on two faces.
    pub fn is_solved(&self) -> bool {
        let mut seen = [false; 6];
        for face in Face::ALL {
            let stickers = self.face(face);
            let color = stickers[0];
            if stickers.iter().any(|&c| c != color) || seen[color as usize] {
                return false;
            }
            seen[color as usize] = true;
        }
        true
    }

    pub fn sticker(&self, face: Face, index: usize) -> Color {
        self.stickers[face.index() * 9 + index]
    }

    /// The nine stickers of `face`, row-major.
    pub fn face(&self, face: Face) -> [Color; 9] {
        let mut out = [Color::White; 9];
        out.copy_from_slice(&self.stickers[face.index() * 9..face.index() * 9 + 9]);
        out
    }

    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for &color in &self.stickers {
            counts[color as usize] += 1;
        }
        counts
    }

    pub fn has_valid_sticker_counts(&self) -> bool {
        self.color_counts() == [9; 6]
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, face: Face, row: usize) -> fmt::Result {
        let [a, b, c] = [0, 1, 2].map(|col| self.sticker(face, row * 3 + col).letter());
        write!(f, "{a} {b} {c}")
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

/// Unfolded net: U on top, then L F R B, then D.
impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            write!(f, "      ")?;
            self.write_row(f, Face::U, row)?;
            writeln!(f)?;
        }
        for row in 0..3 {
            for (i, face) in [Face::L, Face::F, Face::R, Face::B].into_iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                self.write_row(f, face, row)?;
            }
            writeln!(f)?;
        }
        for row in 0..3 {
            write!(f, "      ")?;
            self.write_row(f, Face::D, row)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
