use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Error;
use crate::moves::{Face, Move, MoveSequence, Turn};

/// Random move sequence source.
///
/// Seeded scramblers use ChaCha, so a given seed produces the same scramble on
/// every platform.
pub struct Scrambler {
    rng: ChaCha8Rng,
}

impl Scrambler {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generates `length` moves, none on the same face as the move before it.
    pub fn generate(&mut self, length: usize) -> MoveSequence {
        let mut last_face: Option<Face> = None;
        let moves: MoveSequence = (0..length)
            .map(|_| {
                let candidates: Vec<Face> = Face::ALL
                    .into_iter()
                    .filter(|&face| Some(face) != last_face)
                    .collect();
                let face = candidates[self.rng.gen_range(0..candidates.len())];
                let turn = Turn::ALL[self.rng.gen_range(0..Turn::ALL.len())];
                last_face = Some(face);
                Move::new(face, turn)
            })
            .collect();
        log::trace!("generated scramble: {moves}");
        moves
    }
}

/// Generates a scramble of `length` moves.
///
/// A negative `length` is rejected before any randomness is drawn.
pub fn generate_scramble(length: i64, seed: Option<u64>) -> Result<MoveSequence, Error> {
    let length = usize::try_from(length).map_err(|_| Error::InvalidSequenceLength(length))?;
    Ok(Scrambler::new(seed).generate(length))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_length_is_empty() {
        assert!(generate_scramble(0, Some(1)).unwrap().is_empty());
        assert!(generate_scramble(0, None).unwrap().is_empty());
    }

    #[test]
    fn negative_length_is_rejected() {
        assert_eq!(
            generate_scramble(-3, Some(1)),
            Err(Error::InvalidSequenceLength(-3))
        );
    }

    #[test]
    fn requested_length_is_produced() {
        for length in [1, 2, 7, 25] {
            assert_eq!(generate_scramble(length, None).unwrap().len(), length as usize);
        }
    }

    #[test]
    fn same_seed_same_scramble() {
        let a = generate_scramble(20, Some(42)).unwrap();
        let b = generate_scramble(20, Some(42)).unwrap();
        assert_eq!(a, b);
        let c = generate_scramble(20, Some(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn consecutive_moves_never_share_a_face() {
        let mut scrambler = Scrambler::new(Some(7));
        for _ in 0..200 {
            let moves = scrambler.generate(30);
            for pair in moves.windows(2) {
                assert!(!pair[0].is_same_face(pair[1]), "{moves}");
            }
        }
    }

    #[test]
    fn every_face_and_turn_shows_up() {
        let moves = Scrambler::new(Some(3)).generate(500);
        for mv in Move::ALL {
            assert!(moves.contains(&mv), "{mv} missing");
        }
    }
}
