use crate::moves::{Move, MoveSequence};

/// Undo/redo record of the moves applied to a live cube.
///
/// The history only tracks moves; the caller applies whatever move
/// [`undo`](Self::undo) or [`redo`](Self::redo) hands back.
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    done: Vec<Move>,
    undone: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly applied move. Anything that could be redone is
    /// dropped.
    pub fn record(&mut self, mv: Move) {
        self.done.push(mv);
        self.undone.clear();
    }

    pub fn record_all(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.record(mv);
        }
    }

    /// Pops the last move and returns its inverse, which the caller should
    /// apply.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.done.pop()?;
        self.undone.push(mv);
        Some(mv.inverse())
    }

    /// Returns the most recently undone move, which the caller should apply
    /// again.
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.undone.pop()?;
        self.done.push(mv);
        Some(mv)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }

    pub fn applied(&self) -> MoveSequence {
        self.done.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cube::Cube;
    use crate::moves::parse_sequence;

    #[test]
    fn undo_then_redo_round_trip() {
        let moves = parse_sequence("R U' F2").unwrap();
        let mut cube = Cube::new();
        let mut history = MoveHistory::new();
        for &mv in moves.iter() {
            cube.twist(mv);
            history.record(mv);
        }
        let scrambled = cube;

        while let Some(mv) = history.undo() {
            cube.twist(mv);
        }
        assert!(cube.is_solved());
        assert!(!history.can_undo());

        while let Some(mv) = history.redo() {
            cube.twist(mv);
        }
        assert_eq!(cube, scrambled);
        assert_eq!(history.applied(), moves);
    }

    #[test]
    fn undo_returns_inverse() {
        let mut history = MoveHistory::new();
        history.record(Move::parse("R").unwrap());
        assert_eq!(history.undo(), Some(Move::parse("R'").unwrap()));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(Move::parse("R").unwrap()));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn new_move_clears_redo() {
        let mut history = MoveHistory::new();
        history.record_all(&parse_sequence("R U").unwrap());
        history.undo();
        assert!(history.can_redo());
        history.record(Move::parse("F").unwrap());
        assert!(!history.can_redo());
        assert_eq!(history.applied(), parse_sequence("R F").unwrap());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut history = MoveHistory::new();
        history.record_all(&parse_sequence("R U").unwrap());
        history.undo();
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
