//! Iterative-deepening depth-first search for short solutions.
//!
//! Each depth layer is searched completely before the next one starts, so the
//! first solution found is a shortest one. Moves are tried in [`Move::ALL`]
//! order, which makes the returned solution deterministic for a given cube
//! and depth limit.
//!
//! The search is plain synchronous computation. Callers that want it off
//! their own thread run it on a worker and use a [`CancelToken`] to stop it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cube::Cube;
use crate::moves::{Move, MoveSequence};

pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Cooperative cancellation flag shared between a search and whoever started
/// it. The search checks it at every node.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress report for one fully explored depth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub depth: usize,
    /// Nodes visited in this layer.
    pub layer_nodes: u64,
    /// Nodes visited in this layer and every layer before it.
    pub total_nodes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A shortest solution within the depth limit. Empty if the cube was
    /// already solved.
    Found(MoveSequence),
    /// Every sequence up to `max_depth` moves was tried.
    NotFound { max_depth: usize },
    /// The cancel token was raised before the search finished.
    Cancelled,
}

/// Where a [`SearchSession`] is in its lifecycle.
///
/// `Searching` only holds while [`SearchSession::run`] is executing, so callers
/// never read it through [`SearchSession::phase`]; the layer being searched is
/// visible in the `trace` log, and each finished layer through
/// [`SearchStats::depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching { depth: usize },
    Found,
    NotFound,
    Cancelled,
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchPhase::Found | SearchPhase::NotFound | SearchPhase::Cancelled
        )
    }
}

/// A single search from one starting cube.
///
/// A session runs at most once; running a finished session again returns the
/// outcome it already reached.
#[derive(Debug, Clone)]
pub struct SearchSession {
    initial: Cube,
    max_depth: usize,
    phase: SearchPhase,
    outcome: Option<SearchOutcome>,
    total_nodes: u64,
}

impl SearchSession {
    pub fn new(initial: Cube, max_depth: usize) -> Self {
        Self {
            initial,
            max_depth,
            phase: SearchPhase::Idle,
            outcome: None,
            total_nodes: 0,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn total_nodes(&self) -> u64 {
        self.total_nodes
    }

    /// Runs the search to completion, cancellation, or exhaustion of
    /// `max_depth`.
    ///
    /// `on_progress` is called after each depth layer that is exhausted without
    /// a solution, except the last one (that case is reported as
    /// [`SearchOutcome::NotFound`]). It runs on the calling thread.
    pub fn run(
        &mut self,
        mut on_progress: impl FnMut(&SearchStats),
        cancel: &CancelToken,
    ) -> SearchOutcome {
        if let Some(outcome) = &self.outcome {
            log::warn!("search session already finished in phase {:?}", self.phase);
            return outcome.clone();
        }

        if self.initial.is_solved() {
            return self.finish(SearchOutcome::Found(MoveSequence::new()));
        }

        let started = Instant::now();
        let initial = self.initial;
        for depth in 1..=self.max_depth {
            self.set_phase(SearchPhase::Searching { depth });

            let mut dfs = DepthFirst::new(initial, cancel);
            let step = dfs.search(&initial, depth, None);
            self.total_nodes += dfs.nodes;

            match step {
                Step::Solved => return self.finish(SearchOutcome::Found(dfs.path)),
                Step::Cancelled => return self.finish(SearchOutcome::Cancelled),
                Step::Exhausted => {
                    let stats = SearchStats {
                        depth,
                        layer_nodes: dfs.nodes,
                        total_nodes: self.total_nodes,
                        elapsed: started.elapsed(),
                    };
                    log::debug!(
                        "depth {depth} exhausted: {} nodes ({} total) in {:?}",
                        stats.layer_nodes,
                        stats.total_nodes,
                        stats.elapsed,
                    );
                    if depth < self.max_depth {
                        on_progress(&stats);
                    }
                }
            }
        }

        self.finish(SearchOutcome::NotFound {
            max_depth: self.max_depth,
        })
    }

    fn set_phase(&mut self, phase: SearchPhase) {
        log::trace!("search phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn finish(&mut self, outcome: SearchOutcome) -> SearchOutcome {
        self.set_phase(match &outcome {
            SearchOutcome::Found(_) => SearchPhase::Found,
            SearchOutcome::NotFound { .. } => SearchPhase::NotFound,
            SearchOutcome::Cancelled => SearchPhase::Cancelled,
        });
        match &outcome {
            SearchOutcome::Found(moves) => {
                log::debug!("found {} move solution: {moves}", moves.len());
            }
            SearchOutcome::NotFound { max_depth } => {
                log::debug!("no solution within {max_depth} moves");
            }
            SearchOutcome::Cancelled => log::debug!("search cancelled"),
        }
        self.outcome = Some(outcome.clone());
        outcome
    }
}

/// Runs a fresh search session from `initial`.
pub fn start_search(
    initial: &Cube,
    max_depth: usize,
    on_progress: impl FnMut(&SearchStats),
    cancel: &CancelToken,
) -> SearchOutcome {
    SearchSession::new(*initial, max_depth).run(on_progress, cancel)
}

/// Searches without progress reports or cancellation.
pub fn solve(initial: &Cube, max_depth: usize) -> SearchOutcome {
    start_search(initial, max_depth, |_| (), &CancelToken::new())
}

/// Whether `mv` may be skipped right after `last`.
///
/// Two turns of the same face collapse into at most one. Turns of opposite
/// faces commute, so only the order with the earlier face first is explored.
fn is_redundant(last: Move, mv: Move) -> bool {
    mv.is_same_face(last) || (mv.face == last.face.opposite() && mv.face < last.face)
}

enum Step {
    Solved,
    Exhausted,
    Cancelled,
}

/// Depth-limited search state for one layer.
struct DepthFirst<'a> {
    cancel: &'a CancelToken,
    path: MoveSequence,
    /// Cubes along the current branch, starting cube included.
    branch: Vec<Cube>,
    nodes: u64,
}

impl<'a> DepthFirst<'a> {
    fn new(start: Cube, cancel: &'a CancelToken) -> Self {
        Self {
            cancel,
            path: MoveSequence::new(),
            branch: vec![start],
            nodes: 0,
        }
    }

    /// On `Step::Solved`, `self.path` holds the solution.
    fn search(&mut self, cube: &Cube, remaining: usize, last_move: Option<Move>) -> Step {
        self.nodes += 1;
        if self.cancel.is_cancelled() {
            return Step::Cancelled;
        }
        if remaining == 0 {
            return if cube.is_solved() {
                Step::Solved
            } else {
                Step::Exhausted
            };
        }

        for mv in Move::ALL {
            if let Some(last) = last_move {
                if is_redundant(last, mv) {
                    continue;
                }
            }

            let next = cube.apply_move(mv);
            // A branch that comes back to one of its own states can't be the
            // first shortest solution.
            if self.branch.contains(&next) {
                continue;
            }

            self.path.push(mv);
            self.branch.push(next);
            match self.search(&next, remaining - 1, Some(mv)) {
                Step::Exhausted => {}
                step => return step,
            }
            self.branch.pop();
            self.path.pop();
        }

        Step::Exhausted
    }
}
