use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use eyre::{eyre, Result};
use rubik_sim::{start_search, CancelToken, Cube, SearchOutcome, SearchStats};

use crate::tui::CancelKeys;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raises the token when dropped, so the worker stops on every way out of
/// [`run_search`].
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

enum WorkerEvent {
    Progress(SearchStats),
    Done(SearchOutcome),
}

/// Runs a search for `cube` on a worker thread, printing progress as depth
/// layers finish. Esc or Ctrl-C cancels it.
pub fn run_search(cube: Cube, max_depth: usize) -> Result<SearchOutcome> {
    let cancel = CancelToken::new();
    let (tx, rx) = mpsc::channel();

    let worker = thread::spawn({
        let cancel = cancel.clone();
        move || {
            let outcome = start_search(
                &cube,
                max_depth,
                |stats| {
                    // The driver may already be gone; nothing to report to then.
                    let _ = tx.send(WorkerEvent::Progress(*stats));
                },
                &cancel,
            );
            let _ = tx.send(WorkerEvent::Done(outcome));
        }
    });

    let _stop_worker = CancelOnDrop(cancel.clone());

    let keys = CancelKeys::watch();
    keys.println(&format!("searching up to {max_depth} moves..."))?;
    if keys.is_watching() {
        keys.println("press Esc to cancel")?;
    }

    let outcome = loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(WorkerEvent::Progress(stats)) => keys.println(&format!(
                "  depth {}: no solution ({} nodes, {} total, {:.2?})",
                stats.depth, stats.layer_nodes, stats.total_nodes, stats.elapsed,
            ))?,
            Ok(WorkerEvent::Done(outcome)) => break outcome,
            Err(RecvTimeoutError::Timeout) => {
                if keys.cancel_requested()? && !cancel.is_cancelled() {
                    log::info!("cancelling search");
                    cancel.cancel();
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(eyre!("search worker stopped without a result"));
            }
        }
    };
    drop(keys);

    worker
        .join()
        .map_err(|_| eyre!("search worker panicked"))?;
    Ok(outcome)
}

/// One-line description of a search outcome.
pub fn describe(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Found(moves) if moves.is_empty() => "already solved".to_string(),
        SearchOutcome::Found(moves) => format!("solution ({} moves): {moves}", moves.len()),
        SearchOutcome::NotFound { max_depth } => {
            format!("no solution within {max_depth} moves")
        }
        SearchOutcome::Cancelled => "search cancelled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rubik_sim::parse_sequence;

    use super::*;

    #[test]
    fn dropping_guard_cancels() {
        let cancel = CancelToken::new();
        let guard = CancelOnDrop(cancel.clone());
        assert!(!cancel.is_cancelled());
        drop(guard);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn early_return_stops_the_worker() {
        fn bail_out(cancel: &CancelToken) -> Result<()> {
            let _stop_worker = CancelOnDrop(cancel.clone());
            Err(eyre!("terminal went away"))
        }

        let cancel = CancelToken::new();
        let cube = Cube::new().apply_sequence(&parse_sequence("R U F L D B R2 U' F2 L'").unwrap());
        let worker = thread::spawn({
            let cancel = cancel.clone();
            move || start_search(&cube, 20, |_| (), &cancel)
        });
        assert!(bail_out(&cancel).is_err());
        assert_eq!(worker.join().unwrap(), SearchOutcome::Cancelled);
    }

    #[test]
    fn describes_outcomes() {
        let moves = parse_sequence("R U'").unwrap();
        assert_eq!(
            describe(&SearchOutcome::Found(moves)),
            "solution (2 moves): R U'"
        );
        assert_eq!(
            describe(&SearchOutcome::Found(Default::default())),
            "already solved"
        );
        assert_eq!(
            describe(&SearchOutcome::NotFound { max_depth: 4 }),
            "no solution within 4 moves"
        );
        assert_eq!(describe(&SearchOutcome::Cancelled), "search cancelled");
    }
}
