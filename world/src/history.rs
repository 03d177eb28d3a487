//! Undo stack of executed moves.

use std::sync::{Mutex, MutexGuard, PoisonError};

use boulder_push_core::{BoulderId, CellCoord};

/// Snapshot sufficient to reverse one executed move.
///
/// Positions are recorded as they were before the move, so restoring an
/// entry puts every named entity back where it stood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Cell the player occupied before the move.
    pub player_before: CellCoord,
    /// Boulder pushed by the move, if any.
    pub boulder: Option<BoulderMove>,
}

/// Boulder displacement captured by a push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoulderMove {
    /// Identifier of the pushed boulder.
    pub boulder: BoulderId,
    /// Cell the boulder occupied before the push.
    pub from: CellCoord,
}

/// Last-in-first-out record of executed moves.
///
/// Push and pop are serialised by an internal lock so the type can be shared
/// between threads. The stack grows without bound.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an executed move on top of the stack.
    pub fn push(&self, entry: HistoryEntry) {
        self.lock().push(entry);
    }

    /// Removes and returns the most recent entry, `None` when empty.
    pub fn pop(&self) -> Option<HistoryEntry> {
        self.lock().pop()
    }

    /// Reports whether no move is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of recorded moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Discards every recorded move.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    fn entry(row: u32) -> HistoryEntry {
        HistoryEntry {
            player_before: CellCoord::new(row, 1),
            boulder: None,
        }
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let history = History::new();
        history.push(entry(1));
        history.push(entry(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(entry(2)));
        assert_eq!(history.pop(), Some(entry(1)));
        assert!(history.is_empty());
    }

    #[test]
    fn pop_on_empty_history_returns_none() {
        let history = History::new();
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn clear_discards_everything() {
        let history = History::new();
        history.push(entry(1));
        history.push(entry(2));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn concurrent_pushes_are_all_recorded() {
        let history = Arc::new(History::new());
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let history = Arc::clone(&history);
                thread::spawn(move || {
                    for row in 0..50 {
                        history.push(entry(worker * 100 + row));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert_eq!(history.len(), 200);
    }
}
