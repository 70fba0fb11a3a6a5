//! Integer identity for shapes
//!
//! Every shape carries an `i64` id. Callers may supply one explicitly, in which
//! case it is used verbatim (duplicates are the caller's business). Otherwise the
//! id is drawn from an [`IdGenerator`] owned by the caller.

use std::sync::atomic::{AtomicI64, Ordering};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("No ids left: the counter has reached {}", i64::MAX)]
    Exhausted,
}

/// Monotonic id counter
///
/// The first id handed out is `1`. Ids are never reissued by the same generator;
/// once `i64::MAX` has been handed out every further draw fails.
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Creates a generator whose first id is `1`
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Creates a generator whose first id is `last + 1`
    ///
    /// Used when shapes were restored from disk and new ones must not collide
    /// with the ids already in use.
    pub fn starting_after(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    /// Returns the next id and advances the counter
    pub fn next_id(&self) -> Result<i64, IdError> {
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|previous| previous + 1)
            .map_err(|_| IdError::Exhausted)
    }

    /// Returns the last id handed out (0 if none yet)
    pub fn last(&self) -> i64 {
        self.last.load(Ordering::SeqCst)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_is_one() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_id(), Ok(1));
        assert_eq!(ids.next_id(), Ok(2));
        assert_eq!(ids.next_id(), Ok(3));
    }

    #[test]
    fn generators_are_independent() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();

        a.next_id().unwrap();
        a.next_id().unwrap();

        assert_eq!(b.next_id(), Ok(1));
        assert_eq!(a.last(), 2);
    }

    #[test]
    fn starting_after_continues_numbering() {
        let ids = IdGenerator::starting_after(41);
        assert_eq!(ids.last(), 41);
        assert_eq!(ids.next_id(), Ok(42));
    }

    #[test]
    fn exhausted_counter_does_not_wrap() {
        let ids = IdGenerator::starting_after(i64::MAX - 1);
        assert_eq!(ids.next_id(), Ok(i64::MAX));

        assert_eq!(ids.next_id(), Err(IdError::Exhausted));
        assert_eq!(ids.next_id(), Err(IdError::Exhausted));
        assert_eq!(ids.last(), i64::MAX);
    }

    #[test]
    fn shared_across_threads() {
        let ids = std::sync::Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..100).map(|_| ids.next_id().unwrap()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();

        assert_eq!(all.len(), 400);
        assert_eq!(all.first(), Some(&1));
        assert_eq!(all.last(), Some(&400));
    }
}
