//! Selection cursor: one pass over one pool under one control.
//!
//! The cursor owns iteration and the at-most-once bookkeeping; the section
//! driver owns rendering and quota through an [`Acceptor`]. An entry is marked
//! used only when the acceptor takes it, so entries skipped by the tag filter
//! or rejected by the acceptor stay available to later passes.

use crate::selection::tags::Tagged;

/// Which entries of one pool have been emitted, keyed by stable index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedSet {
    used: Vec<bool>,
}

impl UsedSet {
    pub fn new(len: usize) -> Self {
        UsedSet {
            used: vec![false; len],
        }
    }

    pub fn is_used(&self, index: usize) -> bool {
        self.used.get(index).copied().unwrap_or(false)
    }

    pub fn mark(&mut self, index: usize) {
        if index >= self.used.len() {
            self.used.resize(index + 1, false);
        }
        self.used[index] = true;
    }

    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|u| **u).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Taken; keep going.
    Accepted,
    /// Declined; the entry stays unused.
    Rejected,
    /// Taken, and the pass is now full.
    QuotaReached,
}

/// Per-kind "render and decide" strategy.
pub trait Acceptor<T> {
    fn try_accept(&mut self, index: usize, entry: &T) -> Acceptance;
}

impl<T, F> Acceptor<T> for F
where
    F: FnMut(usize, &T) -> Acceptance,
{
    fn try_accept(&mut self, index: usize, entry: &T) -> Acceptance {
        self(index, entry)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// Pool indices taken by this pass, in order.
    pub accepted: Vec<usize>,
    pub quota_reached: bool,
}

/// Walks `pool` in order, offering every unused entry matching `target` to
/// `acceptor` until it reports the quota reached or the pool runs out.
pub fn run_pass<T, A>(pool: &[T], used: &mut UsedSet, target: &[String], acceptor: &mut A) -> PassOutcome
where
    T: Tagged,
    A: Acceptor<T> + ?Sized,
{
    let mut outcome = PassOutcome::default();

    for (index, entry) in pool.iter().enumerate() {
        if used.is_used(index) || !entry.matches(target) {
            continue;
        }
        match acceptor.try_accept(index, entry) {
            Acceptance::Rejected => {}
            Acceptance::Accepted => {
                used.mark(index);
                outcome.accepted.push(index);
            }
            Acceptance::QuotaReached => {
                used.mark(index);
                outcome.accepted.push(index);
                outcome.quota_reached = true;
                break;
            }
        }
    }

    outcome
}

/// True when at least one unused entry of `pool` matches `target`.
pub fn has_candidates<T: Tagged>(pool: &[T], used: &UsedSet, target: &[String]) -> bool {
    pool.iter()
        .enumerate()
        .any(|(index, entry)| !used.is_used(index) && entry.matches(target))
}

/// Running count against an optional limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    limit: Option<u32>,
    taken: u32,
}

impl Quota {
    pub fn limited(limit: u32) -> Self {
        Quota {
            limit: Some(limit),
            taken: 0,
        }
    }

    pub fn unlimited() -> Self {
        Quota {
            limit: None,
            taken: 0,
        }
    }

    /// 0 means unlimited.
    pub fn limited_or_unlimited(limit: u32) -> Self {
        if limit == 0 {
            Quota::unlimited()
        } else {
            Quota::limited(limit)
        }
    }

    /// Counts one acceptance and reports whether the limit is now met.
    pub fn take(&mut self) -> Acceptance {
        self.taken += 1;
        match self.limit {
            Some(limit) if self.taken >= limit => Acceptance::QuotaReached,
            _ => Acceptance::Accepted,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
