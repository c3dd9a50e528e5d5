//! Selection policies: staleness ordering and random sampling.
//!
//! The store applies these to its entities; they are kept free-standing so
//! the ordering rules can be tested without building a whole catalog.

use std::cmp::Ordering;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::{Game, Site};

/// Anything that records when it was last synced against the site.
pub trait Visited {
    fn last_checked(&self) -> Option<i64>;
}

impl Visited for Site {
    fn last_checked(&self) -> Option<i64> {
        Site::last_checked(self)
    }
}

impl Visited for Game {
    fn last_checked(&self) -> Option<i64> {
        Game::last_checked(self)
    }
}

/// Never-checked entities sort first, then ascending by last check time.
///
/// Two never-checked entities (or two with the same timestamp) compare equal,
/// so a stable sort keeps their input order.
pub fn compare_staleness<T: Visited + ?Sized>(a: &T, b: &T) -> Ordering {
    match (a.last_checked(), b.last_checked()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

/// Stable-sort `items` stalest first and keep at most `limit` of them.
pub fn stalest_first<T: Visited>(mut items: Vec<&T>, limit: Option<usize>) -> Vec<&T> {
    items.sort_by(|a, b| compare_staleness(*a, *b));
    truncate(items, limit)
}

/// Shuffle `items` with `rng`, then keep at most `limit` of them.
pub fn sample<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R, limit: Option<usize>) -> Vec<T> {
    items.shuffle(rng);
    truncate(items, limit)
}

fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(n) = limit {
        items.truncate(n);
    }
    items
}

#[cfg(test)]
#[path = "tests/select_tests.rs"]
mod tests;
