//! Quote Selection - No Repeat Until Exhausted
//!
//! [`SelectionState`] tracks the quote on display and the pool of quotes not
//! yet shown in the current rotation cycle. Every pick draws uniformly from
//! the pool and removes the winner from it; when the pool runs dry it is
//! reseeded from the whole catalog minus the quote on display, so a quote is
//! never shown twice in a row unless the catalog holds just one.
//!
//! Quotes are tracked by catalog position. Two entries with the same text are
//! still two separate entries.

use crate::error::{QuoteError, Result};
use crate::quote::{Catalog, Quote};
use crate::random::IndexSource;

/// Outcome of a single pick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pick {
    /// Catalog index shown before the pick
    pub previous: usize,
    /// Catalog index shown after the pick
    pub current: usize,
    /// Whether the pool had to be reseeded for this pick
    pub reseeded: bool,
}

/// Current quote plus the unused pool of the running rotation cycle
#[derive(Clone, Debug)]
pub struct SelectionState {
    catalog: Catalog,
    current: usize,
    unused: Vec<usize>,
    reseeds: u64,
}

impl SelectionState {
    /// Mount: choose a uniformly random first quote
    ///
    /// `unused` becomes every other catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidCatalog`] if the catalog is empty.
    pub fn initialize<R: IndexSource + ?Sized>(catalog: Catalog, rng: &mut R) -> Result<Self> {
        let pool: Vec<usize> = (0..catalog.len()).collect();
        let (current, unused) = take_random(pool, rng)?;

        tracing::debug!(current, pool = unused.len(), "Selected initial quote");

        Ok(Self {
            catalog,
            current,
            unused,
            reseeds: 0,
        })
    }

    /// Replace the current quote with a random one from the pool
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidCatalog`] if the pool is empty, which only
    /// happens for an empty catalog.
    pub fn pick_next<R: IndexSource + ?Sized>(&mut self, rng: &mut R) -> Result<Pick> {
        let previous = self.current;
        let reseeded = self.unused.is_empty();

        let pool = if reseeded {
            self.reseeds += 1;
            self.reseed_pool()
        } else {
            std::mem::take(&mut self.unused)
        };

        let (current, unused) = take_random(pool, rng)?;
        self.current = current;
        self.unused = unused;

        tracing::debug!(
            previous,
            current,
            reseeded,
            remaining = self.unused.len(),
            "Picked next quote"
        );

        Ok(Pick {
            previous,
            current,
            reseeded,
        })
    }

    /// Full catalog, minus the quote on display when there is an alternative
    fn reseed_pool(&self) -> Vec<usize> {
        if self.catalog.len() > 1 {
            (0..self.catalog.len())
                .filter(|&i| i != self.current)
                .collect()
        } else {
            (0..self.catalog.len()).collect()
        }
    }

    /// The quote on display
    #[must_use]
    pub fn current(&self) -> &Quote {
        &self.catalog.quotes()[self.current]
    }

    /// Catalog position of the quote on display
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Quotes not yet shown in this rotation cycle, in catalog order
    pub fn unused(&self) -> impl Iterator<Item = &Quote> {
        self.unused.iter().map(|&i| &self.catalog.quotes()[i])
    }

    /// Catalog positions not yet shown in this rotation cycle
    #[must_use]
    pub fn unused_indices(&self) -> &[usize] {
        &self.unused
    }

    /// How many times the pool has been reseeded since mount
    #[must_use]
    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }

    /// The catalog this state rotates through
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// `current` is in range, absent from `unused`, and `unused` has no duplicates
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let len = self.catalog.len();
        if self.current >= len || self.unused.contains(&self.current) {
            return false;
        }
        let mut seen = vec![false; len];
        for &i in &self.unused {
            if i >= len || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }
}

/// Uniformly remove one element from `pool`, keeping the rest in order
fn take_random<R: IndexSource + ?Sized>(
    mut pool: Vec<usize>,
    rng: &mut R,
) -> Result<(usize, Vec<usize>)> {
    if pool.is_empty() {
        return Err(QuoteError::InvalidCatalog(
            "no quotes available to pick from".into(),
        ));
    }
    let slot = rng.next_index(pool.len()).min(pool.len() - 1);
    let chosen = pool.remove(slot);
    Ok((chosen, pool))
}
