//! Seed selection

use seedmix_common::Seed;

/// The user's chosen seed tracks, in insertion order
///
/// Identity is the case-insensitive title/artist pair; at most one seed per
/// identity is held.
#[derive(Debug, Clone, Default)]
pub struct SeedStore {
    seeds: Vec<Seed>,
}

impl SeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `seed` unless one with the same identity exists
    ///
    /// Returns `false` (and leaves the store untouched) for a duplicate.
    pub fn add(&mut self, seed: Seed) -> bool {
        let key = seed.identity_key();
        if self.seeds.iter().any(|s| s.identity_key() == key) {
            tracing::debug!(title = %seed.title, artist = %seed.artist, "Seed already selected");
            return false;
        }
        self.seeds.push(seed);
        true
    }

    /// Remove the seed at `index`; out-of-range is a no-op
    pub fn remove(&mut self, index: usize) -> Option<Seed> {
        if index < self.seeds.len() {
            Some(self.seeds.remove(index))
        } else {
            None
        }
    }

    pub fn list(&self) -> &[Seed] {
        &self.seeds
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn clear(&mut self) {
        self.seeds.clear();
    }
}
