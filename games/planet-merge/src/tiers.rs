//! Planet tiers, smallest to largest. Two equal planets fuse into the next tier.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Position in the catalog; rewritten by `TierTable::new`.
    #[serde(default)]
    pub index: usize,
    pub radius: f32,
    /// Texture/identity label, e.g. `"earth"`.
    pub identity: String,
}

impl Tier {
    fn new(radius: f32, identity: &str) -> Self {
        Self {
            index: 0,
            radius,
            identity: identity.to_string(),
        }
    }
}

/// Tier catalog errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TierError {
    #[error("tier {index} out of range (max {max})")]
    OutOfRange { index: usize, max: usize },
    #[error("tier catalog is empty")]
    Empty,
    #[error("tier {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },
}

/// Ordered, immutable tier catalog. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Validate and reindex a catalog.
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, TierError> {
        if tiers.is_empty() {
            return Err(TierError::Empty);
        }
        for (index, tier) in tiers.iter_mut().enumerate() {
            if !tier.radius.is_finite() || tier.radius <= 0.0 {
                return Err(TierError::InvalidRadius {
                    index,
                    radius: tier.radius,
                });
            }
            tier.index = index;
        }
        Ok(Self { tiers })
    }

    /// The compiled-in solar system catalog.
    pub fn planets() -> Self {
        let tiers = [
            (12.0, "moon"),
            (16.0, "mercury"),
            (20.0, "mars"),
            (25.0, "venus"),
            (30.0, "earth"),
            (36.0, "neptune"),
            (42.0, "uranus"),
            (50.0, "saturn"),
            (60.0, "jupiter"),
        ]
        .iter()
        .enumerate()
        .map(|(index, &(radius, identity))| Tier {
            index,
            ..Tier::new(radius, identity)
        })
        .collect();
        Self { tiers }
    }

    pub fn tier_at(&self, index: usize) -> Result<&Tier, TierError> {
        self.tiers.get(index).ok_or(TierError::OutOfRange {
            index,
            max: self.max_index(),
        })
    }

    /// `None` for the terminal tier and for unknown indices.
    pub fn next_tier(&self, index: usize) -> Option<&Tier> {
        if index >= self.max_index() {
            return None;
        }
        self.tiers.get(index + 1)
    }

    /// Uniform pick among the two smallest tiers.
    pub fn random_spawn_tier<R: Rng + ?Sized>(&self, rng: &mut R) -> &Tier {
        let pool = self.tiers.len().min(2);
        &self.tiers[rng.random_range(0..pool)]
    }

    pub fn max_index(&self) -> usize {
        self.tiers.len() - 1
    }

    pub fn is_terminal(&self, index: usize) -> bool {
        index == self.max_index()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::planets()
    }
}
