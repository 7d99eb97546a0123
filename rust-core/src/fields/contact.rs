// Contact field: distance weighted average over the closest magnetic neighbours of the probe.

use serde::{Deserialize, Serialize};

use crate::algebra::Vec3;
use crate::config::{CONTACT_SCALING_POWER, HELIX_TOLERANCE};
use crate::error::{record, Diagnostic, FieldError};
use crate::pile::Pile;

/// How many neighbours enter the contact field and how far they may be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactSettings {
    pub neighbours: usize,
    /// Cutoff radius (Å).
    pub radius: f64,
}

impl ContactSettings {
    pub fn new(neighbours: usize, radius: f64) -> Self {
        Self { neighbours, radius }
    }

    /// No contact contribution at all.
    pub fn disabled() -> Self {
        Self::new(0, 0.0)
    }

    pub fn within(&self, distance: f64) -> bool {
        distance < self.radius
    }

    /// Ordering key of a neighbour in the pile.
    pub fn rank(distance: f64) -> f64 {
        distance.powi(CONTACT_SCALING_POWER)
    }

    pub fn pile<T>(&self) -> Result<Pile<T>, FieldError> {
        Pile::try_new(self.neighbours)
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self::disabled()
    }
}

/// `Σ payload / Σ 1/rank` over entries with positive rank, zero if there are none.
///
/// Payloads are expected to be already divided by their rank.
pub fn weighted_average(pile: &Pile<Vec3>) -> Vec3 {
    let (sum, weight) = pile
        .iter()
        .filter(|entry| entry.rank > 0.0)
        .fold((Vec3::zeros(), 0.0), |(sum, weight), entry| {
            (sum + entry.value, weight + 1.0 / entry.rank)
        });
    if weight > 0.0 {
        sum / weight
    } else {
        Vec3::zeros()
    }
}

/// Rank weighted sums of a cosine and a sine pile filled side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedContact {
    /// `Σ C_i / r_i`
    pub cosine: Vec3,
    /// `Σ S_i / r_i`
    pub sine: Vec3,
    /// `Σ 1 / r_i`
    pub weight: f64,
}

impl PairedContact {
    /// Walk both piles slot by slot. A slot counts only when both piles hold
    /// an entry there with positive, matching ranks; any other disagreement is
    /// recorded and the slot skipped.
    pub fn collect(cosine: &Pile<Vec3>, sine: &Pile<Vec3>, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let mut paired = Self {
            cosine: Vec3::zeros(),
            sine: Vec3::zeros(),
            weight: 0.0,
        };

        for slot in 0..cosine.len().max(sine.len()) {
            match (cosine.get(slot), sine.get(slot)) {
                (Some(c), Some(s)) if (c.rank - s.rank).abs() <= HELIX_TOLERANCE * c.rank.abs().max(1.0) => {
                    if c.rank > 0.0 {
                        paired.cosine += c.value / c.rank;
                        paired.sine += s.value / c.rank;
                        paired.weight += 1.0 / c.rank;
                    }
                }
                (c, s) => record(
                    diagnostics,
                    Diagnostic::ContactRankMismatch {
                        slot,
                        cosine_rank: c.map(|entry| entry.rank),
                        sine_rank: s.map(|entry| entry.rank),
                    },
                ),
            }
        }
        paired
    }

    /// Contact field per unit prefactor at helix angle `angle`.
    pub fn at_angle(&self, angle: f64) -> Vec3 {
        if self.weight > 0.0 {
            let (s, c) = angle.sin_cos();
            (self.cosine * c - self.sine * s) / self.weight
        } else {
            Vec3::zeros()
        }
    }
}
