use std::fmt;

use rand::Rng;
use tracing::trace;

use crate::crt::{self, add_mod, mul_mod, sub_mod};
use crate::error::{Error, Result};
use crate::moduli::ModulusSet;

/// An integer held as its residues modulo every modulus of a [`ModulusSet`].
///
/// A tuple denotes a congruence class modulo the dynamic range `M`, not a
/// single integer; [`ResidueTuple::decode`] picks the representative in
/// `[0, M)`. Each residue is always in canonical `[0, modulus)` form, so two
/// tuples over the same set are equal exactly when they denote the same class.
///
/// The derived `Ord` compares the modulus sets and then the residues
/// lexicographically. It exists so tuples can live in ordered containers and
/// says nothing about the magnitude of the integers they represent:
///
/// ```
/// use rns_crt::{ModulusSet, ResidueTuple};
///
/// let moduli = ModulusSet::new(vec![3, 5]).unwrap();
/// let two = ResidueTuple::encode(2, &moduli);
/// let three = ResidueTuple::encode(3, &moduli);
/// assert!(two > three);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResidueTuple<'a> {
    moduli: &'a ModulusSet,
    residues: Vec<u64>,
}

impl<'a> ResidueTuple<'a> {
    /// Encodes `value`, negative or not, as its residues modulo each modulus.
    pub fn encode(value: i128, moduli: &'a ModulusSet) -> Self {
        let residues = moduli
            .iter()
            .map(|m| value.rem_euclid(m as i128) as u64)
            .collect();

        Self { moduli, residues }
    }

    /// Builds a tuple from residues that are already reduced.
    pub fn from_residues(residues: Vec<u64>, moduli: &'a ModulusSet) -> Result<Self> {
        if residues.len() != moduli.len() {
            return Err(Error::LengthMismatch {
                expected: moduli.len(),
                actual: residues.len(),
            });
        }

        if let Some((index, (&residue, modulus))) = residues
            .iter()
            .zip(moduli.iter())
            .enumerate()
            .find(|(_, (&r, m))| r >= *m)
        {
            return Err(Error::ResidueOutOfRange {
                index,
                residue,
                modulus,
            });
        }

        Ok(Self { moduli, residues })
    }

    pub fn zero(moduli: &'a ModulusSet) -> Self {
        Self {
            moduli,
            residues: vec![0; moduli.len()],
        }
    }

    pub fn one(moduli: &'a ModulusSet) -> Self {
        Self {
            moduli,
            residues: vec![1; moduli.len()],
        }
    }

    /// A uniformly random element of `Z/MZ`, using the thread-local RNG.
    #[cfg(feature = "thread_rng")]
    pub fn random(moduli: &'a ModulusSet) -> Self {
        Self::random_with_rng(moduli, &mut rand::rng())
    }

    /// A uniformly random element of `Z/MZ`. Sampling each residue uniformly
    /// is uniform over the whole range because the CRT map is a bijection.
    pub fn random_with_rng<R: Rng>(moduli: &'a ModulusSet, rng: &mut R) -> Self {
        let residues = moduli.iter().map(|m| rng.random_range(0..m)).collect();

        Self { moduli, residues }
    }

    /// Reconstructs the represented integer in `[0, M)`.
    pub fn decode(&self) -> u64 {
        let value = crt::reconstruct(
            &self.residues,
            self.moduli.basis(),
            self.moduli.dynamic_range(),
        );
        trace!(residues = ?self.residues, value, "decoded residue tuple");
        value
    }

    pub fn residues(&self) -> &[u64] {
        &self.residues
    }

    pub fn moduli(&self) -> &'a ModulusSet {
        self.moduli
    }

    pub fn dynamic_range(&self) -> u64 {
        self.moduli.dynamic_range()
    }

    /// Componentwise `(a + b) mod m_i`.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, add_mod)
    }

    /// Componentwise `(a - b) mod m_i`.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, sub_mod)
    }

    /// Componentwise `(a * b) mod m_i`.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, mul_mod)
    }

    /// Additive inverse, `(m_i - r_i) mod m_i` per component.
    pub fn neg(&self) -> Self {
        let residues = self
            .residues
            .iter()
            .zip(self.moduli.iter())
            .map(|(&r, m)| sub_mod(0, r, m))
            .collect();

        Self {
            moduli: self.moduli,
            residues,
        }
    }

    // Each output component depends only on the matching input components,
    // so callers may split the work across threads or lanes freely.
    fn zip_with(&self, other: &Self, op: impl Fn(u64, u64, u64) -> u64) -> Result<Self> {
        if !self.shares_moduli(other) {
            return Err(Error::ModuliMismatch);
        }

        let residues = self
            .residues
            .iter()
            .zip(&other.residues)
            .zip(self.moduli.iter())
            .map(|((&a, &b), m)| op(a, b, m))
            .collect();

        Ok(Self {
            moduli: self.moduli,
            residues,
        })
    }

    fn shares_moduli(&self, other: &Self) -> bool {
        std::ptr::eq(self.moduli, other.moduli) || self.moduli == other.moduli
    }
}

impl fmt::Display for ResidueTuple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RNS(")?;
        for (i, (r, m)) in self.residues.iter().zip(self.moduli.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r} mod {m}")?;
        }
        write!(f, ")")
    }
}
