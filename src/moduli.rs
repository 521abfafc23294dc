use std::fmt;

use tracing::{debug, warn};

use crate::crt::{self, gcd};
use crate::error::{Error, Result};

/// Known-good sets for the two common sizes. Pairwise coprime:
/// 251 is prime, 253 = 11·23, 255 = 3·5·17, 256 = 2⁸.
const DEFAULT_TABLE: &[&[u64]] = &[&[251, 253, 255], &[251, 253, 255, 256]];

/// An immutable, validated list of pairwise-coprime moduli.
///
/// Every modulus is greater than one, no two moduli share a factor and the
/// dynamic range (the product of all moduli) fits in a `u64`. These checks
/// happen once in [`ModulusSet::new`], which also precomputes the CRT basis
/// used for reconstruction. Afterwards the set is never mutated and can be
/// shared by reference across any number of tuples and threads.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModulusSet {
    moduli: Vec<u64>,
    dynamic_range: u64,
    basis: Vec<u64>,
}

impl ModulusSet {
    pub fn new(moduli: Vec<u64>) -> Result<Self> {
        let dynamic_range = Self::validate(&moduli)
            .inspect_err(|e| warn!(?moduli, "rejected modulus set: {e}"))?;
        let basis = crt::crt_basis(&moduli, dynamic_range)?;

        debug!(?moduli, dynamic_range, "constructed modulus set");

        Ok(Self {
            moduli,
            dynamic_range,
            basis,
        })
    }

    /// Checks every invariant and returns the dynamic range.
    fn validate(moduli: &[u64]) -> Result<u64> {
        if moduli.is_empty() {
            return Err(Error::InvalidConfiguration(
                "at least one modulus is required".to_string(),
            ));
        }

        if let Some(&m) = moduli.iter().find(|&&m| m < 2) {
            return Err(Error::InvalidConfiguration(format!(
                "modulus must be > 1, got {m}"
            )));
        }

        for (i, &a) in moduli.iter().enumerate() {
            for &b in &moduli[i + 1..] {
                let g = gcd(a, b);
                if g != 1 {
                    return Err(Error::InvalidConfiguration(format!(
                        "moduli {a} and {b} are not coprime (gcd {g})"
                    )));
                }
            }
        }

        crt::dynamic_range(moduli)
    }

    /// A coprime set of `n` moduli.
    ///
    /// For `n == 3` and `n == 4` this is a fixed table whose dynamic range
    /// fits in 32 bits. For any other `n` it takes the smallest
    /// candidate from 2 upwards that is coprime to everything accepted so far.
    /// The search always terminates, but it is a heuristic: it produces the
    /// first `n` primes and makes no attempt to balance or minimize bit
    /// widths. From `n == 16` on the product of those primes no longer fits
    /// in a `u64` and this fails with [`Error::InvalidConfiguration`].
    pub fn default_moduli(n: usize) -> Result<Self> {
        if let Some(table) = DEFAULT_TABLE.iter().find(|t| t.len() == n) {
            debug!(n, "using tabulated default moduli");
            return Self::new(table.to_vec());
        }

        if n == 0 {
            return Err(Error::InvalidConfiguration(
                "at least one modulus is required".to_string(),
            ));
        }

        let mut moduli = Vec::new();
        let mut product = 1u64;
        let mut candidate = 2u64;

        while moduli.len() < n {
            if moduli.iter().all(|&m| gcd(m, candidate) == 1) {
                product = product.checked_mul(candidate).ok_or_else(|| {
                    Error::InvalidConfiguration(format!(
                        "{n} default moduli overflow u64 at modulus {candidate} (index {})",
                        moduli.len()
                    ))
                })?;
                moduli.push(candidate);
            }
            candidate += 1;
        }

        debug!(n, ?moduli, "generated default moduli");

        Self::new(moduli)
    }

    /// Number of moduli, `N`.
    pub fn len(&self) -> usize {
        self.moduli.len()
    }

    /// Always `false`; a set holds at least one modulus.
    pub fn is_empty(&self) -> bool {
        self.moduli.is_empty()
    }

    pub fn moduli(&self) -> &[u64] {
        &self.moduli
    }

    /// Product of all moduli, `M`.
    pub fn dynamic_range(&self) -> u64 {
        self.dynamic_range
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.moduli.iter().copied()
    }

    pub(crate) fn basis(&self) -> &[u64] {
        &self.basis
    }
}

impl TryFrom<Vec<u64>> for ModulusSet {
    type Error = Error;

    fn try_from(moduli: Vec<u64>) -> Result<Self> {
        Self::new(moduli)
    }
}

impl TryFrom<&[u64]> for ModulusSet {
    type Error = Error;

    fn try_from(moduli: &[u64]) -> Result<Self> {
        Self::new(moduli.to_vec())
    }
}

impl fmt::Display for ModulusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, m) in self.moduli.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, "}}")
    }
}
