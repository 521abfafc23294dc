use crate::error::{Error, Result};

/// Greatest common divisor of `a` and `b`, with `gcd(0, 0) == 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a * x + b * y == g == gcd(a, b)`. Inputs must be
/// non-negative; coefficients stay bounded by the inputs so any pair of `u64`
/// values fits without overflow.
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let mut rs = (a, b);
    let mut xs = (1, 0);
    let mut ys = (0, 1);

    while rs.1 != 0 {
        let quotient = rs.0 / rs.1;
        rs = (rs.1, rs.0 - quotient * rs.1);
        xs = (xs.1, xs.0 - quotient * xs.1);
        ys = (ys.1, ys.0 - quotient * ys.1);
    }

    (rs.0, xs.0, ys.0)
}

/// Multiplicative inverse of `a` modulo `m`, normalized into `[0, m)`.
///
/// Negative `a` is reduced modulo `m` first. Fails with
/// [`Error::NoInverseExists`] when `gcd(a, m) != 1`, which includes `a ≡ 0`.
pub fn mod_inverse(a: i128, m: u64) -> Result<u64> {
    if m < 2 {
        return Err(Error::InvalidConfiguration(format!(
            "modulus must be > 1, got {m}"
        )));
    }

    let modulus = m as i128;
    let reduced = a.rem_euclid(modulus);
    let (g, x, _) = extended_gcd(reduced, modulus);

    if g != 1 {
        return Err(Error::NoInverseExists {
            value: a,
            modulus: m,
        });
    }

    Ok(x.rem_euclid(modulus) as u64)
}

/// Reconstructs the unique value in `[0, M)` congruent to each remainder
/// modulo the matching modulus, where `M` is the product of `moduli`.
///
/// Every product is formed in `u128` and reduced modulo `M` straight away.
/// `M` itself must fit in a `u64`, so `M²` fits in a `u128` and no step of the
/// accumulation can overflow.
pub fn chinese_remainder(remainders: &[u64], moduli: &[u64]) -> Result<u64> {
    if remainders.len() != moduli.len() {
        return Err(Error::LengthMismatch {
            expected: moduli.len(),
            actual: remainders.len(),
        });
    }

    let product_of_moduli = dynamic_range(moduli)?;
    let basis = crt_basis(moduli, product_of_moduli)?;

    Ok(reconstruct(remainders, &basis, product_of_moduli))
}

/// CRT basis for `moduli`: element `i` is `Mi * (Mi⁻¹ mod m_i) mod M` with
/// `Mi = M / m_i`, i.e. the value that is 1 modulo `m_i` and 0 modulo every
/// other modulus.
pub(crate) fn crt_basis(moduli: &[u64], product_of_moduli: u64) -> Result<Vec<u64>> {
    moduli
        .iter()
        .map(|&modulus| {
            let partial_product = product_of_moduli / modulus;
            let inverse = mod_inverse((partial_product % modulus) as i128, modulus)?;
            Ok(mul_mod(partial_product, inverse, product_of_moduli))
        })
        .collect()
}

/// Sum of `remainder_i * basis_i` modulo `product_of_moduli`.
pub(crate) fn reconstruct(remainders: &[u64], basis: &[u64], product_of_moduli: u64) -> u64 {
    remainders
        .iter()
        .zip(basis)
        .fold(0, |acc, (&remainder, &b)| {
            add_mod(acc, mul_mod(remainder, b, product_of_moduli), product_of_moduli)
        })
}

/// Product of `moduli`, rejecting moduli <= 1 and products that overflow `u64`.
pub(crate) fn dynamic_range(moduli: &[u64]) -> Result<u64> {
    moduli.iter().enumerate().try_fold(1u64, |acc, (index, &m)| {
        if m < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "modulus must be > 1, got {m}"
            )));
        }
        acc.checked_mul(m).ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "dynamic range overflows u64 at modulus {m} (index {index})"
            ))
        })
    })
}

/// `(a + b) mod m` for `a, b < m`.
#[inline]
pub(crate) fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 + b as u128) % m as u128) as u64
}

/// `(a - b) mod m` for `a, b < m`.
#[inline]
pub(crate) fn sub_mod(a: u64, b: u64, m: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// `(a * b) mod m` using a 128-bit intermediate.
#[inline]
pub(crate) fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}
