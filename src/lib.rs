//! Residue number system arithmetic.
//!
//! An integer is held as its residues modulo a set of pairwise-coprime moduli.
//! Addition, subtraction and multiplication act on every residue
//! independently with no carries between components, and the Chinese
//! Remainder Theorem recovers the integer modulo the product of the moduli.
//!
//! Division and magnitude comparison have no cheap meaning in this
//! representation and are not provided.
//!
//! ```
//! use rns_crt::{ModulusSet, ResidueTuple};
//!
//! let moduli = ModulusSet::default_moduli(3)?;
//! let five = ResidueTuple::encode(5, &moduli);
//! let seven = ResidueTuple::encode(7, &moduli);
//!
//! assert_eq!(five.add(&seven)?.decode(), 12);
//! assert_eq!(five.mul(&seven)?.decode(), 35);
//! assert_eq!(seven.sub(&five)?.decode(), 2);
//! # Ok::<(), rns_crt::Error>(())
//! ```

mod crt;
mod error;
mod moduli;
mod residue;

pub use crt::{chinese_remainder, extended_gcd, gcd, mod_inverse};
pub use error::{Error, Result};
pub use moduli::ModulusSet;
pub use residue::ResidueTuple;
