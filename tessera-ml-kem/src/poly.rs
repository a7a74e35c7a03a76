//! Polynomials in R_q = Z_q\[X\]/(X^256 + 1).
//!
//! [`Poly`] holds a polynomial in the normal domain and [`NttPoly`] holds one
//! in the NTT domain. They are distinct types, so the two domains cannot be
//! mixed by accident: the only conversions are [`Poly::ntt`] and
//! [`NttPoly::inv_ntt`]. Coefficients are always canonical in [0, q-1].
//!
//! Both types may carry secret material and are zeroized on drop. `Debug`
//! never prints coefficients.

use core::fmt;
use core::ops::{AddAssign, Mul, SubAssign};

use crate::ntt;
use crate::params::common::N;
use crate::reduce::{add_mod, barrett_reduce, sub_mod};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

macro_rules! define_poly_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            pub(crate) coeffs: [u16; N],
        }

        impl $name {
            /// The zero polynomial.
            pub const fn zero() -> Self {
                Self { coeffs: [0u16; N] }
            }

            /// Build a polynomial from raw coefficients, reducing each modulo q.
            pub fn from_coeffs(coeffs: [u16; N]) -> Self {
                Self {
                    coeffs: coeffs.map(|c| barrett_reduce(c as u32)),
                }
            }

            /// Canonical coefficients in [0, q-1].
            pub fn coeffs(&self) -> &[u16; N] {
                &self.coeffs
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }

        impl ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> Choice {
                self.coeffs[..].ct_eq(&other.coeffs[..])
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.ct_eq(other).into()
            }
        }

        impl Eq for $name {}

        impl AddAssign<&$name> for $name {
            fn add_assign(&mut self, rhs: &$name) {
                for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
                    *a = add_mod(*a, b);
                }
            }
        }

        impl SubAssign<&$name> for $name {
            fn sub_assign(&mut self, rhs: &$name) {
                for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
                    *a = sub_mod(*a, b);
                }
            }
        }
    };
}

define_poly_type!(
    /// A polynomial in the normal (coefficient) domain.
    Poly
);

define_poly_type!(
    /// A polynomial in the NTT domain: 128 degree-one residues.
    NttPoly
);

impl Poly {
    /// Transform into the NTT domain.
    pub fn ntt(&self) -> NttPoly {
        let mut out = NttPoly { coeffs: self.coeffs };
        ntt::ntt(&mut out.coeffs);
        out
    }
}

impl NttPoly {
    /// Transform back into the normal domain.
    pub fn inv_ntt(&self) -> Poly {
        let mut out = Poly { coeffs: self.coeffs };
        ntt::inv_ntt(&mut out.coeffs);
        out
    }

    /// Add `a ∘ b` into `self`.
    pub(crate) fn mul_acc(&mut self, a: &NttPoly, b: &NttPoly) {
        ntt::multiply_ntts_acc(&mut self.coeffs, &a.coeffs, &b.coeffs);
    }
}

impl Mul for &NttPoly {
    type Output = NttPoly;

    fn mul(self, rhs: &NttPoly) -> NttPoly {
        NttPoly {
            coeffs: ntt::multiply_ntts(&self.coeffs, &rhs.coeffs),
        }
    }
}
