//! Arithmetic in GF(2^8) for Shamir secret sharing.
//!
//! The field is `GF(2)[x] / (x^8 + x^4 + x^3 + x + 1)` (the AES polynomial,
//! `0x11B`). Addition and subtraction are XOR. Multiplication and division go
//! through logarithm / antilogarithm tables over the generator `0x03`, built
//! at compile time.
//!
//! Zero has no logarithm; every operation that would need `log(0)` handles it
//! explicitly, and division by zero is reported through [`Option`] instead of
//! panicking.

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

use zeroize::Zeroize;

/// Reduction polynomial without the x^8 term.
const REDUCTION: u8 = 0x1B;

/// Multiplicative generator of the field.
const GENERATOR: u8 = 0x03;

const fn xtime(a: u8) -> u8 {
    let shifted = a << 1;
    if a & 0x80 != 0 { shifted ^ REDUCTION } else { shifted }
}

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u8 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x;
        log[x as usize] = i as u8;
        // x * 0x03 = x * 0x02 + x
        x = xtime(x) ^ x;
        i += 1;
    }
    exp[255] = exp[0];
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

/// `EXP[i] = GENERATOR^i`.
const EXP: [u8; 256] = TABLES.0;

/// `LOG[GENERATOR^i] = i`; `LOG[0]` is unused.
const LOG: [u8; 256] = TABLES.1;

/// An element of GF(256).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gf256(pub u8);

impl Gf256 {
    pub const ZERO: Self = Gf256(0);
    pub const ONE: Self = Gf256(1);

    /// Multiplicative inverse, `None` for zero.
    pub fn inv(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        let l = LOG[self.0 as usize] as usize;
        Some(Gf256(EXP[(255 - l) % 255]))
    }

    /// `self / rhs`, `None` when `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        rhs.inv().map(|r| self * r)
    }

    /// `GENERATOR^power`.
    pub fn exp(power: u8) -> Self {
        Gf256(EXP[power as usize % 255])
    }

    /// Discrete logarithm base `GENERATOR`, `None` for zero.
    pub fn log(self) -> Option<u8> {
        (self.0 != 0).then(|| LOG[self.0 as usize])
    }
}

impl Zeroize for Gf256 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl From<u8> for Gf256 {
    fn from(b: u8) -> Self {
        Gf256(b)
    }
}

impl From<Gf256> for u8 {
    fn from(e: Gf256) -> Self {
        e.0
    }
}

impl Add for Gf256 {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self {
        Gf256(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf256 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Gf256 {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Self) -> Self {
        Gf256(self.0 ^ rhs.0)
    }
}

impl Mul for Gf256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Gf256::ZERO;
        }
        let l = LOG[self.0 as usize] as usize + LOG[rhs.0 as usize] as usize;
        Gf256(EXP[l % 255])
    }
}

impl MulAssign for Gf256 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Evaluate `coeffs[0] + coeffs[1]·x + coeffs[2]·x² + ...` with Horner's rule.
pub fn eval_polynomial(coeffs: &[Gf256], x: Gf256) -> Gf256 {
    coeffs
        .iter()
        .rev()
        .fold(Gf256::ZERO, |acc, &c| acc * x + c)
}

/// Lagrange basis polynomials through `xs`, each evaluated at zero.
///
/// `weights[i] = prod_{j != i} xj / (xi - xj)`, so the interpolated value at
/// zero of any polynomial with `f(xs[i]) = ys[i]` is `sum weights[i] * ys[i]`.
/// The weights depend only on the x-coordinates and can be reused across many
/// polynomials evaluated at the same points.
///
/// Returns `None` if two x-coordinates coincide.
pub fn lagrange_weights_at_zero(xs: &[Gf256]) -> Option<Vec<Gf256>> {
    xs.iter()
        .enumerate()
        .map(|(i, &xi)| {
            let (num, den) = xs
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                // (0 - xj) / (xi - xj), with subtraction as XOR
                .fold((Gf256::ONE, Gf256::ONE), |(n, d), (_, &xj)| (n * xj, d * (xi - xj)));
            num.checked_div(den)
        })
        .collect()
}

/// Lagrange-interpolate the polynomial through `points` and evaluate it at zero.
///
/// Returns `None` if two points share an x-coordinate. Callers are expected to
/// have rejected x = 0.
pub fn interpolate_at_zero(points: &[(Gf256, Gf256)]) -> Option<Gf256> {
    let xs: Vec<Gf256> = points.iter().map(|&(x, _)| x).collect();
    let weights = lagrange_weights_at_zero(&xs)?;
    Some(
        weights
            .iter()
            .zip(points)
            .fold(Gf256::ZERO, |acc, (&w, &(_, y))| acc + w * y),
    )
}
