// Complete Complex Number Implementation
// A Copy value type with its arithmetic expressed through operator traits

use std::fmt;
use std::ops::{Add, AddAssign, Neg};

// ============================================================================
// Milestone 1: The Value Type
// ============================================================================

/// A complex number over two `f64` components.
///
/// Plain value semantics: `Copy`, no heap state, no invariants beyond IEEE
/// 754. Both components default to zero, so `Complex::default()` is the
/// additive identity.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    pub fn real(&self) -> f64 {
        self.re
    }

    pub fn imag(&self) -> f64 {
        self.im
    }

    /// The complex conjugate: the imaginary component negated.
    pub fn conj(&self) -> Complex {
        Complex::new(self.re, -self.im)
    }
}

// ============================================================================
// Milestone 2: Compound Assignment
// ============================================================================

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

// ============================================================================
// Milestone 3: Addition Across Operand Mixes
// ============================================================================

// `complex + f64` and `f64 + complex` each need their own impl; the
// trait's type parameter carries the right-hand side, and the impl's Self
// the left.

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Add<f64> for Complex {
    type Output = Complex;

    fn add(self, rhs: f64) -> Complex {
        Complex::new(self.re + rhs, self.im)
    }
}

impl Add<Complex> for f64 {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self + rhs.re, rhs.im)
    }
}

// ============================================================================
// Milestone 4: Sign and Comparison
// ============================================================================

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

// A real number equals a complex number exactly when the imaginary
// component is zero. `!=` comes with `PartialEq` for free.

impl PartialEq<f64> for Complex {
    fn eq(&self, other: &f64) -> bool {
        self.re == *other && self.im == 0.0
    }
}

impl PartialEq<Complex> for f64 {
    fn eq(&self, other: &Complex) -> bool {
        *self == other.re && other.im == 0.0
    }
}

// ============================================================================
// Milestone 5: Text Output
// ============================================================================

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.re, self.im)
    }
}

// ============================================================================
// Example usage
// ============================================================================

fn main() {
    println!("=== Complex Arithmetic ===\n");

    let c1 = Complex::new(2.0, 1.0);
    let c2 = Complex::new(4.0, 0.0);

    println!("c1          = {c1}");
    println!("c2          = {c2}");
    println!("c1 + c2     = {}", c1 + c2);
    println!("c1 + 5.0    = {}", c1 + 5.0);
    println!("7.0 + c1    = {}", 7.0 + c1);
    println!("-c1         = {}", -c1);
    println!("conj(c1)    = {}", c1.conj());

    let mut acc = Complex::default();
    acc += c1;
    acc += c2;
    println!("accumulated = {acc}");

    println!("c2 == 4.0   : {}", c2 == 4.0);
    println!("c1 == 2.0   : {}", c1 == 2.0);
    println!("4.0 == c2   : {}", 4.0 == c2);
}

// ============================================================================
// Tests
// ============================================================================
