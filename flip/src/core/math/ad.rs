use std::ops::{Add, Mul, Neg, Sub};

/// A Dual number for Forward-Mode Automatic Differentiation.
/// Represents values in the form `a + bε` where `ε² = 0`.
///
/// The slice potentials are one-dimensional, so seeding the slice coordinate
/// with `variable` and evaluating the potential once yields `dV/dz` directly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual {
    /// The primal value (f(z))
    pub val: f64,
    /// The derivative value (f'(z))
    pub der: f64,
}

impl Dual {
    pub const fn new(val: f64, der: f64) -> Self {
        Self { val, der }
    }

    /// Creates the variable w.r.t which we are differentiating (seed = 1.0)
    pub const fn variable(val: f64) -> Self {
        Self { val, der: 1.0 }
    }

    /// Creates a constant value (derivative = 0.0)
    pub const fn constant(val: f64) -> Self {
        Self { val, der: 0.0 }
    }

    /// Multiplies by a plain scalar.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.val * k, self.der * k)
    }

    pub fn square(self) -> Self {
        self * self
    }
}

impl Add for Dual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.der + rhs.der)
    }
}

impl Sub for Dual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.der - rhs.der)
    }
}

impl Mul for Dual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Product rule: (a + bε)(c + dε) = ac + (ad + bc)ε
        Self::new(self.val * rhs.val, self.val * rhs.der + self.der * rhs.val)
    }
}

impl Neg for Dual {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.der)
    }
}
