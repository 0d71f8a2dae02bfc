//! Exact one-step responses of the damped oscillator `u'' + γu' + ω²u = s(t)`.
//!
//! For constant γ, ω and forcing, the state after one step is a linear
//! combination of two scalar functions of `dt`:
//!
//! ```text
//! h(dt)  impulse response, h(0) = 0, h'(0) = 1
//! D(dt)  step response,    D(0) = 0, D'(0) = 0, D = ∫ h
//!
//! u₁ = u₀(1 - ω²D) + v₀h - F·D
//! v₁ = v₀(1 - γh - ω²D) - ω²u₀h - F·h
//! ```
//!
//! With λ² = γ²/4 - ω² the overdamped responses are hyperbolic,
//! `h = e^{-γt/2} sinh(λt)/λ`, and continue to `sin(μt)/μ` with μ² = -λ²
//! once the restoring term outweighs the damping. Every evaluation below
//! avoids dividing a cancelling difference by ω², so the responses stay
//! smooth as ω → 0.

/// (γ + |ω|)·dt at or below which the power series is summed.
const SERIES_LIMIT: f64 = 0.5;
const SERIES_TERMS: usize = 40;

/// λ·dt from which the hyperbolic pair is evaluated as two decaying exponentials.
const HYPERBOLIC_SPLIT: f64 = 0.5;

/// ω²·dt² from which D is taken from `1 - ω²D = e^{-γt/2}cosh(λt) + γh/2`.
const DIRECT_STEP_LIMIT: f64 = 1e-2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagator {
    /// h(dt)
    pub impulse: f64,
    /// D(dt)
    pub step: f64,
}

impl Propagator {
    pub fn new(gamma: f64, omega_sq: f64, dt: f64) -> Self {
        if (gamma + omega_sq.sqrt()) * dt <= SERIES_LIMIT {
            return Self::series(gamma, omega_sq, dt);
        }

        let lambda_sq = 0.25 * gamma * gamma - omega_sq;
        let (even, impulse) = if lambda_sq > 0.0 {
            hyperbolic(gamma, lambda_sq.sqrt(), omega_sq, dt)
        } else {
            circular(gamma, (-lambda_sq).sqrt(), dt)
        };

        let step = if omega_sq * dt * dt >= DIRECT_STEP_LIMIT {
            (1.0 - even - 0.5 * gamma * impulse) / omega_sq
        } else {
            // Strongly overdamped: γ·dt > 0.4 here, so λ is well away from 0.
            two_root_step(gamma, lambda_sq.sqrt(), omega_sq, dt)
        };

        Self { impulse, step }
    }

    /// Taylor series of D about t = 0. With b_n = a_n·dtⁿ:
    /// b₂ = dt²/2, (n+2)(n+1)·b_{n+2} = -γdt(n+1)·b_{n+1} - ω²dt²·b_n
    fn series(gamma: f64, omega_sq: f64, dt: f64) -> Self {
        let g = gamma * dt;
        let w = omega_sq * dt * dt;

        let mut prev = 0.0;
        let mut curr = 0.5 * dt * dt;
        let mut step = curr;
        let mut impulse = 2.0 * curr;

        for n in 1..SERIES_TERMS {
            let k = n as f64;
            let next = -(g * (k + 1.0) * curr + w * prev) / ((k + 2.0) * (k + 1.0));
            step += next;
            impulse += (k + 2.0) * next;
            if next.abs() + curr.abs() <= f64::EPSILON * step.abs() {
                break;
            }
            prev = curr;
            curr = next;
        }

        Self {
            impulse: impulse / dt,
            step,
        }
    }
}

/// Returns (e^{-γt/2}·cosh(λt), e^{-γt/2}·sinh(λt)/λ).
fn hyperbolic(gamma: f64, lambda: f64, omega_sq: f64, dt: f64) -> (f64, f64) {
    let x = lambda * dt;
    if x < HYPERBOLIC_SPLIT {
        let decay = (-0.5 * gamma * dt).exp();
        return (decay * x.cosh(), decay * dt * sinhc(x));
    }

    // Both roots are non-positive, so neither exponential overflows.
    let fast = -(0.5 * gamma + lambda);
    let slow = omega_sq / fast;
    let (es, ef) = ((slow * dt).exp(), (fast * dt).exp());
    (0.5 * (es + ef), (es - ef) / (2.0 * lambda))
}

/// Returns (e^{-γt/2}·cos(μt), e^{-γt/2}·sin(μt)/μ).
fn circular(gamma: f64, mu: f64, dt: f64) -> (f64, f64) {
    let x = mu * dt;
    let decay = (-0.5 * gamma * dt).exp();
    (decay * x.cos(), decay * dt * sinc(x))
}

/// D = (φ(r_slow) - φ(r_fast)) / (r_slow - r_fast), φ(r) = (e^{r·dt} - 1)/r.
fn two_root_step(gamma: f64, lambda: f64, omega_sq: f64, dt: f64) -> f64 {
    let fast = -(0.5 * gamma + lambda);
    let slow = omega_sq / fast;
    let phi = |r: f64| if r == 0.0 { dt } else { (r * dt).exp_m1() / r };
    (phi(slow) - phi(fast)) / (slow - fast)
}

fn sinhc(x: f64) -> f64 {
    if x.abs() < 1e-4 {
        1.0 + x * x / 6.0
    } else {
        x.sinh() / x
    }
}

fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-4 {
        1.0 - x * x / 6.0
    } else {
        x.sin() / x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference responses from the underdamped closed form, valid for ω² > γ²/4.
    fn underdamped(gamma: f64, omega_sq: f64, t: f64) -> (f64, f64) {
        let mu = (omega_sq - 0.25 * gamma * gamma).sqrt();
        let decay = (-0.5 * gamma * t).exp();
        let h = decay * (mu * t).sin() / mu;
        let d = (1.0 - decay * ((mu * t).cos() + 0.5 * gamma * (mu * t).sin() / mu)) / omega_sq;
        (h, d)
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn series_matches_the_underdamped_closed_form() {
        let (gamma, omega_sq, dt) = (5.0, 900.0, 1e-3);
        let p = Propagator::new(gamma, omega_sq, dt);
        let (h, d) = underdamped(gamma, omega_sq, dt);
        assert!(close(p.impulse, h, 1e-12), "{} vs {h}", p.impulse);
        assert!(close(p.step, d, 1e-9), "{} vs {d}", p.step);
    }

    #[test]
    fn circular_branch_matches_the_underdamped_closed_form() {
        let (gamma, omega_sq, dt) = (5.0, 900.0, 0.05);
        let p = Propagator::new(gamma, omega_sq, dt);
        let (h, d) = underdamped(gamma, omega_sq, dt);
        assert!(close(p.impulse, h, 1e-12), "{} vs {h}", p.impulse);
        assert!(close(p.step, d, 1e-12), "{} vs {d}", p.step);
    }

    #[test]
    fn without_restoring_term_responses_are_pure_decay() {
        for dt in [1e-4, 0.05, 0.3, 3.0] {
            let gamma = 5.0;
            let p = Propagator::new(gamma, 0.0, dt);
            let h = -(-gamma * dt).exp_m1() / gamma;
            let d = (dt - h) / gamma;
            assert!(close(p.impulse, h, 1e-12), "dt {dt}: {} vs {h}", p.impulse);
            assert!(close(p.step, d, 1e-10), "dt {dt}: {} vs {d}", p.step);
        }
    }

    #[test]
    fn responses_are_continuous_across_branch_boundaries() {
        let straddle = |gamma: f64, omega_sq: f64, dt: f64| {
            let below = Propagator::new(gamma, omega_sq, dt * (1.0 - 1e-10));
            let above = Propagator::new(gamma, omega_sq, dt * (1.0 + 1e-10));
            assert!(close(below.impulse, above.impulse, 1e-8), "{below:?} vs {above:?}");
            assert!(close(below.step, above.step, 1e-8), "{below:?} vs {above:?}");
        };

        // series limit: (γ + ω)·dt = 0.5
        straddle(4.0, 1.0, 0.1);
        // hyperbolic split: λ·dt = 0.5
        straddle(4.0, 1.0, 0.5 / 3.0_f64.sqrt());
        // direct step limit: ω²·dt² = 0.01
        straddle(40.0, 1.0, 0.1);

        // critical damping, approached from both sides
        let over = Propagator::new(4.0, 4.0 - 1e-9, 0.5);
        let under = Propagator::new(4.0, 4.0 + 1e-9, 0.5);
        assert!(close(over.impulse, under.impulse, 1e-8), "{over:?} vs {under:?}");
        assert!(close(over.step, under.step, 1e-8), "{over:?} vs {under:?}");
    }

    #[test]
    fn tiny_rotation_does_not_lose_the_step_response() {
        let still = Propagator::new(5.0, 0.0, 0.3);
        let slow = Propagator::new(5.0, 1e-10, 0.3);
        assert!((still.step - slow.step).abs() < 1e-11, "{still:?} vs {slow:?}");
        assert!((still.impulse - slow.impulse).abs() < 1e-11);
    }

    #[test]
    fn impulse_is_the_derivative_of_the_step_response() {
        let (gamma, omega_sq) = (3.0, 2.0);
        for t in [0.02, 0.4, 1.5] {
            let eps = 1e-6;
            let plus = Propagator::new(gamma, omega_sq, t + eps).step;
            let minus = Propagator::new(gamma, omega_sq, t - eps).step;
            let derivative = (plus - minus) / (2.0 * eps);
            let h = Propagator::new(gamma, omega_sq, t).impulse;
            assert!(close(derivative, h, 1e-6), "t {t}: {derivative} vs {h}");
        }
    }
}
