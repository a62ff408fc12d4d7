//! Banded linear solvers used by cubic spline fitting.
//!
//! Row `i` of a tridiagonal system reads
//! `sub[i]·x[i-1] + diag[i]·x[i] + sup[i]·x[i+1] = rhs[i]`,
//! with `sub[0]` and `sup[n-1]` ignored.
use crate::error::{OperationError, Result};

/// Pivots smaller than this are treated as singular.
const PIVOT_EPS: f64 = 1e-14;

/// Solves a tridiagonal system with the Thomas algorithm.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` on mismatched lengths or an empty
/// system, and `OperationError::Failed` when a pivot vanishes.
pub fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let n = diag.len();
    if n == 0 || sub.len() != n || sup.len() != n || rhs.len() != n {
        return Err(OperationError::InvalidInput(
            "tridiagonal bands and right-hand side must share a non-zero length".to_owned(),
        )
        .into());
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    let mut pivot = diag[0];
    if pivot.abs() < PIVOT_EPS {
        return Err(singular());
    }
    c_prime[0] = sup[0] / pivot;
    d_prime[0] = rhs[0] / pivot;

    for i in 1..n {
        pivot = diag[i] - sub[i] * c_prime[i - 1];
        if pivot.abs() < PIVOT_EPS {
            return Err(singular());
        }
        c_prime[i] = sup[i] / pivot;
        d_prime[i] = (rhs[i] - sub[i] * d_prime[i - 1]) / pivot;
    }

    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i] * x[i + 1];
    }
    Ok(x)
}

/// Solves a cyclic tridiagonal system.
///
/// `corner_top` is the coefficient at row 0, column `n-1` and `corner_bottom`
/// the coefficient at row `n-1`, column 0. Uses the Sherman–Morrison
/// correction on top of two Thomas solves.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` for fewer than 3 unknowns or
/// mismatched lengths, and `OperationError::Failed` for a singular system.
pub fn solve_cyclic_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    corner_top: f64,
    corner_bottom: f64,
    rhs: &[f64],
) -> Result<Vec<f64>> {
    let n = diag.len();
    if n < 3 {
        return Err(OperationError::InvalidInput(
            "cyclic tridiagonal system needs at least 3 unknowns".to_owned(),
        )
        .into());
    }

    let gamma = -diag[0];
    if gamma.abs() < PIVOT_EPS {
        return Err(singular());
    }

    let mut modified = diag.to_vec();
    modified[0] -= gamma;
    modified[n - 1] -= corner_bottom * corner_top / gamma;

    let x = solve_tridiagonal(sub, &modified, sup, rhs)?;

    let mut u = vec![0.0; n];
    u[0] = gamma;
    u[n - 1] = corner_bottom;
    let z = solve_tridiagonal(sub, &modified, sup, &u)?;

    let denom = 1.0 + z[0] + corner_top * z[n - 1] / gamma;
    if denom.abs() < PIVOT_EPS {
        return Err(singular());
    }
    let factor = (x[0] + corner_top * x[n - 1] / gamma) / denom;

    Ok(x.iter().zip(&z).map(|(xi, zi)| xi - factor * zi).collect())
}

fn singular() -> crate::error::TrackError {
    OperationError::Failed("tridiagonal system is singular".to_owned()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn residual(sub: &[f64], diag: &[f64], sup: &[f64], top: f64, bottom: f64, x: &[f64]) -> Vec<f64> {
        let n = diag.len();
        (0..n)
            .map(|i| {
                let prev = if i == 0 { top * x[n - 1] } else { sub[i] * x[i - 1] };
                let next = if i == n - 1 { bottom * x[0] } else { sup[i] * x[i + 1] };
                prev + diag[i] * x[i] + next
            })
            .collect()
    }

    #[test]
    fn thomas_solves_small_system() {
        let sub = [0.0, 1.0, 1.0];
        let diag = [4.0, 4.0, 4.0];
        let sup = [1.0, 1.0, 0.0];
        let rhs = [5.0, 6.0, 5.0];
        let x = solve_tridiagonal(&sub, &diag, &sup, &rhs).unwrap();
        for xi in &x {
            assert!((xi - 1.0).abs() < 1e-12, "x={x:?}");
        }
    }

    #[test]
    fn single_unknown() {
        let x = solve_tridiagonal(&[0.0], &[2.0], &[0.0], &[3.0]).unwrap();
        assert!((x[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn cyclic_matches_dense_product() {
        let sub = [0.0, 1.0, 2.0, 1.0, 0.5];
        let diag = [6.0, 7.0, 8.0, 6.0, 5.0];
        let sup = [1.0, 2.0, 1.0, 0.5, 0.0];
        let (top, bottom) = (1.5, 2.5);
        let rhs = [1.0, -2.0, 3.0, 0.5, 4.0];
        let x = solve_cyclic_tridiagonal(&sub, &diag, &sup, top, bottom, &rhs).unwrap();
        let back = residual(&sub, &diag, &sup, top, bottom, &x);
        for (b, r) in back.iter().zip(&rhs) {
            assert!((b - r).abs() < 1e-10, "got {back:?}, want {rhs:?}");
        }
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = solve_tridiagonal(&[0.0], &[1.0, 2.0], &[0.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn zero_pivot_is_reported() {
        let err = solve_tridiagonal(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert!(!err.is_invalid_input());
    }
}
