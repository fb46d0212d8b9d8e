//! Guarded linear solves
//!
//! The closed-form and reweighted least-squares solvers both end up with a symmetric positive
//! (semi-)definite system `A x = b`. It is factorised with a Cholesky decomposition whose pivots
//! are checked against a tolerance relative to the largest diagonal entry, so rank deficiency is
//! reported as [`Error::SingularMatrix`] instead of producing huge or non-finite coefficients.
use linfa_linalg::triangular::{SolveTriangularInplace, UPLO};
use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};

use crate::error::{Error, Result};
use crate::Float;

/// Pivots not larger than this are treated as zero
fn pivot_tolerance<F: Float>(dimension: usize, max_diagonal: F) -> F {
    F::cast(100 * dimension.max(1)) * F::epsilon() * max_diagonal
}

/// Lower triangular Cholesky factor `L` with `A = L Lᵀ`
///
/// Only the lower triangle of `a` is read.
pub fn cholesky<F: Float>(a: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
    let (n, ncols) = a.dim();
    if n != ncols {
        return Err(Error::Parameters(format!(
            "expected a square matrix, got {}x{}",
            n, ncols
        )));
    }

    let max_diagonal = a.diag().iter().fold(F::zero(), |acc, x| acc.max(x.abs()));
    let tolerance = pivot_tolerance(n, max_diagonal);

    let mut l = Array2::zeros((n, n));
    for j in 0..n {
        let pivot = {
            let row = l.slice(s![j, ..j]);
            a[(j, j)] - row.dot(&row)
        };
        // also catches NaN
        if !(pivot > tolerance) {
            return Err(Error::SingularMatrix {
                pivot: j,
                dimension: n,
            });
        }
        let pivot = pivot.sqrt();
        l[(j, j)] = pivot;

        for i in j + 1..n {
            let off_diagonal = a[(i, j)] - l.slice(s![i, ..j]).dot(&l.slice(s![j, ..j]));
            l[(i, j)] = off_diagonal / pivot;
        }
    }

    Ok(l)
}

/// Solve `A x = b` for a symmetric positive definite `A`
pub fn solve_spd<F: Float>(
    a: &ArrayBase<impl Data<Elem = F>, Ix2>,
    b: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<Array1<F>> {
    if a.nrows() != b.len() {
        return Err(Error::MismatchedShapes(a.nrows(), b.len()));
    }

    let l = cholesky(a)?;
    let mut x = b.to_owned().insert_axis(Axis(1));
    l.solve_triangular_inplace(&mut x, UPLO::Lower)?;
    l.t().solve_triangular_inplace(&mut x, UPLO::Upper)?;

    Ok(x.remove_axis(Axis(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn factorises_spd_matrix() {
        let a = array![[4., 12., -16.], [12., 37., -43.], [-16., -43., 98.]];
        let l = cholesky(&a).unwrap();

        assert_abs_diff_eq!(
            l,
            array![[2., 0., 0.], [6., 1., 0.], [-8., 5., 3.]],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(l.dot(&l.t()), a, epsilon = 1e-10);
    }

    #[test]
    fn solves_spd_system() {
        let a = array![[2., 1.], [1., 3.]];
        let b = array![3., 5.];
        let x = solve_spd(&a, &b).unwrap();

        assert_abs_diff_eq!(x, array![0.8, 1.4], epsilon = 1e-12);
        assert_abs_diff_eq!(a.dot(&x), b, epsilon = 1e-12);
    }

    #[test]
    fn rank_deficient_gram_is_singular() {
        // third column is the sum of the first two
        let x = array![[1., 2., 3.], [2., 0., 2.], [0., 1., 1.], [3., 5., 8.]];
        let gram = x.t().dot(&x);

        assert!(matches!(
            solve_spd(&gram, &array![1., 1., 1.]),
            Err(Error::SingularMatrix { pivot: 2, .. })
        ));
    }

    #[test]
    fn zero_matrix_is_singular() {
        let a = Array2::<f64>::zeros((2, 2));
        assert!(matches!(
            cholesky(&a),
            Err(Error::SingularMatrix { pivot: 0, .. })
        ));
    }

    #[test]
    fn rejects_non_square_matrix() {
        let a = Array2::<f64>::zeros((2, 3));
        assert!(matches!(cholesky(&a), Err(Error::Parameters(_))));
    }
}
