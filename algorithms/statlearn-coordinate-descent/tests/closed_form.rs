use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use statlearn::linalg::solve_spd;
use statlearn::prelude::*;
use statlearn_coordinate_descent::CoordinateDescentParams;
use statlearn_datasets::generate::linear_response;

/// `(XᵀX + penalty I)⁻¹ Xᵀy`
fn closed_form(x: &Array2<f64>, y: &Array1<f64>, penalty: f64) -> Array1<f64> {
    let mut gram = x.t().dot(x);
    gram.diag_mut().mapv_inplace(|d| d + penalty);
    solve_spd(&gram, &x.t().dot(y)).unwrap()
}

fn sample() -> Dataset<f64, f64> {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    linear_response(150, &array![2.0, -1.0, 0.5, 3.0], 0.0, 0.2, &mut rng)
}

#[test]
fn matches_least_squares_without_penalty() {
    let ds = sample();
    let reference = closed_form(ds.records(), ds.targets(), 0.);

    let model = CoordinateDescentParams::new()
        .tolerance(1e-8)
        .fit(&ds)
        .unwrap();

    assert!(model.converged());
    assert_abs_diff_eq!(model.params(), &reference, epsilon = 1e-4);
}

#[test]
fn matches_ridge_with_penalty() {
    let ds = sample();

    for &penalty in &[0.1, 1., 10., 100.] {
        let reference = closed_form(ds.records(), ds.targets(), penalty);
        let model = CoordinateDescentParams::new()
            .penalty(penalty)
            .tolerance(1e-8)
            .fit(&ds)
            .unwrap();

        assert!(model.converged());
        assert_abs_diff_eq!(model.params(), &reference, epsilon = 1e-4);
    }
}

#[test]
fn default_tolerance_converges_close_to_the_solution() {
    let ds = sample();
    let reference = closed_form(ds.records(), ds.targets(), 1.);

    let model = CoordinateDescentParams::new().penalty(1.).fit(&ds).unwrap();

    assert!(model.converged());
    assert!(model.n_iterations() < 1000);
    assert_abs_diff_eq!(model.params(), &reference, epsilon = 1e-3);
}

#[test]
fn iteration_ceiling_returns_best_estimate() {
    // strongly correlated columns make every sweep a small step
    let x = array![[1., 0.99], [0.99, 1.], [1., 1.], [0.5, 0.49], [0.2, 0.21]];
    let y = x.dot(&array![1., -1.]);
    let ds = Dataset::new(x, y);

    let model = CoordinateDescentParams::new()
        .max_iterations(3)
        .fit(&ds)
        .unwrap();

    assert!(!model.converged());
    assert_eq!(model.n_iterations(), 3);
    assert!(model.params().iter().all(|w: &f64| w.is_finite()));
    assert!(matches!(
        model.check_converged(),
        Err(Error::NotConverged { iterations: 3 })
    ));
}

#[test]
fn prediction_is_the_linear_combination() {
    let ds = sample();
    let model = CoordinateDescentParams::new().penalty(0.5).fit(&ds).unwrap();

    let prediction: Array1<f64> = model.predict(ds.records()).unwrap();
    assert_abs_diff_eq!(prediction, ds.records().dot(model.params()), epsilon = 1e-12);

    let r2 = prediction.r2(ds.targets()).unwrap();
    assert!(r2 > 0.9);
}

#[test]
fn tolerance_bounds_the_step_not_the_error() {
    // two nearly collinear columns
    let x = array![[1., 1.02], [2., 1.97], [3., 3.01], [4., 4.03], [5., 4.98]];
    let y = array![1., 0., 2., 1., 3.];
    let reference = closed_form(&x, &y, 0.);
    let ds = Dataset::new(x, y);

    let model = CoordinateDescentParams::new().fit(&ds).unwrap();

    assert!(model.converged());
    assert!(model.n_iterations() <= 5);
    let largest = model.params().fold(1f64, |acc: f64, w: &f64| acc.max(w.abs()));
    assert!(model.max_change() <= 1e-4 * largest);
    // the last step was tiny but the coefficients are nowhere near least squares
    let error = (model.params() - &reference)
        .mapv(f64::abs)
        .fold(0f64, |acc: f64, &e| acc.max(e));
    assert!(error > 1.);
}
