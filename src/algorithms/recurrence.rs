use ndarray::{Array2, Array3, ArrayView1, ArrayViewMut1, Axis, Zip};
use serde::{Deserialize, Serialize};

use crate::basis::order::{BasisValues, DerivativeOrder, Orders};

/// Number of evaluation points above which rows are filled in parallel.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Family of Chebyshev polynomials produced by the recurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind
{
    /// `T_k`, with `T_1(x) = x`.
    #[default]
    First,
    /// `U_k`, with `U_1(x) = 2x`.
    Second,
}

impl Kind
{
    /// Coefficient of `x` in the degree one polynomial.
    #[inline]
    pub fn factor(&self) -> f64
    {
        match self
        {
            Kind::First => 1.0,
            Kind::Second => 2.0,
        }
    }
}

#[inline]
fn fill_row(x: f64, factor: f64, mut row: ArrayViewMut1<f64>)
{
    let m = row.len();
    if m == 0
    {
        return;
    }
    row[0] = 1.0;
    if m > 1
    {
        row[1] = factor * x;
    }
    for i in 2..m
    {
        row[i] = 2.0 * x * row[i - 1] - row[i - 2];
    }
}

///
/// Evaluate the first `m` Chebyshev polynomials of the given `kind` at every
/// point of `x` (already in the reference interval (-1,1)). Row `j` of the
/// `N x m` result holds the polynomials at `x[j]`.
///
pub fn chebychev(x: &[f64], m: usize, kind: Kind) -> Array2<f64>
{
    let mut t = Array2::zeros((x.len(), m));
    let factor = kind.factor();
    let zip = Zip::from(t.rows_mut()).and(ArrayView1::from(x));
    if x.len() > PARALLEL_THRESHOLD
    {
        zip.par_for_each(|row, &xi| fill_row(xi, factor, row));
    }
    else
    {
        zip.for_each(|row, &xi| fill_row(xi, factor, row));
    }
    t
}

/// Chebyshev polynomials of the second kind, `U_0..U_{m-1}`.
pub fn chebychev2(x: &[f64], m: usize) -> Array2<f64>
{
    chebychev(x, m, Kind::Second)
}

///
/// First derivative of `T_0..T_{m-1}` with respect to the reference
/// coordinate, using `T_t'(x) = t U_{t-1}(x)`.
///
pub fn derivative(x: &[f64], m: usize) -> Array2<f64>
{
    let u = chebychev2(x, m);
    let mut dt = Array2::zeros((x.len(), m));
    for t in 1..m
    {
        let scale = t as f64;
        dt.column_mut(t).zip_mut_with(&u.column(t - 1), |d, &ui| *d = scale * ui);
    }
    dt
}

/// Evaluate a single order; first derivatives are multiplied by `derivative_scale`.
pub(crate) fn evaluate_order(x: &[f64], m: usize, order: DerivativeOrder, derivative_scale: f64) -> Array2<f64>
{
    match order
    {
        DerivativeOrder::Value => chebychev(x, m, Kind::First),
        DerivativeOrder::First =>
        {
            let mut dt = derivative(x, m);
            if derivative_scale != 1.0
            {
                dt.mapv_inplace(|v| v * derivative_scale);
            }
            dt
        }
    }
}

/// Evaluate each order independently and stack the results along a trailing axis.
pub(crate) fn evaluate_batch(x: &[f64], m: usize, orders: &[DerivativeOrder], derivative_scale: f64) -> Array3<f64>
{
    let mut values = Array3::zeros((x.len(), m, orders.len()));
    for (k, &order) in orders.iter().enumerate()
    {
        values.index_axis_mut(Axis(2), k).assign(&evaluate_order(x, m, order, derivative_scale));
    }
    values
}

pub(crate) fn evaluate_orders(x: &[f64], m: usize, orders: &Orders, derivative_scale: f64) -> BasisValues
{
    match orders
    {
        Orders::Single(order) => BasisValues::Matrix(evaluate_order(x, m, *order, derivative_scale)),
        Orders::Batch(orders) => BasisValues::Stack(evaluate_batch(x, m, orders, derivative_scale)),
    }
}

///
/// Evaluate the first `m` Chebyshev polynomials (or their first derivatives)
/// at reference coordinates `x`. Derivatives are taken with respect to the
/// reference coordinate; no interval scaling is applied here.
///
pub fn chebbase(x: &[f64], m: usize, orders: &Orders) -> BasisValues
{
    evaluate_orders(x, m, orders, 1.0)
}

#[test]
fn test_chebychev_matches_trigonometric_definition()
{
    let x: Vec<f64> = (0..=20).map(|i| -1.0 + 0.1 * i as f64).collect();
    let t = chebychev(&x, 8, Kind::First);
    let u = chebychev2(&x, 8);
    for (j, &xi) in x.iter().enumerate()
    {
        let theta = xi.clamp(-1.0, 1.0).acos();
        for k in 0..8
        {
            assert!((t[[j, k]] - f64::cos(k as f64 * theta)).abs() < 1e-12);
            if theta.sin().abs() > 1e-6
            {
                let expected = f64::sin((k + 1) as f64 * theta) / theta.sin();
                assert!((u[[j, k]] - expected).abs() < 1e-10);
            }
        }
    }
}

#[test]
fn test_chebychev_small_sizes()
{
    let t = chebychev(&[0.3, -0.4], 1, Kind::First);
    assert_eq!(t.shape(), &[2, 1]);
    assert_eq!(t[[0, 0]], 1.0);
    assert_eq!(t[[1, 0]], 1.0);
    assert_eq!(chebychev(&[0.3], 0, Kind::First).shape(), &[1, 0]);
    assert_eq!(chebychev(&[], 4, Kind::First).shape(), &[0, 4]);
}

#[test]
fn test_parallel_fill_matches_serial()
{
    let n = PARALLEL_THRESHOLD + 17;
    let x: Vec<f64> = (0..n).map(|i| -1.0 + 2.0 * i as f64 / (n - 1) as f64).collect();
    let parallel = chebychev(&x, 6, Kind::First);
    for j in [0, 1, n / 2, n - 1]
    {
        let serial = chebychev(&x[j..j + 1], 6, Kind::First);
        assert_eq!(parallel.row(j), serial.row(0));
    }
}

#[test]
fn test_derivative_matches_analytic_polynomials()
{
    // T1' = 1, T2' = 4x, T3' = 12x^2 - 3, T4' = 32x^3 - 16x
    let x = [-0.9, -0.2, 0.0, 0.35, 1.0];
    let dt = derivative(&x, 5);
    for (j, &xi) in x.iter().enumerate()
    {
        assert_eq!(dt[[j, 0]], 0.0);
        assert!((dt[[j, 1]] - 1.0).abs() < 1e-14);
        assert!((dt[[j, 2]] - 4.0 * xi).abs() < 1e-14);
        assert!((dt[[j, 3]] - (12.0 * xi * xi - 3.0)).abs() < 1e-13);
        assert!((dt[[j, 4]] - (32.0 * xi * xi * xi - 16.0 * xi)).abs() < 1e-13);
    }
}

#[test]
fn test_chebbase_is_unscaled()
{
    let x = [-0.5, 0.25];
    let first = chebbase(&x, 4, &Orders::Single(DerivativeOrder::First)).into_matrix().unwrap();
    assert_eq!(first, derivative(&x, 4));

    let stacked = chebbase(&x, 4, &Orders::Batch(vec![DerivativeOrder::Value, DerivativeOrder::First]))
        .into_stack()
        .unwrap();
    assert_eq!(stacked.shape(), &[2, 4, 2]);
    assert_eq!(stacked.index_axis(Axis(2), 0), chebychev(&x, 4, Kind::First));
    assert_eq!(stacked.index_axis(Axis(2), 1), first);
}
