use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::errors::ChebError;

fn to_dmatrix(a: ArrayView2<f64>) -> DMatrix<f64>
{
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

///
/// Solve the dense square system `a * x = b` for every column of `b` using an
/// LU decomposition with partial pivoting.
///
pub fn solve_columns(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<Array2<f64>, ChebError>
{
    if !a.is_square() || a.nrows() != b.nrows()
    {
        return Err(ChebError::NumberOfPointsAndValuesMismatch);
    }
    let rhs = to_dmatrix(b);
    let solution = to_dmatrix(a).lu().solve(&rhs).ok_or(ChebError::SingularBasisMatrix)?;
    Ok(Array2::from_shape_fn(b.dim(), |(i, j)| solution[(i, j)]))
}

/// Solve the dense square system `a * x = b` for a single right-hand side.
pub fn solve(a: ArrayView2<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>, ChebError>
{
    let b = b.insert_axis(ndarray::Axis(1));
    let x = solve_columns(a, b)?;
    Ok(x.column(0).to_owned())
}

#[test]
fn test_solve_small_system()
{
    let a = ndarray::array![[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]];
    let expected = ndarray::array![1.0, -2.0, 0.5];
    let b = a.dot(&expected);
    let x = solve(a.view(), b.view()).unwrap();
    for (xi, ei) in x.iter().zip(expected.iter())
    {
        assert!((xi - ei).abs() < 1e-14);
    }
}

#[test]
fn test_solve_needs_pivoting()
{
    // zero leading entry
    let a = ndarray::array![[0.0, 1.0], [1.0, 0.0]];
    let b = ndarray::array![[3.0, 1.0], [4.0, 2.0]];
    let x = solve_columns(a.view(), b.view()).unwrap();
    assert_eq!(x, ndarray::array![[4.0, 2.0], [3.0, 1.0]]);
}

#[test]
fn test_solve_reports_errors()
{
    let singular = ndarray::array![[1.0, 2.0], [2.0, 4.0]];
    let b = ndarray::array![1.0, 1.0];
    assert_eq!(solve(singular.view(), b.view()), Err(ChebError::SingularBasisMatrix));

    let a = Array2::<f64>::eye(3);
    assert_eq!(solve(a.view(), b.view()), Err(ChebError::NumberOfPointsAndValuesMismatch));
}
