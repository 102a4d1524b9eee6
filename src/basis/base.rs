use ndarray::{Array1, Array2, ArrayView1};

use crate::errors::ChebError;

use super::order::DerivativeOrder;

///
/// A basis of `len()` functions interpolating through `len()` nodes. Values
/// sampled at the nodes are turned into coefficients with `filter`, and the
/// interpolant (or its derivative) is recovered with `interpolate`.
///
pub trait LinearBasis
{
    fn len(&self) -> usize;
    fn nodes(&self) -> ArrayView1<'_, f64>;
    fn eval(&self, x: &[f64], order: DerivativeOrder) -> Array2<f64>;
    fn filter(&self, values: &[f64]) -> Result<Array1<f64>, ChebError>;

    fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    /// Evaluate the interpolant with `coefficients` at `x`.
    fn interpolate(&self, coefficients: &[f64], x: &[f64], order: DerivativeOrder) -> Result<Array1<f64>, ChebError>
    {
        if coefficients.len() != self.len()
        {
            return Err(ChebError::NumberOfPointsAndValuesMismatch);
        }
        Ok(self.eval(x, order).dot(&ArrayView1::from(coefficients)))
    }

    /// Sample `f` at the nodes and return the interpolation coefficients.
    fn fit<F: Fn(f64) -> f64>(&self, f: F) -> Result<Array1<f64>, ChebError>
    where Self: Sized
    {
        let values: Vec<f64> = self.nodes().iter().map(|&x| f(x)).collect();
        self.filter(&values)
    }
}
