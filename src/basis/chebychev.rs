use std::fmt::Display;

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::algorithms::recurrence::{evaluate_batch, evaluate_order, evaluate_orders};
use crate::algorithms::solve::{solve, solve_columns};
use crate::errors::ChebError;
use crate::one_dimensional_nodes::{chebychev_nodes, map_to_reference};
use crate::serialization::{read_basis, write_basis, SerializationFormat, StoredBasis};

use super::base::LinearBasis;
use super::order::{BasisValues, DerivativeOrder, Orders};

///
/// Chebyshev interpolation basis on (`min`,`max`) with `n` nodes and `n`
/// basis functions `T_0..T_{n-1}`. The nodes are the Chebyshev extrema mapped
/// onto the interval; `phi` holds the basis functions evaluated at the nodes,
/// one node per row.
///
/// Requires `n >= 2` and `min < max`; neither is validated here. Only
/// `(min, max, n)` is serialized and deserializing rebuilds the basis.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredBasis", into = "StoredBasis")]
pub struct ChebychevBasis
{
    min: f64,
    max: f64,
    n: usize,
    nodes: Array1<f64>,
    phi: Array2<f64>,
}

impl Default for ChebychevBasis
{
    fn default() -> Self {
        Self::new(0.0, 1.0, 10)
    }
}

impl ChebychevBasis
{
    pub fn new(min: f64, max: f64, n: usize) -> Self
    {
        tracing::debug!(min, max, n, "building Chebyshev basis");
        let nodes = chebychev_nodes(min, max, n);
        let reference: Vec<f64> = nodes.iter().map(|&x| map_to_reference(x, min, max)).collect();
        let phi = evaluate_order(&reference, n, DerivativeOrder::Value, 1.0);
        Self { min, max, n, nodes: Array1::from(nodes), phi }
    }

    pub fn min(&self) -> f64
    {
        self.min
    }

    pub fn max(&self) -> f64
    {
        self.max
    }

    /// Number of nodes, which is also the number of basis functions.
    pub fn len(&self) -> usize
    {
        self.n
    }

    pub fn nodes(&self) -> ArrayView1<'_, f64>
    {
        self.nodes.view()
    }

    /// Basis matrix at the nodes (`n x n`).
    pub fn phi(&self) -> ArrayView2<'_, f64>
    {
        self.phi.view()
    }

    fn to_reference(&self, x: &[f64]) -> Vec<f64>
    {
        x.iter().map(|&xi| map_to_reference(xi, self.min, self.max)).collect()
    }

    /// Chain rule factor of the map from (`min`,`max`) to (-1,1).
    #[inline]
    fn derivative_scale(&self) -> f64
    {
        2.0 / (self.max - self.min)
    }

    ///
    /// Evaluate all basis functions (or their first derivatives) at `x`.
    /// Returns an `N x n` matrix, one row per point.
    ///
    pub fn eval(&self, x: &[f64], order: DerivativeOrder) -> Array2<f64>
    {
        evaluate_order(&self.to_reference(x), self.n, order, self.derivative_scale())
    }

    /// Evaluate all basis functions at a single point `x`.
    pub fn eval_scalar(&self, x: f64, order: DerivativeOrder) -> Array1<f64>
    {
        self.eval(&[x], order).row(0).to_owned()
    }

    ///
    /// Evaluate every order in `orders` at `x`, stacked along the last axis
    /// of an `N x n x orders.len()` array.
    ///
    pub fn eval_batch(&self, x: &[f64], orders: &[DerivativeOrder]) -> Array3<f64>
    {
        evaluate_batch(&self.to_reference(x), self.n, orders, self.derivative_scale())
    }

    pub fn eval_orders(&self, x: &[f64], orders: &Orders) -> BasisValues
    {
        evaluate_orders(&self.to_reference(x), self.n, orders, self.derivative_scale())
    }

    /// Evaluate with an integer derivative order. Orders above one are not implemented.
    pub fn eval_order(&self, x: &[f64], order: u32) -> Result<Array2<f64>, ChebError>
    {
        Ok(self.eval(x, DerivativeOrder::try_from(order)?))
    }

    ///
    /// Interpolation coefficients for `values` sampled at this basis' nodes,
    /// in node order. Values taken anywhere else give meaningless coefficients.
    ///
    pub fn filter(&self, values: &[f64]) -> Result<Array1<f64>, ChebError>
    {
        tracing::debug!(n = self.n, "solving for interpolation coefficients");
        solve(self.phi.view(), ArrayView1::from(values))
    }

    /// Interpolation coefficients for each column of `values` (`n x k`).
    pub fn filter_columns(&self, values: ArrayView2<f64>) -> Result<Array2<f64>, ChebError>
    {
        tracing::debug!(n = self.n, columns = values.ncols(), "solving for interpolation coefficients");
        solve_columns(self.phi.view(), values)
    }

    pub fn to_bytes(&self, format: SerializationFormat) -> Result<Vec<u8>, ChebError>
    {
        write_basis(self, format)
    }

    pub fn from_bytes(bytes: &[u8], format: SerializationFormat) -> Result<Self, ChebError>
    {
        read_basis(bytes, format)
    }
}

impl LinearBasis for ChebychevBasis
{
    fn len(&self) -> usize {
        self.n
    }

    fn nodes(&self) -> ArrayView1<'_, f64> {
        self.nodes.view()
    }

    fn eval(&self, x: &[f64], order: DerivativeOrder) -> Array2<f64> {
        ChebychevBasis::eval(self, x, order)
    }

    fn filter(&self, values: &[f64]) -> Result<Array1<f64>, ChebError> {
        ChebychevBasis::filter(self, values)
    }
}

impl Display for ChebychevBasis
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChebychevBasis(min={}, max={}, n={})", self.min, self.max, self.n)
    }
}

#[cfg(test)]
mod tests
{
    use ndarray::{array, Array1, Axis};

    use super::*;
    use crate::algorithms::recurrence::derivative;

    #[test]
    fn test_three_node_basis()
    {
        let basis = ChebychevBasis::new(0.0, 1.0, 3);
        assert_eq!(basis.nodes(), array![0.0, 0.5, 1.0]);
        assert_eq!(basis.phi(), array![[1.0, -1.0, 1.0], [1.0, 0.0, -1.0], [1.0, 1.0, 1.0]]);
        assert_eq!(basis.to_string(), "ChebychevBasis(min=0, max=1, n=3)");
        assert!(!basis.is_empty());
    }

    #[test]
    fn test_nodes_cover_interval()
    {
        for n in 2..25
        {
            let basis = ChebychevBasis::new(-2.0, 3.0, n);
            let nodes = basis.nodes();
            assert_eq!(nodes.len(), n);
            assert_eq!(nodes[0], -2.0);
            assert_eq!(nodes[n - 1], 3.0);
            assert!(nodes.iter().all(|&x| (-2.0..=3.0).contains(&x)));
        }
    }

    #[test]
    fn test_eval_at_nodes_reproduces_phi()
    {
        let basis = ChebychevBasis::new(1.5, 4.0, 9);
        let nodes = basis.nodes().to_vec();
        assert_eq!(basis.eval(&nodes, DerivativeOrder::Value), basis.phi());
        assert_eq!(basis.eval_order(&nodes, 0).unwrap(), basis.phi());
    }

    #[test]
    fn test_filter_inverts_phi()
    {
        let basis = ChebychevBasis::default();
        let c = Array1::from_shape_fn(basis.len(), |i| (i as f64 * 0.7).sin() + 0.1);
        let sampled = basis.phi().dot(&c);
        let recovered = basis.filter(sampled.as_slice().unwrap()).unwrap();
        for (r, e) in recovered.iter().zip(c.iter())
        {
            assert!((r - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_filter_columns()
    {
        let basis = ChebychevBasis::new(0.0, 2.0, 6);
        let c = Array2::from_shape_fn((6, 3), |(i, j)| (i + 2 * j) as f64 - 4.0);
        let recovered = basis.filter_columns(basis.phi().dot(&c).view()).unwrap();
        assert_eq!(recovered.dim(), (6, 3));
        for (r, e) in recovered.iter().zip(c.iter())
        {
            assert!((r - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_filter_rejects_wrong_length()
    {
        let basis = ChebychevBasis::new(0.0, 1.0, 4);
        assert_eq!(basis.filter(&[1.0, 2.0, 3.0]), Err(ChebError::NumberOfPointsAndValuesMismatch));
    }

    #[test]
    fn test_first_derivative_on_reference_interval()
    {
        let basis = ChebychevBasis::new(-1.0, 1.0, 4);
        let x = [-0.6, 0.0, 0.3, 0.9];
        let dt = basis.eval(&x, DerivativeOrder::First);
        for (j, &xi) in x.iter().enumerate()
        {
            assert_eq!(dt[[j, 0]], 0.0);
            assert!((dt[[j, 1]] - 1.0).abs() < 1e-14);
            assert!((dt[[j, 2]] - 4.0 * xi).abs() < 1e-14);
            assert!((dt[[j, 3]] - (12.0 * xi * xi - 3.0)).abs() < 1e-13);
        }
        assert_eq!(dt[[1, 2]], 0.0);
    }

    #[test]
    fn test_first_derivative_applies_chain_rule()
    {
        let basis = ChebychevBasis::new(2.0, 5.0, 5);
        let x = [2.0, 3.1, 4.75];
        let reference: Vec<f64> = x.iter().map(|&xi| -1.0 + (xi - 2.0) / 3.0 * 2.0).collect();
        let expected = derivative(&reference, 5) * (2.0 / 3.0);
        let dt = basis.eval(&x, DerivativeOrder::First);
        for (a, b) in dt.iter().zip(expected.iter())
        {
            assert!((a - b).abs() < 1e-13);
        }
    }

    #[test]
    fn test_scalar_matches_first_row()
    {
        let basis = ChebychevBasis::new(0.0, 1.0, 7);
        for order in [DerivativeOrder::Value, DerivativeOrder::First]
        {
            let scalar = basis.eval_scalar(0.5, order);
            assert_eq!(scalar.len(), 7);
            assert_eq!(scalar, basis.eval(&[0.5], order).row(0));
        }
    }

    #[test]
    fn test_unsupported_order()
    {
        let basis = ChebychevBasis::new(0.0, 1.0, 5);
        assert_eq!(basis.eval_order(&[0.1, 0.2], 2), Err(ChebError::DerivativeNotImplemented(2)));
        assert_eq!(basis.eval_order(&[], 3), Err(ChebError::DerivativeNotImplemented(3)));
    }

    #[test]
    fn test_batch_is_scaled_like_single_orders()
    {
        let basis = ChebychevBasis::new(-4.0, 0.0, 6);
        let x = [-3.9, -2.0, -0.5];
        let stacked = basis.eval_batch(&x, &[DerivativeOrder::First, DerivativeOrder::Value, DerivativeOrder::First]);
        assert_eq!(stacked.shape(), &[3, 6, 3]);
        assert_eq!(stacked.index_axis(Axis(2), 0), basis.eval(&x, DerivativeOrder::First));
        assert_eq!(stacked.index_axis(Axis(2), 1), basis.eval(&x, DerivativeOrder::Value));
        assert_eq!(stacked.index_axis(Axis(2), 2), basis.eval(&x, DerivativeOrder::First));

        let orders = Orders::try_from(&[0_u32, 1][..]).unwrap();
        let values = basis.eval_orders(&x, &orders);
        assert_eq!(values.shape(), &[3, 6, 2]);
        let single = basis.eval_orders(&x, &Orders::default());
        assert_eq!(single.into_matrix(), Some(basis.eval(&x, DerivativeOrder::Value)));
    }

    #[test]
    fn test_fit_and_interpolate_polynomial()
    {
        // degree three is reproduced exactly by six nodes
        let f = |x: f64| x * x * x - 2.0 * x + 0.5;
        let df = |x: f64| 3.0 * x * x - 2.0;
        let basis = ChebychevBasis::new(0.0, 2.0, 6);
        let coefficients = basis.fit(f).unwrap();
        let x = [0.0, 0.13, 0.8, 1.41, 2.0];
        let values = basis.interpolate(coefficients.as_slice().unwrap(), &x, DerivativeOrder::Value).unwrap();
        let derivatives = basis.interpolate(coefficients.as_slice().unwrap(), &x, DerivativeOrder::First).unwrap();
        for (j, &xi) in x.iter().enumerate()
        {
            assert!((values[j] - f(xi)).abs() < 1e-12);
            assert!((derivatives[j] - df(xi)).abs() < 1e-11);
        }
        assert_eq!(basis.interpolate(&[1.0], &x, DerivativeOrder::Value), Err(ChebError::NumberOfPointsAndValuesMismatch));
    }

    #[test]
    fn test_serialization_roundtrip()
    {
        let basis = ChebychevBasis::new(-1.0, 3.0, 8);
        for format in [SerializationFormat::Json, SerializationFormat::BitcodeLz4]
        {
            let bytes = basis.to_bytes(format).unwrap();
            let restored = ChebychevBasis::from_bytes(&bytes, format).unwrap();
            assert_eq!(restored.len(), 8);
            assert_eq!(restored.nodes(), basis.nodes());
            assert_eq!(restored.phi(), basis.phi());
        }
    }

    #[test]
    fn test_from_bytes_derives_nodes_from_size()
    {
        let json = String::from_utf8(ChebychevBasis::new(0.0, 1.0, 3).to_bytes(SerializationFormat::Json).unwrap()).unwrap();
        let restored = ChebychevBasis::from_bytes(json.replace("\"n\":3", "\"n\":5").as_bytes(), SerializationFormat::Json).unwrap();
        assert_eq!(restored.nodes().len(), restored.len());
        assert_eq!(restored.phi().dim(), (5, 5));
        assert_eq!(restored.eval(&[0.5], DerivativeOrder::Value).ncols(), 5);

        let flattened = json.replace("\"max\":1.0", "\"max\":0.0");
        assert_eq!(ChebychevBasis::from_bytes(flattened.as_bytes(), SerializationFormat::Json), Err(ChebError::DeserializationFailed));
    }

    #[test]
    fn test_basis_shared_across_threads()
    {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChebychevBasis>();

        let basis = ChebychevBasis::new(0.0, 1.0, 5);
        let expected = basis.eval(&[0.25, 0.75], DerivativeOrder::First);
        std::thread::scope(|s|
        {
            for _ in 0..4
            {
                s.spawn(|| assert_eq!(basis.eval(&[0.25, 0.75], DerivativeOrder::First), expected));
            }
        });
    }
}
