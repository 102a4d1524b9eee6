//! One dimensional Chebyshev interpolation bases.
//!
//! A [`ChebychevBasis`] on an interval `(min, max)` with `n` nodes provides
//! the Chebyshev extrema mapped onto the interval, the basis matrix (and its
//! first derivative) at arbitrary points, and interpolation coefficients for
//! values sampled at the nodes.
//!
//! ```
//! use chebbasis::{ChebychevBasis, DerivativeOrder, LinearBasis};
//!
//! let basis = ChebychevBasis::new(0.0, 1.0, 3);
//! assert_eq!(basis.nodes().to_vec(), vec![0.0, 0.5, 1.0]);
//!
//! let coefficients = basis.fit(|x| x * x).unwrap();
//! let y = basis.interpolate(coefficients.as_slice().unwrap(), &[0.25], DerivativeOrder::Value).unwrap();
//! assert!((y[0] - 0.0625).abs() < 1e-14);
//! ```
pub mod algorithms;
pub mod basis;
pub mod errors;
pub mod one_dimensional_nodes;
pub mod serialization;

pub use algorithms::recurrence::{chebbase, chebychev, chebychev2, Kind};
pub use basis::base::LinearBasis;
pub use basis::chebychev::ChebychevBasis;
pub use basis::order::{BasisValues, DerivativeOrder, Orders};
pub use errors::ChebError;
