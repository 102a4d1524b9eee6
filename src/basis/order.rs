use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::errors::ChebError;

/// Derivative order of a basis evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivativeOrder
{
    /// The basis functions themselves.
    #[default]
    Value,
    /// First derivative of the basis functions.
    First,
}

impl DerivativeOrder
{
    pub fn as_u32(&self) -> u32
    {
        match self
        {
            DerivativeOrder::Value => 0,
            DerivativeOrder::First => 1,
        }
    }
}

impl TryFrom<u32> for DerivativeOrder
{
    type Error = ChebError;

    fn try_from(order: u32) -> Result<Self, Self::Error> {
        match order
        {
            0 => Ok(DerivativeOrder::Value),
            1 => Ok(DerivativeOrder::First),
            _ => Err(ChebError::DerivativeNotImplemented(order)),
        }
    }
}

///
/// A full evaluation request: either a single derivative order, giving an
/// `N x m` result, or an ordered batch of orders stacked along a trailing
/// axis, giving `N x m x k`.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orders
{
    Single(DerivativeOrder),
    Batch(Vec<DerivativeOrder>),
}

impl Default for Orders
{
    fn default() -> Self {
        Orders::Single(DerivativeOrder::Value)
    }
}

impl From<DerivativeOrder> for Orders
{
    fn from(value: DerivativeOrder) -> Self {
        Orders::Single(value)
    }
}

impl From<Vec<DerivativeOrder>> for Orders
{
    fn from(value: Vec<DerivativeOrder>) -> Self {
        Orders::Batch(value)
    }
}

impl TryFrom<u32> for Orders
{
    type Error = ChebError;

    fn try_from(order: u32) -> Result<Self, Self::Error> {
        Ok(Orders::Single(DerivativeOrder::try_from(order)?))
    }
}

impl TryFrom<&[u32]> for Orders
{
    type Error = ChebError;

    fn try_from(orders: &[u32]) -> Result<Self, Self::Error> {
        let orders = orders.iter().map(|&o| DerivativeOrder::try_from(o)).collect::<Result<Vec<_>, _>>()?;
        Ok(Orders::Batch(orders))
    }
}

/// Result of evaluating a basis for an [`Orders`] request.
#[derive(Clone, Debug, PartialEq)]
pub enum BasisValues
{
    Matrix(Array2<f64>),
    Stack(Array3<f64>),
}

impl BasisValues
{
    pub fn shape(&self) -> &[usize]
    {
        match self
        {
            BasisValues::Matrix(values) => values.shape(),
            BasisValues::Stack(values) => values.shape(),
        }
    }

    pub fn into_matrix(self) -> Option<Array2<f64>>
    {
        match self
        {
            BasisValues::Matrix(values) => Some(values),
            BasisValues::Stack(_) => None,
        }
    }

    pub fn into_stack(self) -> Option<Array3<f64>>
    {
        match self
        {
            BasisValues::Matrix(_) => None,
            BasisValues::Stack(values) => Some(values),
        }
    }
}

#[test]
fn test_integer_orders()
{
    assert_eq!(DerivativeOrder::try_from(0_u32), Ok(DerivativeOrder::Value));
    assert_eq!(DerivativeOrder::try_from(1_u32), Ok(DerivativeOrder::First));
    assert_eq!(DerivativeOrder::try_from(2_u32), Err(ChebError::DerivativeNotImplemented(2)));
    assert_eq!(Orders::try_from(7_u32), Err(ChebError::DerivativeNotImplemented(7)));
    assert_eq!(Orders::default(), Orders::Single(DerivativeOrder::Value));
}

#[test]
fn test_batch_orders_reject_unsupported_member()
{
    let orders = Orders::try_from(&[0_u32, 1, 0][..]).unwrap();
    assert_eq!(orders, Orders::Batch(vec![DerivativeOrder::Value, DerivativeOrder::First, DerivativeOrder::Value]));
    assert_eq!(Orders::try_from(&[1_u32, 2][..]), Err(ChebError::DerivativeNotImplemented(2)));
    for order in [DerivativeOrder::Value, DerivativeOrder::First]
    {
        assert_eq!(DerivativeOrder::try_from(order.as_u32()), Ok(order));
    }
}
