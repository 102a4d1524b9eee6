use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChebError
{
    /// Derivatives of order two and higher are not implemented.
    DerivativeNotImplemented(u32),
    NumberOfPointsAndValuesMismatch,
    SingularBasisMatrix,
    LZ4DecompressionFailed,
    SerializationFailed,
    DeserializationFailed,
}
impl std::error::Error for ChebError {}

impl Display for ChebError
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self
        {
            ChebError::DerivativeNotImplemented(order) => write!(f, "Derivative of order {order} not implemented"),
            _ => write!(f, "{:?}", *self),
        }
    }
}

#[test]
fn check_not_implemented_message()
{
    assert_eq!(ChebError::DerivativeNotImplemented(2).to_string(), "Derivative of order 2 not implemented");
    assert_eq!(ChebError::SingularBasisMatrix.to_string(), "SingularBasisMatrix");
}
