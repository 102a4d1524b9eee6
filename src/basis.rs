pub mod base;
pub mod chebychev;
pub mod order;
