pub mod recurrence;
pub mod solve;
