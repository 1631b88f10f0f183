pub mod board;
pub mod creature;
