pub mod block;
pub mod common;
pub mod grid;
pub mod problem;
pub mod solver;
