pub mod error;
pub mod input;
pub mod planner;
pub mod problem;
pub mod schedule;
pub mod solver;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
