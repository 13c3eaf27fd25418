//! Big-M tableau simplex solver for linear programs over non-negative
//! variables.
//!
//! Sign convention: the solver **maximizes** `objective . x`. To minimize,
//! negate the objective coefficients (the optimal objective value then needs
//! its sign restored by the caller).

mod problem;
mod simplex;
mod solution;
mod standard;
mod tableau;

pub use problem::{LinearProgram, ProblemError, Relation};
pub use simplex::{PivotSnapshot, SolveError, Solver};
pub use solution::Solution;
