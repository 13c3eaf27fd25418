use thiserror::Error;

use crate::problem::LinearProgram;
use crate::solution::Solution;
use crate::standard::standardize;
use crate::tableau::Tableau;

/// Big-M simplex solver for [`LinearProgram`]s.
///
/// The objective is maximized; see [`LinearProgram`] for the sign
/// convention. Greater-equal and equality rows get an artificial variable
/// penalized by `big_m` in the cost row, so a single pivot phase drives
/// them out of the basis on the way to the optimum.
pub struct Solver {
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
    /// Penalty on artificial variables. Must exceed any value the optimum
    /// or a reduced cost can reach; the default is a hand-tuned constant,
    /// not a bound proven sufficient for every input.
    big_m: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-8,
            big_m: 1e6,
        }
    }
}

/// Why a solve terminated without an optimum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("objective is unbounded: entering column {column} has no positive coefficient in any row")]
    Unbounded { column: usize },
    #[error("no feasible point satisfies the constraints: artificial variable of row {row} remains basic at {value}")]
    Infeasible { row: usize, value: f64 },
    #[error("no optimal basis found within {0} pivots")]
    IterationLimit(usize),
}

/// Read-only record of the tableau after one pivot, handed to the observer
/// of [`Solver::solve_observed`]. Rendering is the observer's business; the
/// solver itself never formats anything.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct PivotSnapshot {
    /// Pivot count, starting at 0
    pub iteration: usize,
    /// Column that entered the basis
    pub entering: usize,
    /// Row whose basic variable left
    pub leaving_row: usize,
    /// Constraint rows after the pivot
    pub rows: Vec<Vec<f64>>,
    /// Reduced-cost row after the pivot
    pub reduced_costs: Vec<f64>,
    /// Right-hand sides after the pivot
    pub rhs: Vec<f64>,
    /// Basic column of each row
    pub basis: Vec<usize>,
    /// Columns at or above this index are artificial
    pub artificial_start: usize,
    /// Objective value at the new basic point
    pub objective_value: f64,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.big_m = big_m;
        self
    }

    /// Solve the program, discarding per-pivot state.
    pub fn solve(&self, problem: &LinearProgram) -> Result<Solution, SolveError> {
        self.solve_observed(problem, |_| {})
    }

    /// Solve the program, calling `observe` with a snapshot after every
    /// pivot.
    pub fn solve_observed<F>(
        &self,
        problem: &LinearProgram,
        mut observe: F,
    ) -> Result<Solution, SolveError>
    where
        F: FnMut(&PivotSnapshot),
    {
        let standardized = standardize(problem);
        let mut tableau = Tableau::build(&standardized, self.big_m);

        for iteration in 0..self.max_iterations {
            let Some(entering) = self.entering_column(&tableau) else {
                return Solution::extract(&tableau, self.tolerance);
            };
            let leaving_row = self
                .leaving_row(&tableau, entering)
                .ok_or(SolveError::Unbounded { column: entering })?;

            tableau.pivot(leaving_row, entering);
            tableau.recompute_reduced_costs();

            observe(&PivotSnapshot {
                iteration,
                entering,
                leaving_row,
                rows: tableau.rows.clone(),
                reduced_costs: tableau.reduced_costs.clone(),
                rhs: tableau.rhs.clone(),
                basis: tableau.basis.clone(),
                artificial_start: tableau.artificial_start,
                objective_value: tableau.objective_value,
            });
        }

        Err(SolveError::IterationLimit(self.max_iterations))
    }

    /// Most negative reduced cost, ties to the lowest column index. `None`
    /// when every entry is above `-tolerance`, i.e. the tableau is optimal.
    fn entering_column(&self, tableau: &Tableau) -> Option<usize> {
        let mut best = None;
        let mut best_value = -self.tolerance;
        for (j, &z) in tableau.reduced_costs.iter().enumerate() {
            if z < best_value {
                best_value = z;
                best = Some(j);
            }
        }
        best
    }

    /// Minimum-ratio row for the entering column, ties to the lowest row
    /// index. `None` when no row has a positive coefficient there.
    fn leaving_row(&self, tableau: &Tableau, entering: usize) -> Option<usize> {
        let mut best = None;
        let mut best_ratio = f64::INFINITY;
        for (i, row) in tableau.rows.iter().enumerate() {
            let coefficient = row[entering];
            if coefficient > self.tolerance {
                let ratio = tableau.rhs[i] / coefficient;
                if ratio < best_ratio {
                    best_ratio = ratio;
                    best = Some(i);
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{LinearProgram, Relation};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "got {actual}, expected {expected}"
        );
    }

    /// Check `A . x` against each original relation within tolerance.
    fn assert_feasible(problem: &LinearProgram, values: &[f64]) {
        for (i, row) in problem.coefficients().iter().enumerate() {
            let lhs: f64 = row.iter().zip(values).map(|(a, x)| a * x).sum();
            let rhs = problem.rhs()[i];
            match problem.relations()[i] {
                Relation::Le => assert!(lhs <= rhs + 1e-6, "row {i}: {lhs} > {rhs}"),
                Relation::Ge => assert!(lhs >= rhs - 1e-6, "row {i}: {lhs} < {rhs}"),
                Relation::Eq => assert!((lhs - rhs).abs() < 1e-6, "row {i}: {lhs} != {rhs}"),
            }
        }
        for (j, &x) in values.iter().enumerate() {
            assert!(x >= -1e-6, "variable {j} is negative: {x}");
        }
    }

    #[test]
    fn single_upper_bound_row() {
        // maximize 3x1 + 5x2 st x1 + x2 <= 4
        let lp = LinearProgram::new(
            vec![vec![1.0, 1.0]],
            vec![4.0],
            vec![Relation::Le],
            vec![3.0, 5.0],
        )
        .unwrap();

        let solution = Solver::new().solve(&lp).unwrap();

        assert_close(solution.values[0], 0.0);
        assert_close(solution.values[1], 4.0);
        assert_close(solution.objective_value, 20.0);
        assert_feasible(&lp, &solution.values);
    }

    #[test]
    fn mixed_relations_with_negative_rhs() {
        // maximize x1 + 5x2 + 2x3
        // st  x1 + 10x2 - 5x3 >= -10
        //    7x1 + 16x2 + 3x3 <= 30
        let lp = LinearProgram::new(
            vec![vec![1.0, 10.0, -5.0], vec![7.0, 16.0, 3.0]],
            vec![-10.0, 30.0],
            vec![Relation::Ge, Relation::Le],
            vec![1.0, 5.0, 2.0],
        )
        .unwrap();

        let solution = Solver::new().solve(&lp).unwrap();

        assert_close(solution.values[0], 0.0);
        assert_close(solution.values[1], 12.0 / 11.0);
        assert_close(solution.values[2], 46.0 / 11.0);
        assert_close(solution.objective_value, 152.0 / 11.0);
        assert_feasible(&lp, &solution.values);
    }

    #[test]
    fn unbounded_direction_is_reported() {
        // maximize x1 + x2 st x1 + x2 >= 1: once the artificial leaves,
        // the surplus column has no positive coefficient anywhere
        let lp = LinearProgram::new(
            vec![vec![1.0, 1.0]],
            vec![1.0],
            vec![Relation::Ge],
            vec![1.0, 1.0],
        )
        .unwrap();

        let err = Solver::new().solve(&lp).unwrap_err();

        assert!(matches!(err, SolveError::Unbounded { .. }));
    }

    #[test]
    fn contradictory_equalities_are_infeasible() {
        // x1 = 1 and x1 = 2
        let lp = LinearProgram::new(
            vec![vec![1.0], vec![1.0]],
            vec![1.0, 2.0],
            vec![Relation::Eq, Relation::Eq],
            vec![1.0],
        )
        .unwrap();

        let err = Solver::new().solve(&lp).unwrap_err();

        match err {
            SolveError::Infeasible { value, .. } => assert!(value > 1e-8),
            other => panic!("expected Infeasible, got {other:?}"),
        }
    }

    #[test]
    fn entering_ties_break_to_lowest_column() {
        // both variables have reduced cost -1 initially
        let lp = LinearProgram::new(
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![1.0, 1.0],
            vec![Relation::Le, Relation::Le],
            vec![1.0, 1.0],
        )
        .unwrap();

        let mut first_entering = Vec::new();
        for _ in 0..3 {
            let mut entering = None;
            let solution = Solver::new()
                .solve_observed(&lp, |snapshot| {
                    entering.get_or_insert(snapshot.entering);
                })
                .unwrap();
            first_entering.push(entering.unwrap());
            assert_close(solution.objective_value, 2.0);
        }

        assert_eq!(first_entering, vec![0, 0, 0]);
    }

    #[test]
    fn objective_improves_monotonically() {
        let lp = LinearProgram::new(
            vec![vec![1.0, 10.0, -5.0], vec![7.0, 16.0, 3.0]],
            vec![-10.0, 30.0],
            vec![Relation::Ge, Relation::Le],
            vec![1.0, 5.0, 2.0],
        )
        .unwrap();

        let mut objectives = Vec::new();
        Solver::new()
            .solve_observed(&lp, |snapshot| objectives.push(snapshot.objective_value))
            .unwrap();

        assert!(!objectives.is_empty());
        for pair in objectives.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-8, "objective regressed: {pair:?}");
        }
    }

    #[test]
    fn basis_stays_distinct_and_sized() {
        let lp = LinearProgram::new(
            vec![
                vec![1.0, 1.0, 1.0],
                vec![2.0, 1.0, 0.0],
                vec![0.0, 1.0, 3.0],
            ],
            vec![6.0, 4.0, 9.0],
            vec![Relation::Le, Relation::Ge, Relation::Le],
            vec![2.0, 3.0, 1.0],
        )
        .unwrap();

        let solution = Solver::new()
            .solve_observed(&lp, |snapshot| {
                // 3 structural + 3 slack columns, then the one artificial
                assert_eq!(snapshot.artificial_start, 6);
                assert_eq!(snapshot.basis.len(), 3);
                let mut sorted = snapshot.basis.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), 3, "duplicate basis entry: {:?}", snapshot.basis);
            })
            .unwrap();

        assert_feasible(&lp, &solution.values);
    }

    #[test]
    fn repeated_solves_agree() {
        let lp = LinearProgram::new(
            vec![vec![1.0, 10.0, -5.0], vec![7.0, 16.0, 3.0]],
            vec![-10.0, 30.0],
            vec![Relation::Ge, Relation::Le],
            vec![1.0, 5.0, 2.0],
        )
        .unwrap();

        let solver = Solver::new();
        let first = solver.solve(&lp).unwrap();
        let second = solver.solve(&lp).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn equality_row_is_honored() {
        // maximize 2x1 + x2 st x1 + x2 = 3, x1 <= 2
        let lp = LinearProgram::new(
            vec![vec![1.0, 1.0], vec![1.0, 0.0]],
            vec![3.0, 2.0],
            vec![Relation::Eq, Relation::Le],
            vec![2.0, 1.0],
        )
        .unwrap();

        let solution = Solver::new().solve(&lp).unwrap();

        assert_close(solution.values[0], 2.0);
        assert_close(solution.values[1], 1.0);
        assert_close(solution.objective_value, 5.0);
        assert_feasible(&lp, &solution.values);
    }

    #[test]
    fn iteration_cap_is_surfaced() {
        let lp = LinearProgram::new(
            vec![vec![1.0, 10.0, -5.0], vec![7.0, 16.0, 3.0]],
            vec![-10.0, 30.0],
            vec![Relation::Ge, Relation::Le],
            vec![1.0, 5.0, 2.0],
        )
        .unwrap();

        let err = Solver::new().with_max_iterations(1).solve(&lp).unwrap_err();

        assert_eq!(err, SolveError::IterationLimit(1));
    }
}
