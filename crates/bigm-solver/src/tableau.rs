use crate::problem::Relation;
use crate::standard::StandardizedProgram;

/// The mutable simplex state: constraint rows augmented with slack and
/// artificial columns, the reduced-cost row, and the current basis.
///
/// Column layout: structural columns first, then one slack column per
/// `Le`/`Ge` row in row order, then one artificial column per `Ge`/`Eq` row
/// in row order. The right-hand side is kept as a separate vector and
/// updated by the same row operations as the coefficient rows.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    /// Constraint rows, m x k
    pub(crate) rows: Vec<Vec<f64>>,
    /// Reduced-cost (z) row, length k
    pub(crate) reduced_costs: Vec<f64>,
    /// Current right-hand sides, length m
    pub(crate) rhs: Vec<f64>,
    /// Column basic in each row; pairwise distinct
    pub(crate) basis: Vec<usize>,
    /// Objective coefficients per column, -M on artificial columns
    pub(crate) cost_row: Vec<f64>,
    /// Objective value at the current basic point
    pub(crate) objective_value: f64,
    /// Columns below this index are structural
    pub(crate) num_structural: usize,
    /// Columns at or above this index are artificial
    pub(crate) artificial_start: usize,
}

impl Tableau {
    pub(crate) fn build(program: &StandardizedProgram, big_m: f64) -> Tableau {
        let num_constraints = program.coefficients.len();
        let num_structural = program.objective.len();

        let mut slack_count = 0;
        let mut artificial_count = 0;
        for relation in &program.relations {
            match relation {
                Relation::Le => slack_count += 1,
                Relation::Ge => {
                    slack_count += 1;
                    artificial_count += 1;
                }
                Relation::Eq => artificial_count += 1,
            }
        }

        let num_columns = num_structural + slack_count + artificial_count;
        let artificial_start = num_structural + slack_count;

        let mut rows: Vec<Vec<f64>> = program
            .coefficients
            .iter()
            .map(|coeffs| {
                let mut row = vec![0.0; num_columns];
                row[..num_structural].copy_from_slice(coeffs);
                row
            })
            .collect();

        let mut cost_row = vec![0.0; num_columns];
        cost_row[..num_structural].copy_from_slice(&program.objective);

        let mut basis = Vec::with_capacity(num_constraints);
        let mut slack_col = num_structural;
        let mut artificial_col = artificial_start;

        for (i, relation) in program.relations.iter().enumerate() {
            match relation {
                Relation::Le => {
                    rows[i][slack_col] = 1.0;
                    basis.push(slack_col);
                    slack_col += 1;
                }
                Relation::Ge => {
                    rows[i][slack_col] = -1.0;
                    slack_col += 1;
                    rows[i][artificial_col] = 1.0;
                    cost_row[artificial_col] = -big_m;
                    basis.push(artificial_col);
                    artificial_col += 1;
                }
                Relation::Eq => {
                    rows[i][artificial_col] = 1.0;
                    cost_row[artificial_col] = -big_m;
                    basis.push(artificial_col);
                    artificial_col += 1;
                }
            }
        }

        let mut tableau = Tableau {
            rows,
            reduced_costs: vec![0.0; num_columns],
            rhs: program.rhs.clone(),
            basis,
            cost_row,
            objective_value: 0.0,
            num_structural,
            artificial_start,
        };
        tableau.recompute_reduced_costs();
        tableau
    }

    pub(crate) fn num_columns(&self) -> usize {
        self.cost_row.len()
    }

    /// Rebuild the z-row and objective value from the cost row and the
    /// current basis. Always done in full rather than incrementally, so
    /// floating-point drift does not compound across pivots.
    pub(crate) fn recompute_reduced_costs(&mut self) {
        let cb: Vec<f64> = self.basis.iter().map(|&col| self.cost_row[col]).collect();

        for j in 0..self.num_columns() {
            let mut z = 0.0;
            for (i, row) in self.rows.iter().enumerate() {
                z += cb[i] * row[j];
            }
            self.reduced_costs[j] = z - self.cost_row[j];
        }

        self.objective_value = cb
            .iter()
            .zip(&self.rhs)
            .map(|(cost, rhs)| cost * rhs)
            .sum();
    }

    /// Gauss-Jordan step around (leaving_row, entering): normalize the
    /// leaving row by the pivot element, then zero the entering column in
    /// every other row.
    pub(crate) fn pivot(&mut self, leaving_row: usize, entering: usize) {
        self.basis[leaving_row] = entering;

        let pivot_element = self.rows[leaving_row][entering];
        for value in &mut self.rows[leaving_row] {
            *value /= pivot_element;
        }
        self.rhs[leaving_row] /= pivot_element;

        let pivot_row = self.rows[leaving_row].clone();
        let pivot_rhs = self.rhs[leaving_row];

        for i in 0..self.rows.len() {
            if i == leaving_row {
                continue;
            }
            let factor = self.rows[i][entering];
            if factor == 0.0 {
                continue;
            }
            for (value, pivot_value) in self.rows[i].iter_mut().zip(&pivot_row) {
                *value -= factor * pivot_value;
            }
            self.rhs[i] -= factor * pivot_rhs;
        }
    }
}
