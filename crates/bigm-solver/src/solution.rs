use crate::simplex::SolveError;
use crate::tableau::Tableau;

/// The optimal point of a solved program
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Optimal value of each structural variable (0 if nonbasic)
    pub values: Vec<f64>,
    /// Objective value at the optimal point
    pub objective_value: f64,
}

impl Solution {
    /// Read the terminal tableau into a solution over the structural
    /// variables. An artificial variable still basic above `tolerance`
    /// means the original constraints admit no feasible point.
    pub(crate) fn extract(tableau: &Tableau, tolerance: f64) -> Result<Solution, SolveError> {
        let mut worst: Option<(usize, f64)> = None;
        for (i, &col) in tableau.basis.iter().enumerate() {
            if col >= tableau.artificial_start && tableau.rhs[i] > tolerance {
                match worst {
                    Some((_, value)) if value >= tableau.rhs[i] => {}
                    _ => worst = Some((i, tableau.rhs[i])),
                }
            }
        }
        if let Some((row, value)) = worst {
            return Err(SolveError::Infeasible { row, value });
        }

        let mut values = vec![0.0; tableau.num_structural];
        for (i, &col) in tableau.basis.iter().enumerate() {
            if col < tableau.num_structural {
                values[col] = tableau.rhs[i];
            }
        }

        Ok(Solution {
            values,
            objective_value: tableau.objective_value,
        })
    }
}
