use crate::problem::{LinearProgram, Relation};

/// A linear program whose right-hand sides are all non-negative.
///
/// Built from a [`LinearProgram`] by negating every row with a negative
/// right-hand side and flipping its relation; the caller's program is left
/// untouched.
#[derive(Debug, Clone)]
pub(crate) struct StandardizedProgram {
    pub(crate) coefficients: Vec<Vec<f64>>,
    pub(crate) rhs: Vec<f64>,
    pub(crate) relations: Vec<Relation>,
    pub(crate) objective: Vec<f64>,
}

pub(crate) fn standardize(problem: &LinearProgram) -> StandardizedProgram {
    let mut coefficients = problem.coefficients().to_vec();
    let mut rhs = problem.rhs().to_vec();
    let mut relations = problem.relations().to_vec();

    for i in 0..rhs.len() {
        if rhs[i] < 0.0 {
            for coeff in &mut coefficients[i] {
                *coeff = -*coeff;
            }
            rhs[i] = -rhs[i];
            relations[i] = relations[i].flipped();
        }
    }

    StandardizedProgram {
        coefficients,
        rhs,
        relations,
        objective: problem.objective().to_vec(),
    }
}
