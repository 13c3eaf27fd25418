use thiserror::Error;

/// How a constraint row relates to its right-hand side
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl Relation {
    /// The relation that holds after both sides of a row are negated
    pub fn flipped(self) -> Relation {
        match self {
            Relation::Le => Relation::Ge,
            Relation::Ge => Relation::Le,
            Relation::Eq => Relation::Eq,
        }
    }
}

/// A malformed problem, rejected at construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("problem has no constraints")]
    NoConstraints,
    #[error("problem has no variables")]
    NoVariables,
    #[error("constraint row {row} has {found} coefficients, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },
    #[error("{found} right-hand sides for {rows} constraint rows")]
    RhsLength { rows: usize, found: usize },
    #[error("{found} relations for {rows} constraint rows")]
    RelationCount { rows: usize, found: usize },
}

/// A linear program over non-negative variables.
///
/// The solver *maximizes* `objective . x` subject to the constraint rows; to
/// minimize an objective, negate its coefficients before constructing the
/// program. Shapes are validated once here, so the solver itself never has
/// to re-check them.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    /// Constraint coefficients, one row per constraint
    coefficients: Vec<Vec<f64>>,
    /// Right-hand side of each constraint row
    rhs: Vec<f64>,
    /// Relation of each constraint row
    relations: Vec<Relation>,
    /// Objective coefficients, maximized
    objective: Vec<f64>,
}

impl LinearProgram {
    pub fn new(
        coefficients: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        relations: Vec<Relation>,
        objective: Vec<f64>,
    ) -> Result<Self, ProblemError> {
        if coefficients.is_empty() {
            return Err(ProblemError::NoConstraints);
        }
        if objective.is_empty() {
            return Err(ProblemError::NoVariables);
        }
        let expected = objective.len();
        for (row, coeffs) in coefficients.iter().enumerate() {
            if coeffs.len() != expected {
                return Err(ProblemError::RowLength {
                    row,
                    expected,
                    found: coeffs.len(),
                });
            }
        }
        if rhs.len() != coefficients.len() {
            return Err(ProblemError::RhsLength {
                rows: coefficients.len(),
                found: rhs.len(),
            });
        }
        if relations.len() != coefficients.len() {
            return Err(ProblemError::RelationCount {
                rows: coefficients.len(),
                found: relations.len(),
            });
        }
        Ok(Self {
            coefficients,
            rhs,
            relations,
            objective,
        })
    }

    pub fn coefficients(&self) -> &[Vec<f64>] {
        &self.coefficients
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.coefficients.len()
    }
}
