use bigm_solver::{LinearProgram, ProblemError, Relation};
use serde::Deserialize;
use thiserror::Error;

/// JSON problem file:
///
/// ```json
/// {
///   "maximize": [3, 5],
///   "constraints": [
///     { "coefficients": [1, 1], "relation": "<=", "rhs": 4 }
///   ]
/// }
/// ```
///
/// Exactly one of `"maximize"` / `"minimize"` must be present. The solver
/// core only maximizes, so a `"minimize"` objective is negated on the way in
/// and its optimal value negated back on the way out.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProblemFile {
    #[serde(default)]
    maximize: Option<Vec<f64>>,
    #[serde(default)]
    minimize: Option<Vec<f64>>,
    constraints: Vec<ConstraintFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintFile {
    coefficients: Vec<f64>,
    relation: RelationFile,
    rhs: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum RelationFile {
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "=")]
    Eq,
}

impl From<RelationFile> for Relation {
    fn from(relation: RelationFile) -> Relation {
        match relation {
            RelationFile::Le => Relation::Le,
            RelationFile::Ge => Relation::Ge,
            RelationFile::Eq => Relation::Eq,
        }
    }
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid problem file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("problem file needs a \"maximize\" or \"minimize\" objective")]
    MissingObjective,
    #[error("problem file has both \"maximize\" and \"minimize\" objectives")]
    ConflictingObjectives,
    #[error("malformed problem: {0}")]
    Problem(#[from] ProblemError),
}

/// A parsed problem plus the direction it was stated in.
#[derive(Debug)]
pub struct LoadedProblem {
    pub program: LinearProgram,
    pub minimize: bool,
}

impl LoadedProblem {
    /// Objective value in the direction the file asked for.
    pub fn stated_objective(&self, solved_objective: f64) -> f64 {
        if self.minimize {
            -solved_objective
        } else {
            solved_objective
        }
    }
}

pub fn parse(source: &str) -> Result<LoadedProblem, InputError> {
    let file: ProblemFile = serde_json::from_str(source)?;

    let (objective, minimize) = match (file.maximize, file.minimize) {
        (Some(_), Some(_)) => return Err(InputError::ConflictingObjectives),
        (Some(objective), None) => (objective, false),
        (None, Some(objective)) => (objective.iter().map(|c| -c).collect(), true),
        (None, None) => return Err(InputError::MissingObjective),
    };

    let mut coefficients = Vec::with_capacity(file.constraints.len());
    let mut rhs = Vec::with_capacity(file.constraints.len());
    let mut relations = Vec::with_capacity(file.constraints.len());
    for constraint in file.constraints {
        coefficients.push(constraint.coefficients);
        rhs.push(constraint.rhs);
        relations.push(constraint.relation.into());
    }

    let program = LinearProgram::new(coefficients, rhs, relations, objective)?;
    Ok(LoadedProblem { program, minimize })
}
