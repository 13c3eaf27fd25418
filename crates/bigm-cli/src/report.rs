use bigm_solver::{PivotSnapshot, Solution};

/// Human-readable label for a tableau column: `x` structural, `s`
/// slack/surplus, `a` artificial.
fn column_label(col: usize, num_variables: usize, artificial_start: usize) -> String {
    if col < num_variables {
        format!("x{}", col + 1)
    } else if col < artificial_start {
        format!("s{}", col - num_variables + 1)
    } else {
        format!("a{}", col - artificial_start + 1)
    }
}

/// Render one pivot as a fixed-width tableau with its basis line.
pub fn render_snapshot(snapshot: &PivotSnapshot, num_variables: usize) -> String {
    let mut out = String::new();
    let label = |col| column_label(col, num_variables, snapshot.artificial_start);

    out.push_str(&format!(
        "pivot {}: {} enters, row {} leaves\n",
        snapshot.iteration + 1,
        label(snapshot.entering),
        snapshot.leaving_row + 1,
    ));

    let header: String = (0..snapshot.reduced_costs.len())
        .map(|col| format!("{:^12}", label(col)))
        .collect();
    out.push_str(&format!("{header}{:^12}\n", "rhs"));

    for (row, rhs) in snapshot.rows.iter().zip(&snapshot.rhs) {
        let cells: String = row.iter().map(|value| format!("{value:^12.2}")).collect();
        out.push_str(&format!("{cells}{rhs:^12.2}\n"));
    }
    let z_cells: String = snapshot
        .reduced_costs
        .iter()
        .map(|value| format!("{value:^12.2}"))
        .collect();
    out.push_str(&format!("{z_cells}{:^12.2}\n", snapshot.objective_value));

    let basis: Vec<String> = snapshot.basis.iter().map(|&col| label(col)).collect();
    out.push_str(&format!("basis: {}\n", basis.join(", ")));

    out
}

/// Serialize the solution with the objective value in the direction the
/// problem file asked for, not the internal maximization value.
pub fn render_json(solution: &Solution, objective_value: f64) -> serde_json::Result<String> {
    let stated = Solution {
        values: solution.values.clone(),
        objective_value,
    };
    serde_json::to_string_pretty(&stated)
}

/// Render the optimal point, one variable per line.
pub fn render_solution(solution: &Solution, objective_value: f64) -> String {
    let mut out = String::from("Status: OPTIMAL\n");
    for (i, value) in solution.values.iter().enumerate() {
        out.push_str(&format!("  x{} = {value:.6}\n", i + 1));
    }
    out.push_str(&format!("Objective: {objective_value:.6}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_renders_rows_and_basis() {
        let snapshot = PivotSnapshot {
            iteration: 0,
            entering: 1,
            leaving_row: 0,
            rows: vec![vec![0.5, 1.0, 0.25]],
            reduced_costs: vec![2.0, 0.0, 1.25],
            rhs: vec![4.0],
            basis: vec![1],
            artificial_start: 3,
            objective_value: 20.0,
        };

        let text = render_snapshot(&snapshot, 2);

        assert!(text.starts_with("pivot 1: x2 enters, row 1 leaves"));
        assert!(text.contains("s1"));
        assert!(text.contains("basis: x2"));
        assert!(text.contains("20.00"));
    }

    #[test]
    fn artificial_columns_get_their_own_label() {
        // x1, x2 | one surplus | one artificial
        let snapshot = PivotSnapshot {
            iteration: 0,
            entering: 0,
            leaving_row: 0,
            rows: vec![vec![1.0, 1.0, -1.0, 1.0]],
            reduced_costs: vec![0.0, 0.0, -1.0, 2.0],
            rhs: vec![1.0],
            basis: vec![3],
            artificial_start: 3,
            objective_value: 1.0,
        };

        let text = render_snapshot(&snapshot, 2);

        assert!(text.contains("a1"));
        assert!(text.contains("basis: a1"));
        assert!(!text.contains("s2"));
    }

    #[test]
    fn json_output_restores_the_stated_direction() {
        use crate::input;
        use bigm_solver::Solver;

        let loaded = input::parse(
            r#"{
                "minimize": [2, 3],
                "constraints": [
                    { "coefficients": [1, 1], "relation": ">=", "rhs": 4 }
                ]
            }"#,
        )
        .unwrap();

        let solution = Solver::new().solve(&loaded.program).unwrap();
        let objective = loaded.stated_objective(solution.objective_value);
        let json = render_json(&solution, objective).unwrap();

        assert!(json.contains("\"objective_value\": 8.0"), "{json}");
        assert!(!json.contains("-8.0"), "{json}");
    }

    #[test]
    fn solution_lists_each_variable() {
        let solution = Solution {
            values: vec![0.0, 4.0],
            objective_value: 20.0,
        };

        let text = render_solution(&solution, 20.0);

        assert!(text.contains("x1 = 0.000000"));
        assert!(text.contains("x2 = 4.000000"));
        assert!(text.contains("Objective: 20.000000"));
    }
}
