mod input;
mod report;

use bigm_solver::{SolveError, Solver};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bigm")]
#[command(about = "Big-M simplex solver for linear programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print the optimal solution
    Solve {
        /// JSON problem file
        file: PathBuf,
        /// Print the tableau after every pivot
        #[arg(short, long)]
        trace: bool,
        /// Output format (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Validate a problem file
    Check {
        /// JSON problem file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { file, trace, format } => {
            let source = match std::fs::read_to_string(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading file: {}", e);
                    std::process::exit(1);
                }
            };

            let loaded = match input::parse(&source) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let num_variables = loaded.program.num_variables();
            let solver = Solver::new();
            let result = if trace {
                solver.solve_observed(&loaded.program, |snapshot| {
                    println!("{}", report::render_snapshot(snapshot, num_variables));
                })
            } else {
                solver.solve(&loaded.program)
            };

            match result {
                Ok(solution) => {
                    let objective = loaded.stated_objective(solution.objective_value);
                    if format == "json" {
                        match report::render_json(&solution, objective) {
                            Ok(json) => println!("{}", json),
                            Err(e) => {
                                eprintln!("Error: {}", e);
                                std::process::exit(1);
                            }
                        }
                    } else {
                        print!("{}", report::render_solution(&solution, objective));
                    }
                }
                Err(SolveError::Infeasible { row, value }) => {
                    println!("Status: INFEASIBLE");
                    println!(
                        "No point satisfies all constraints; row {} is off by {:.6}.",
                        row + 1,
                        value
                    );
                    std::process::exit(1);
                }
                Err(SolveError::Unbounded { .. }) => {
                    println!("Status: UNBOUNDED");
                    println!("The objective can be improved without limit.");
                    std::process::exit(1);
                }
                Err(e @ SolveError::IterationLimit(_)) => {
                    println!("Status: ERROR");
                    println!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { file } => {
            let source = match std::fs::read_to_string(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading file: {}", e);
                    std::process::exit(1);
                }
            };

            match input::parse(&source) {
                Ok(loaded) => {
                    use bigm_solver::Relation;
                    let relations = loaded.program.relations();
                    let le = relations.iter().filter(|r| **r == Relation::Le).count();
                    let ge = relations.iter().filter(|r| **r == Relation::Ge).count();
                    let eq = relations.iter().filter(|r| **r == Relation::Eq).count();

                    println!("✓ {} is valid", file.display());
                    println!("  {} variables", loaded.program.num_variables());
                    println!("  {} <= constraints", le);
                    println!("  {} >= constraints", ge);
                    println!("  {} = constraints", eq);
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
