//! Example: solve a small grid with both algorithms and print the paths.
//!
//! Run with:
//! `cargo run --example scenario`

use econ_pipes::{DynamicProgramming, Exhaustive, Grid, RewardTable, Solver};

fn main() {
    let grid: Grid = "\
        S.o.X.\n\
        .Xo..o\n\
        o.oX..\n\
        ..o..G"
        .parse()
        .expect("valid grid text");

    println!("{grid}");

    let solvers: [&dyn Solver; 2] = [&Exhaustive, &DynamicProgramming];
    for solver in solvers {
        match solver.solve(&grid) {
            Ok(path) => println!("{}:\n{path}", solver.name()),
            Err(err) => println!("{}: {err}\n", solver.name()),
        }
    }

    // Best reward reaching each cell; `-` marks cells no path reaches.
    let table = RewardTable::build(&grid).expect("grid is non-empty");
    println!("reward table:");
    for row in 0..grid.rows() {
        let line: Vec<String> = (0..grid.columns())
            .map(|col| {
                table
                    .reward_at(row, col)
                    .map_or_else(|| "-".to_string(), |r| r.to_string())
            })
            .collect();
        println!("{}", line.join(" "));
    }
}
