use std::time::Instant;

use clap::{Parser, ValueEnum};
use econ_pipes::utils::binomial;
use econ_pipes::{DynamicProgramming, Exhaustive, Grid, PipesError, RewardTable, Solver};
use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

/// Time the exhaustive and dynamic-programming pipes solvers on random grids.
///
/// For each size n the grid has rows = n/2 and columns = n - rows, with 20%
/// open cells and 10% rock.
#[derive(Parser, Debug)]
#[command(name = "pipes_timing", version)]
struct Options {
    /// Problem size n (smallest size when --n-max is given)
    #[arg(long, default_value_t = 15)]
    n: usize,

    /// Largest problem size; every size from --n up to this is measured
    #[arg(long)]
    n_max: Option<usize>,

    /// Increment between measured sizes
    #[arg(long, default_value_t = 1)]
    step: usize,

    /// Seed for the grid generator; size n uses seed + n
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Skip the exhaustive search above this n
    #[arg(long, default_value_t = 30)]
    exhaustive_max: usize,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print each grid and the paths found
    #[arg(long)]
    print: bool,
}

impl Options {
    fn validate(&self) -> Result<(), String> {
        if self.n < 2 {
            return Err(format!("n must be at least 2, got {}", self.n));
        }
        if self.step == 0 {
            return Err("step must be positive".to_string());
        }
        if let Some(max) = self.n_max {
            if max < self.n {
                return Err(format!("n-max ({max}) is smaller than n ({})", self.n));
            }
        }
        Ok(())
    }

    fn sizes(&self) -> impl Iterator<Item = usize> {
        let last = self.n_max.unwrap_or(self.n);
        (self.n..=last).step_by(self.step)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Solved,
    NoPath,
    Skipped,
    Failed,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Solved => "solved",
            Status::NoPath => "no_path",
            Status::Skipped => "skipped",
            Status::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Agreement {
    Agrees,
    Disagrees,
    NotChecked,
}

impl Agreement {
    fn label(self) -> &'static str {
        match self {
            Agreement::Agrees => "agrees",
            Agreement::Disagrees => "disagrees",
            Agreement::NotChecked => "not_checked",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct Measurement {
    algorithm: &'static str,
    n: usize,
    rows: usize,
    columns: usize,
    reward: Option<usize>,
    wall_s: f64,
    rss_delta_kib: u64,
    status: Status,
    agreement: Agreement,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();
    if let Err(err) = options.validate() {
        eprintln!("pipes_timing: {err}");
        std::process::exit(2);
    }

    let mut sys = System::new();
    let mut measurements = Vec::new();
    for n in options.sizes() {
        match run_size(&options, n, &mut sys) {
            Ok(batch) => measurements.extend(batch),
            Err(err) => error!("n={n}: {err}"),
        }
    }

    if let Err(err) = write_report(options.format, &measurements) {
        eprintln!("pipes_timing output error: {err}");
        std::process::exit(1);
    }
}

fn run_size(options: &Options, n: usize, sys: &mut System) -> Result<Vec<Measurement>, PipesError> {
    let rows = n / 2;
    let columns = n - rows;
    let cells = rows * columns;
    let open_count = cells / 5;
    let rock_count = cells / 10;
    let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(n as u64));
    let grid = Grid::random(rows, columns, open_count, rock_count, &mut rng)?;

    info!(
        "n={n} rows={rows} columns={columns} open={open_count} rock={rock_count} monotone paths={}",
        binomial((rows + columns - 2) as u64, (columns - 1) as u64)
    );
    if options.print {
        print_bar();
        println!("n={n}, rows={rows}, columns={columns}\n");
        print!("{grid}");
    }

    let solvers: [&dyn Solver; 2] = [&Exhaustive, &DynamicProgramming];
    let mut batch = Vec::with_capacity(solvers.len());
    for solver in solvers {
        let skip = solver.name() == Exhaustive.name() && n > options.exhaustive_max;
        if skip || !solver.supports(rows, columns) {
            info!("n={n}: skipping {}", solver.name());
            if options.print {
                print_bar();
                println!("{}\n\n(n too large, skipping)", solver.name());
            }
            batch.push(Measurement {
                algorithm: solver.name(),
                n,
                rows,
                columns,
                reward: None,
                wall_s: 0.0,
                rss_delta_kib: 0,
                status: Status::Skipped,
                agreement: Agreement::NotChecked,
            });
            continue;
        }

        let before = rss_kib(sys);
        let start = Instant::now();
        let outcome = solver.solve(&grid);
        let wall_s = start.elapsed().as_secs_f64();
        let after = rss_kib(sys);

        let (reward, status) = match &outcome {
            Ok(path) => (Some(path.total_open()), Status::Solved),
            Err(PipesError::NoPathExists) => (None, Status::NoPath),
            Err(err) => {
                warn!("n={n}: {} failed: {err}", solver.name());
                (None, Status::Failed)
            }
        };
        if options.print {
            print_bar();
            println!("{}", solver.name());
            match &outcome {
                Ok(path) => print!("{path}"),
                Err(PipesError::NoPathExists) if solver.name() == DynamicProgramming.name() => {
                    println!("(no path reaches the goal)");
                    let table = RewardTable::build(&grid)?;
                    if let Some(partial) = table.best_reachable() {
                        println!("furthest reachable cell {:?}:", partial.position());
                        print!("{partial}");
                    }
                }
                Err(err) => println!("({err})"),
            }
            println!("\nelapsed time={wall_s} seconds");
        }

        batch.push(Measurement {
            algorithm: solver.name(),
            n,
            rows,
            columns,
            reward,
            wall_s,
            rss_delta_kib: after.saturating_sub(before),
            status,
            agreement: Agreement::NotChecked,
        });
    }
    if options.print {
        print_bar();
    }

    check_agreement(&mut batch);
    Ok(batch)
}

/// Mark every measurement of one size with whether the solvers that ran agree.
fn check_agreement(batch: &mut [Measurement]) {
    let ran: Vec<(Status, Option<usize>)> = batch
        .iter()
        .filter(|m| matches!(m.status, Status::Solved | Status::NoPath))
        .map(|m| (m.status, m.reward))
        .collect();
    if ran.len() < 2 {
        return;
    }
    let agreement = if ran.windows(2).all(|w| w[0] == w[1]) {
        Agreement::Agrees
    } else {
        error!(
            "n={}: solvers disagree: {:?}",
            batch[0].n,
            batch
                .iter()
                .map(|m| (m.algorithm, m.reward))
                .collect::<Vec<_>>()
        );
        Agreement::Disagrees
    };
    for m in batch
        .iter_mut()
        .filter(|m| matches!(m.status, Status::Solved | Status::NoPath))
    {
        m.agreement = agreement;
    }
}

fn print_bar() {
    println!("{}", "-".repeat(79));
}

fn write_report(format: OutputFormat, measurements: &[Measurement]) -> Result<(), String> {
    match format {
        OutputFormat::Table => write_table(measurements),
        OutputFormat::Csv => write_csv(measurements),
        OutputFormat::Json => write_json(measurements),
    }
}

fn reward_cell(m: &Measurement) -> String {
    m.reward.map(|r| r.to_string()).unwrap_or_default()
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("algorithm,n,rows,columns,reward,wall_s,rss_delta_kib,status,agreement");
    for m in measurements {
        println!(
            "{},{},{},{},{},{:.6},{},{},{}",
            m.algorithm,
            m.n,
            m.rows,
            m.columns,
            reward_cell(m),
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.agreement.label()
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.algorithm.len())
        .max()
        .unwrap_or(0)
        .max("algorithm".len());

    println!(
        "{:<col1$}  {:>5}  {:>11}  {:>6}  {:>12}  {:>14}  {:>8}  {}",
        "algorithm", "n", "rows x cols", "reward", "wall_s", "rss_delta_kib", "status", "agreement",
    );
    println!(
        "{:-<col1$}  {:-<5}  {:-<11}  {:-<6}  {:-<12}  {:-<14}  {:-<8}  {:-<11}",
        "", "", "", "", "", "", "", "",
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:>5}  {:>11}  {:>6}  {:>12.6}  {:>14}  {:>8}  {}",
            m.algorithm,
            m.n,
            format!("{}x{}", m.rows, m.columns),
            reward_cell(m),
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.agreement.label(),
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    let text = serde_json::to_string_pretty(measurements).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    // sysinfo reports bytes.
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}
