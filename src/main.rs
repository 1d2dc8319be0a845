//! boltbench - Runtime-agnostic query runner for Firebolt Cloud and Firebolt Core.

use boltbench::cli::{Cli, Command};
use boltbench::config::Config;
use boltbench::db::QueryResult;
use boltbench::error::Result;
use boltbench::runner::{read_sql_file, Runner};
use boltbench::table::render_preview;
use boltbench::{logging, suites, timed};
use clap::Parser;
use tracing::{error, info};

/// Rows shown for `run` and `query` results.
const PREVIEW_ROWS: usize = 10;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_stderr_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load(&config_path)?;

    let mut runner = Runner::new(cli.runtime.requested(), &config).await?;

    let outcome = dispatch(&mut runner, cli.command).await;
    let closed = runner.close().await;
    outcome.and(closed)
}

async fn dispatch(runner: &mut Runner, command: Command) -> Result<()> {
    match command {
        Command::Run { file } => {
            let result = runner.execute_file(&file).await?;
            println!("Executed: {result}");
            print_preview(&result);
        }
        Command::Query { sql } => {
            let result = runner.execute(&sql.join(" "), false).await?;
            println!("Result: {result}");
            print_preview(&result);
        }
        Command::Status => {
            println!("Runtime: {}", runner.runtime());
            match runner.execute("SELECT 1 as test", false).await {
                Ok(_) => println!("Connection: OK"),
                Err(e) => println!("Connection: FAILED - {e}"),
            }
        }
        Command::Timed { file } => {
            let sql = read_sql_file(&file)?;
            println!(
                "Running {} on {} (each statement timed):\n",
                file.display(),
                runner.runtime()
            );
            let timings = timed::run_timed(runner, &sql).await;
            print!("{}", timed::render_summary(&timings));
        }
        Command::Bench {
            vertical,
            query,
            iterations,
            keep_indexes,
        } => {
            let suite = suites::find_suite(&vertical)?;
            match query {
                Some(name) => {
                    suite.run_single_query(runner, &name, iterations).await?;
                }
                None => {
                    suite
                        .run_full_benchmark(runner, iterations, keep_indexes)
                        .await?;
                }
            }
        }
        Command::CreateDb { name } => {
            runner.create_database_if_not_exists(name.as_deref()).await?;
        }
    }
    Ok(())
}

fn print_preview(result: &QueryResult) {
    if let Some(table) = render_preview(result, PREVIEW_ROWS) {
        print!("{table}");
    }
}
