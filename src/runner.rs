//! Runtime-agnostic query runner.
//!
//! [`Runner`] resolves a runtime once, owns the matching backend, and layers
//! file execution, scripted execution and benchmarking on top of a single
//! `execute` operation.

use crate::benchmark::BenchmarkResult;
use crate::config::Config;
use crate::db::{self, Backend, QueryResult};
use crate::error::{BenchError, Result};
use crate::runtime::{detect_runtime, Runtime};
use crate::script::split_on_semicolons;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default number of timed iterations per benchmark.
pub const DEFAULT_ITERATIONS: usize = 3;

/// Default number of untimed warm-up runs per benchmark.
pub const DEFAULT_WARMUP: usize = 1;

/// Unified query runner for Firebolt Cloud and Firebolt Core.
pub struct Runner {
    runtime: Runtime,
    backend: Box<dyn Backend>,
    database: String,
}

impl Runner {
    /// Resolves the runtime and creates a runner for it.
    ///
    /// `requested` of `None` means auto-detect.
    pub async fn new(requested: Option<Runtime>, config: &Config) -> Result<Self> {
        let runtime = detect_runtime(requested, config).await;
        let backend = db::connect(runtime, config)?;
        let runner = Self::with_backend(backend, config);

        info!("Resolved runtime: {runtime}");
        println!("Firebolt Runner initialized: {runtime}");
        Ok(runner)
    }

    /// Creates a runner around an existing backend.
    pub fn with_backend(backend: Box<dyn Backend>, config: &Config) -> Self {
        Self {
            runtime: backend.runtime(),
            backend,
            database: config.database().to_string(),
        }
    }

    /// Returns the resolved runtime.
    pub fn runtime(&self) -> Runtime {
        self.runtime
    }

    /// Returns the target database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Executes a SQL statement.
    pub async fn execute(&mut self, sql: &str, disable_cache: bool) -> Result<QueryResult> {
        debug!("Executing on {}: {}", self.runtime, sql.trim());
        self.backend.execute(sql, disable_cache).await
    }

    /// Executes the SQL contained in a file.
    pub async fn execute_file(&mut self, path: impl AsRef<Path>) -> Result<QueryResult> {
        let sql = read_sql_file(path.as_ref())?;
        self.execute(&sql, false).await
    }

    /// Executes each `;`-separated statement of a script in order.
    ///
    /// With `ignore_errors`, failed statements are logged and skipped;
    /// otherwise the first failure is returned. Returns the number of
    /// statements that succeeded.
    pub async fn execute_script(&mut self, sql: &str, ignore_errors: bool) -> Result<usize> {
        let mut succeeded = 0;
        for statement in split_on_semicolons(sql) {
            match self.execute(statement, false).await {
                Ok(_) => succeeded += 1,
                Err(e) if ignore_errors => warn!("Ignoring failed statement: {e}"),
                Err(e) => return Err(e),
            }
        }
        Ok(succeeded)
    }

    /// Benchmarks a query with the result cache disabled.
    ///
    /// Runs `warmup` untimed executions, then `iterations` timed ones, and
    /// returns the last result with its time replaced by the mean of the
    /// timed runs.
    pub async fn benchmark(
        &mut self,
        sql: &str,
        iterations: usize,
        warmup: usize,
    ) -> Result<QueryResult> {
        if iterations == 0 {
            return Err(BenchError::config(
                "Benchmark requires at least one iteration",
            ));
        }

        for _ in 0..warmup {
            self.execute(sql, true).await?;
        }

        let mut total_ms = 0.0;
        let mut last = None;
        for _ in 0..iterations {
            let result = self.execute(sql, true).await?;
            total_ms += result.execution_time_ms;
            last = Some(result);
        }

        let mut result =
            last.ok_or_else(|| BenchError::internal("benchmark finished without a result"))?;
        result.execution_time_ms = total_ms / iterations as f64;
        debug!(
            "Benchmark averaged {:.1}ms over {iterations} iterations",
            result.execution_time_ms
        );
        Ok(result)
    }

    /// Runs a full before/after comparison and prints the report.
    ///
    /// Order: baseline, setup, optimized, teardown.
    pub async fn run_benchmark_comparison(
        &mut self,
        name: &str,
        baseline_sql: &str,
        optimized_sql: &str,
        setup_sql: Option<&str>,
        teardown_sql: Option<&str>,
        iterations: usize,
    ) -> Result<BenchmarkResult> {
        println!("Running benchmark: {name}");

        println!("  Running baseline query...");
        let baseline = self
            .benchmark(baseline_sql, iterations, DEFAULT_WARMUP)
            .await?;

        if let Some(setup) = setup_sql {
            println!("  Running setup (e.g., creating index)...");
            self.execute(setup, false).await?;
        }

        println!("  Running optimized query...");
        let optimized = self
            .benchmark(optimized_sql, iterations, DEFAULT_WARMUP)
            .await?;

        if let Some(teardown) = teardown_sql {
            println!("  Running teardown...");
            self.execute(teardown, false).await?;
        }

        let result = BenchmarkResult::new(name, baseline, optimized);
        result.print_comparison();
        Ok(result)
    }

    /// Creates the database if it does not exist. Defaults to the configured database.
    pub async fn create_database_if_not_exists(&mut self, database: Option<&str>) -> Result<()> {
        let name = database.unwrap_or(self.database.as_str()).to_string();
        self.execute(&format!("CREATE DATABASE IF NOT EXISTS {name}"), false)
            .await?;
        println!("Database '{name}' ready");
        Ok(())
    }

    /// Releases backend handles. Safe to call more than once.
    pub async fn close(&mut self) -> Result<()> {
        self.backend.close().await
    }
}

/// Reads a SQL file, failing with [`BenchError::FileNotFound`] if it does not exist.
pub fn read_sql_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(BenchError::FileNotFound(path.to_path_buf()));
    }

    std::fs::read_to_string(path).map_err(|e| {
        BenchError::config(format!("Failed to read SQL file {}: {e}", path.display()))
    })
}
