//! Aggregating-index benchmark suites.
//!
//! Each [`Suite`] holds the analytics queries for one industry vertical plus
//! the scripts that create and drop its aggregating indexes. A full run
//! measures every query without indexes, creates them, and measures again.

mod catalog;

pub use catalog::{ADTECH, ECOMMERCE, FINANCIAL, GAMING, OBSERVABILITY};

use crate::benchmark::BenchmarkResult;
use crate::error::{BenchError, Result};
use crate::runner::{Runner, DEFAULT_WARMUP};
use tracing::info;

/// Width of the section banners.
const BANNER_WIDTH: usize = 70;

/// A named benchmark query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuiteQuery {
    pub name: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
    /// Speed-up observed on the reference dataset, shown for context.
    pub expected_improvement: &'static str,
}

/// Benchmark queries and index scripts for one vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suite {
    /// Lowercase key used on the command line.
    pub vertical: &'static str,
    /// Upper-case title used in banners.
    pub title: &'static str,
    pub queries: &'static [SuiteQuery],
    pub create_indexes_sql: &'static str,
    pub drop_indexes_sql: &'static str,
}

/// All known suites.
pub const SUITES: &[Suite] = &[GAMING, ADTECH, ECOMMERCE, FINANCIAL, OBSERVABILITY];

/// Looks up a suite by vertical, ignoring case.
pub fn find_suite(vertical: &str) -> Result<&'static Suite> {
    SUITES
        .iter()
        .find(|s| s.vertical.eq_ignore_ascii_case(vertical))
        .ok_or_else(|| {
            BenchError::config(format!(
                "Unknown vertical '{vertical}'. Available: {}",
                verticals().join(", ")
            ))
        })
}

/// Lists the known verticals.
pub fn verticals() -> Vec<&'static str> {
    SUITES.iter().map(|s| s.vertical).collect()
}

impl Suite {
    /// Looks up a query by exact name.
    pub fn query(&self, name: &str) -> Result<&'static SuiteQuery> {
        self.queries.iter().find(|q| q.name == name).ok_or_else(|| {
            BenchError::config(format!(
                "Unknown query: {name}. Available: {}",
                self.query_names().join(", ")
            ))
        })
    }

    pub fn query_names(&self) -> Vec<&'static str> {
        self.queries.iter().map(|q| q.name).collect()
    }

    /// Runs the complete before/after benchmark for every query.
    ///
    /// Existing indexes are dropped first (failures ignored), then each
    /// query is measured, the indexes are created, and each query is
    /// measured again. With `keep_indexes` unset the indexes are dropped
    /// at the end.
    pub async fn run_full_benchmark(
        &self,
        runner: &mut Runner,
        iterations: usize,
        keep_indexes: bool,
    ) -> Result<Vec<BenchmarkResult>> {
        let rule = "=".repeat(BANNER_WIDTH);
        println!("\n{rule}");
        println!("AGGREGATING INDEXES BENCHMARK - {}", self.title);
        println!("{rule}");
        println!("Runtime: {}", runner.runtime());
        println!("Iterations per query: {iterations}");

        println!("\n[1/4] Preparing clean baseline (dropping existing indexes)...");
        self.cleanup(runner).await;

        println!("\n[2/4] Running baseline queries (no aggregating indexes)...");
        let mut baselines = Vec::with_capacity(self.queries.len());
        for query in self.queries {
            println!("  Running: {}...", query.name);
            let result = runner.benchmark(query.sql, iterations, DEFAULT_WARMUP).await?;
            println!("    -> {:.0}ms", result.execution_time_ms);
            baselines.push(result);
        }

        println!("\n[3/4] Creating aggregating indexes...");
        let created = runner.execute_script(self.create_indexes_sql, false).await?;
        info!("Created {created} aggregating indexes for {}", self.vertical);
        println!("  Indexes created successfully");

        println!("\n[4/4] Running optimized queries (with aggregating indexes)...");
        let mut results = Vec::with_capacity(self.queries.len());
        for (query, baseline) in self.queries.iter().zip(baselines) {
            println!("  Running: {}...", query.name);
            let optimized = runner.benchmark(query.sql, iterations, DEFAULT_WARMUP).await?;
            println!("    -> {:.0}ms", optimized.execution_time_ms);
            results.push(BenchmarkResult::new(query.name, baseline, optimized));
        }

        println!("\n{rule}");
        println!("RESULTS");
        println!("{rule}");
        for result in &results {
            result.print_comparison();
        }
        println!("{}", render_summary(&results));

        if !keep_indexes {
            println!("\nCleaning up aggregating indexes...");
            self.cleanup(runner).await;
        }

        Ok(results)
    }

    /// Benchmarks one query, creating the indexes in between and dropping them after.
    pub async fn run_single_query(
        &self,
        runner: &mut Runner,
        name: &str,
        iterations: usize,
    ) -> Result<BenchmarkResult> {
        let query = self.query(name)?;
        print!("{}", render_query_header(query));

        self.cleanup(runner).await;

        println!("Running baseline query...");
        let baseline = runner.benchmark(query.sql, iterations, DEFAULT_WARMUP).await?;

        println!("Creating aggregating indexes...");
        runner.execute_script(self.create_indexes_sql, false).await?;

        println!("Running optimized query...");
        let optimized = runner.benchmark(query.sql, iterations, DEFAULT_WARMUP).await?;

        self.cleanup(runner).await;

        let result = BenchmarkResult::new(query.name, baseline, optimized);
        result.print_comparison();
        Ok(result)
    }

    /// Drops this suite's aggregating indexes, ignoring statements that fail.
    pub async fn cleanup(&self, runner: &mut Runner) {
        // Ignored failures are logged inside execute_script.
        let _ = runner.execute_script(self.drop_indexes_sql, true).await;
    }
}

/// Renders the banner shown before a single-query benchmark.
pub fn render_query_header(query: &SuiteQuery) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!(
        "\n{rule}\nDemo: {}\n{rule}\n\nDescription: {}\nExpected improvement: {}\n",
        query.name, query.description, query.expected_improvement
    )
}

/// Renders the per-query speed-up list and the totals across all queries.
pub fn render_summary(results: &[BenchmarkResult]) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut out = format!("\n{rule}\nSUMMARY\n{rule}\n");

    for result in results {
        out.push_str(&format!(
            "  {:<30} {:>6.0}X faster\n",
            result.name,
            result.time_improvement()
        ));
    }

    let total_baseline: f64 = results.iter().map(|r| r.baseline.execution_time_ms).sum();
    let total_optimized: f64 = results.iter().map(|r| r.optimized.execution_time_ms).sum();
    let overall = if total_optimized == 0.0 {
        f64::INFINITY
    } else {
        total_baseline / total_optimized
    };

    out.push_str(&format!("\n  Total baseline time:  {total_baseline:.0}ms\n"));
    out.push_str(&format!("  Total optimized time: {total_optimized:.0}ms\n"));
    out.push_str(&format!("  Overall improvement:  {overall:.0}X faster\n"));
    out
}
