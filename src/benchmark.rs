//! Before/after benchmark comparison.
//!
//! A [`BenchmarkResult`] pairs a baseline run with an optimized run and
//! derives the improvement figures shown in the comparison report.

use crate::db::QueryResult;
use crate::table::render_table;

/// Width of the banner rule above and below the benchmark name.
const BANNER_WIDTH: usize = 60;

/// Result of a benchmark comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// Name shown in the report.
    pub name: String,
    /// Run without the optimization.
    pub baseline: QueryResult,
    /// Run with the optimization.
    pub optimized: QueryResult,
}

impl BenchmarkResult {
    /// Creates a comparison from two results.
    pub fn new(name: impl Into<String>, baseline: QueryResult, optimized: QueryResult) -> Self {
        Self {
            name: name.into(),
            baseline,
            optimized,
        }
    }

    /// Baseline time divided by optimized time; infinite if the optimized time is zero.
    pub fn time_improvement(&self) -> f64 {
        if self.optimized.execution_time_ms == 0.0 {
            return f64::INFINITY;
        }
        self.baseline.execution_time_ms / self.optimized.execution_time_ms
    }

    /// Percentage of query time saved; zero if the baseline time is zero.
    pub fn time_savings_pct(&self) -> f64 {
        if self.baseline.execution_time_ms == 0.0 {
            return 0.0;
        }
        (1.0 - self.optimized.execution_time_ms / self.baseline.execution_time_ms) * 100.0
    }

    /// Percentage of rows scanned saved; zero unless both sides report a non-zero count.
    pub fn rows_savings_pct(&self) -> f64 {
        savings_pct(self.baseline.rows_scanned, self.optimized.rows_scanned)
    }

    /// Percentage of bytes read saved; zero unless both sides report a non-zero count.
    pub fn bytes_savings_pct(&self) -> f64 {
        savings_pct(self.baseline.bytes_read, self.optimized.bytes_read)
    }

    /// Renders the comparison report.
    pub fn render_comparison(&self) -> String {
        let rule = "=".repeat(BANNER_WIDTH);
        let rows = vec![
            vec![
                "Query Time".to_string(),
                format!("{:.0} ms", self.baseline.execution_time_ms),
                format!("{:.0} ms", self.optimized.execution_time_ms),
                format!("{:.1}%", self.time_savings_pct()),
            ],
            vec![
                "Rows Scanned".to_string(),
                format_rows(self.baseline.rows_scanned),
                format_rows(self.optimized.rows_scanned),
                format!("{:.1}%", self.rows_savings_pct()),
            ],
            vec![
                "Bytes Read".to_string(),
                format_bytes(self.baseline.bytes_read),
                format_bytes(self.optimized.bytes_read),
                format!("{:.1}%", self.bytes_savings_pct()),
            ],
        ];

        let table = render_table(&["Metric", "Without", "With", "Savings"], &rows);

        format!(
            "\n{rule}\nFeature Benchmark: {}\n{rule}\n\n{table}\nImprovement: {:.0}X faster\n",
            self.name,
            self.time_improvement()
        )
    }

    /// Prints the comparison report to stdout.
    pub fn print_comparison(&self) {
        println!("{}", self.render_comparison());
    }
}

fn savings_pct(baseline: Option<u64>, optimized: Option<u64>) -> f64 {
    match (baseline, optimized) {
        (Some(base), Some(opt)) if base > 0 && opt > 0 => (1.0 - opt as f64 / base as f64) * 100.0,
        _ => 0.0,
    }
}

/// Formats a byte count with decimal units.
pub fn format_bytes(bytes: Option<u64>) -> String {
    match bytes {
        None => "N/A".to_string(),
        Some(b) if b >= 1_000_000_000 => format!("{:.2} GB", b as f64 / 1_000_000_000.0),
        Some(b) if b >= 1_000_000 => format!("{:.2} MB", b as f64 / 1_000_000.0),
        Some(b) if b >= 1_000 => format!("{:.2} KB", b as f64 / 1_000.0),
        Some(b) => format!("{b} B"),
    }
}

/// Formats a row count with K/M suffixes.
pub fn format_rows(rows: Option<u64>) -> String {
    match rows {
        None => "N/A".to_string(),
        Some(r) if r >= 1_000_000 => format!("{:.1}M", r as f64 / 1_000_000.0),
        Some(r) if r >= 1_000 => format!("{:.1}K", r as f64 / 1_000.0),
        Some(r) => r.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(ms: f64) -> QueryResult {
        QueryResult::default().with_execution_time(ms)
    }

    #[test]
    fn test_improvement_and_savings() {
        let result = BenchmarkResult::new("agg", timed(100.0), timed(20.0));
        assert_eq!(result.time_improvement(), 5.0);
        assert!((result.time_savings_pct() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_optimized_time_is_infinite() {
        let result = BenchmarkResult::new("agg", timed(100.0), timed(0.0));
        assert_eq!(result.time_improvement(), f64::INFINITY);
        assert!(result.render_comparison().contains("Improvement: infX faster"));
    }

    #[test]
    fn test_zero_baseline_time_saves_nothing() {
        let result = BenchmarkResult::new("agg", timed(0.0), timed(10.0));
        assert_eq!(result.time_savings_pct(), 0.0);
    }

    #[test]
    fn test_scan_savings_need_both_sides() {
        let baseline = timed(10.0).with_scan_stats(Some(1_000), Some(4_000));
        let optimized = timed(5.0).with_scan_stats(None, Some(1_000));
        let result = BenchmarkResult::new("agg", baseline, optimized);

        assert_eq!(result.rows_savings_pct(), 0.0);
        assert_eq!(result.bytes_savings_pct(), 75.0);
    }

    #[test]
    fn test_scan_savings_zero_counts() {
        let baseline = timed(10.0).with_scan_stats(Some(0), Some(100));
        let optimized = timed(5.0).with_scan_stats(Some(10), Some(0));
        let result = BenchmarkResult::new("agg", baseline, optimized);

        assert_eq!(result.rows_savings_pct(), 0.0);
        assert_eq!(result.bytes_savings_pct(), 0.0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(None), "N/A");
        assert_eq!(format_bytes(Some(512)), "512 B");
        assert_eq!(format_bytes(Some(1_500)), "1.50 KB");
        assert_eq!(format_bytes(Some(2_500_000)), "2.50 MB");
        assert_eq!(format_bytes(Some(3_000_000_000)), "3.00 GB");
    }

    #[test]
    fn test_format_rows() {
        assert_eq!(format_rows(None), "N/A");
        assert_eq!(format_rows(Some(999)), "999");
        assert_eq!(format_rows(Some(1_500)), "1.5K");
        assert_eq!(format_rows(Some(12_300_000)), "12.3M");
    }

    #[test]
    fn test_render_comparison() {
        let baseline = timed(1234.4).with_scan_stats(Some(2_000_000), Some(5_000_000));
        let optimized = timed(20.0).with_scan_stats(Some(1_000), Some(40_000));
        let report = BenchmarkResult::new("Tournament Leaderboard", baseline, optimized)
            .render_comparison();

        assert!(report.contains("Feature Benchmark: Tournament Leaderboard"));
        assert!(report.contains(&"=".repeat(BANNER_WIDTH)));
        assert!(report.contains("│ Query Time   │ 1234 ms │ 20 ms    │ 98.4%   │"));
        assert!(report.contains("2.0M"));
        assert!(report.contains("1.0K"));
        assert!(report.contains("5.00 MB"));
        assert!(report.contains("40.00 KB"));
        assert!(report.contains("Improvement: 62X faster"));
    }
}
