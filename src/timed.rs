//! Statement-by-statement timing of a SQL script.

use crate::runner::Runner;
use crate::script::split_statements;

/// Outcome of one timed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedStatement {
    pub label: String,
    /// Execution time in milliseconds, or the error text.
    pub outcome: Result<f64, String>,
}

/// Executes every statement of `sql` with the result cache disabled.
///
/// A failing statement is recorded and the run continues with the next one.
/// Each line is printed as soon as its statement finishes.
pub async fn run_timed(runner: &mut Runner, sql: &str) -> Vec<TimedStatement> {
    let mut timings = Vec::new();

    for (i, (label, statement)) in split_statements(sql).into_iter().enumerate() {
        let outcome = runner
            .execute(&statement, true)
            .await
            .map(|r| r.execution_time_ms)
            .map_err(|e| e.to_string());

        let timed = TimedStatement { label, outcome };
        println!("{}", render_line(i + 1, &timed));
        timings.push(timed);
    }

    timings
}

/// Renders one progress line: index, time or `ERROR`, label.
pub fn render_line(index: usize, timed: &TimedStatement) -> String {
    match &timed.outcome {
        Ok(ms) => format!("  [{index}] {:>10} ms  {}", group_thousands(*ms), timed.label),
        Err(e) => format!("  [{index}]    ERROR  {}\n         {e}", timed.label),
    }
}

/// Renders the summary of successful statements.
pub fn render_summary(timings: &[TimedStatement]) -> String {
    let mut out = String::from("\n--- Summary (query times in ms) ---\n");
    for timed in timings {
        if let Ok(ms) = timed.outcome {
            let label: String = timed.label.chars().take(60).collect();
            out.push_str(&format!("  {:>10}  {label}\n", group_thousands(ms)));
        }
    }
    out
}

/// Rounds to whole milliseconds and inserts `,` between digit groups.
fn group_thousands(ms: f64) -> String {
    let digits = format!("{:.0}", ms.abs());
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if ms < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}
