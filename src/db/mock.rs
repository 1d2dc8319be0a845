//! Mock backend for testing.
//!
//! Returns scripted timings without any network access and records every
//! dispatched statement, so runner and benchmark logic can be checked
//! deterministically.

use super::{Backend, QueryResult, Row};
use crate::error::{BenchError, Result};
use crate::runtime::Runtime;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Timing used once the scripted timings run out.
const DEFAULT_TIME_MS: f64 = 1.0;

/// A statement the mock backend received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// SQL text as passed to `execute`.
    pub sql: String,
    /// Whether the result cache was disabled for this call.
    pub disable_cache: bool,
}

/// A backend that returns predefined results.
///
/// Clones share the call log, so a test can keep one handle while the
/// runner owns another.
#[derive(Debug, Clone)]
pub struct MockBackend {
    runtime: Runtime,
    timings: Arc<Mutex<VecDeque<f64>>>,
    failures: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    closes: Arc<Mutex<usize>>,
}

impl MockBackend {
    /// Creates a mock backend reporting the given runtime.
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            timings: Arc::new(Mutex::new(VecDeque::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            closes: Arc::new(Mutex::new(0)),
        }
    }

    /// Queues execution times, consumed one per call in order.
    pub fn with_timings(self, timings: impl IntoIterator<Item = f64>) -> Self {
        lock(&self.timings).extend(timings);
        self
    }

    /// Makes every statement containing `pattern` fail with a query error.
    pub fn failing_on(self, pattern: impl Into<String>) -> Self {
        lock(&self.failures).push(pattern.into());
        self
    }

    /// Returns all calls received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Returns the SQL of all calls received so far.
    pub fn statements(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.sql.clone()).collect()
    }

    /// Returns how many times `close` was called.
    pub fn close_count(&self) -> usize {
        *lock(&self.closes)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(Runtime::Core)
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn runtime(&self) -> Runtime {
        self.runtime
    }

    async fn execute(&mut self, sql: &str, disable_cache: bool) -> Result<QueryResult> {
        lock(&self.calls).push(RecordedCall {
            sql: sql.to_string(),
            disable_cache,
        });

        let execution_time_ms = lock(&self.timings).pop_front().unwrap_or(DEFAULT_TIME_MS);

        if lock(&self.failures).iter().any(|p| sql.contains(p.as_str())) {
            return Err(BenchError::query(format!("Query failed: mock failure for: {sql}")));
        }

        let columns = vec!["call".to_string()];
        let call = lock(&self.calls).len().to_string();
        let rows = vec![Row::zip(&columns[..], [call])];

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time_ms))
    }

    async fn close(&mut self) -> Result<()> {
        *lock(&self.closes) += 1;
        Ok(())
    }
}

// A poisoned lock only means another test thread panicked; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockBackend::default();
        let mut backend = mock.clone();

        backend.execute("SELECT 1", true).await.unwrap();
        backend.execute("SELECT 2", false).await.unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                RecordedCall {
                    sql: "SELECT 1".to_string(),
                    disable_cache: true
                },
                RecordedCall {
                    sql: "SELECT 2".to_string(),
                    disable_cache: false
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_scripted_timings() {
        let mut backend = MockBackend::default().with_timings([5.0, 7.5]);

        assert_eq!(backend.execute("a", false).await.unwrap().execution_time_ms, 5.0);
        assert_eq!(backend.execute("b", false).await.unwrap().execution_time_ms, 7.5);
        assert_eq!(
            backend.execute("c", false).await.unwrap().execution_time_ms,
            DEFAULT_TIME_MS
        );
    }

    #[tokio::test]
    async fn test_mock_failure_pattern() {
        let mut backend = MockBackend::default().failing_on("DROP");
        let err = backend.execute("DROP INDEX x", false).await.unwrap_err();
        assert!(err.to_string().contains("mock failure"));
        assert!(backend.execute("SELECT 1", false).await.is_ok());
    }
}
