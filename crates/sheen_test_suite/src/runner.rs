//! Test runner for executing test suites
//!
//! Manages test execution, result collection, and reporting.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::harness::{TestContext, TestHarness, TestResult};

type TestFn = Box<dyn FnOnce(&mut TestContext) + Send>;

/// A single test case
pub struct TestCase {
    /// Test name
    pub name: String,
    /// Test category
    pub category: String,
    /// Test function
    pub test_fn: TestFn,
    /// Viewport override (None = harness default)
    pub size: Option<(f32, f32)>,
}

impl TestCase {
    pub fn new<F>(name: &str, category: &str, test_fn: F) -> Self
    where
        F: FnOnce(&mut TestContext) + Send + 'static,
    {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            test_fn: Box::new(test_fn),
            size: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}::{}", self.category, self.name)
    }

    fn matches(&self, pattern: &str) -> bool {
        self.name.contains(pattern) || self.category.contains(pattern)
    }
}

/// Result of running a test
pub struct TestRun {
    /// Test name
    pub name: String,
    /// Test category
    pub category: String,
    /// Test result
    pub result: TestResult,
    /// Time taken
    pub duration: Duration,
}

impl TestRun {
    pub fn is_passed(&self) -> bool {
        self.result.is_passed()
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.result, TestResult::Skipped { .. })
    }
}

/// Test suite containing multiple test cases
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Test cases
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cases: Vec::new(),
        }
    }

    pub fn add<F>(&mut self, name: &str, test_fn: F) -> &mut Self
    where
        F: FnOnce(&mut TestContext) + Send + 'static,
    {
        self.cases.push(TestCase::new(name, &self.name, test_fn));
        self
    }

    /// Add a test case with its own viewport size
    pub fn add_sized<F>(&mut self, name: &str, width: f32, height: f32, test_fn: F) -> &mut Self
    where
        F: FnOnce(&mut TestContext) + Send + 'static,
    {
        let mut case = TestCase::new(name, &self.name, test_fn);
        case.size = Some((width, height));
        self.cases.push(case);
        self
    }
}

/// Test runner for executing suites
pub struct TestRunner {
    /// Test harness
    harness: TestHarness,
    /// Test suites to run
    suites: Vec<TestSuite>,
    /// Filter pattern (None = run all)
    filter: Option<String>,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new() -> Result<Self> {
        Ok(Self::with_harness(TestHarness::new()?))
    }

    /// Create with custom harness
    pub fn with_harness(harness: TestHarness) -> Self {
        Self {
            harness,
            suites: Vec::new(),
            filter: None,
        }
    }

    /// Add a test suite
    pub fn add_suite(&mut self, suite: TestSuite) -> &mut Self {
        self.suites.push(suite);
        self
    }

    /// Set a filter pattern
    pub fn filter(&mut self, pattern: &str) -> &mut Self {
        self.filter = Some(pattern.to_string());
        self
    }

    /// Run all tests
    pub fn run(&mut self) -> RunResult {
        let start = Instant::now();
        let mut results = Vec::new();

        for suite in self.suites.drain(..) {
            tracing::info!("Running suite: {}", suite.name);

            for case in suite.cases {
                if let Some(ref pattern) = self.filter {
                    if !case.matches(pattern) {
                        continue;
                    }
                }

                let test_start = Instant::now();
                let full_name = case.full_name();
                tracing::debug!("Running test: {}", full_name);

                let outcome = match case.size {
                    Some((width, height)) => {
                        self.harness
                            .run_test_with_size(&full_name, width, height, case.test_fn)
                    }
                    None => self.harness.run_test(&full_name, case.test_fn),
                };
                let result = outcome.unwrap_or_else(|e| {
                    tracing::error!("Test {} failed with error: {:#}", full_name, e);
                    TestResult::Failed {
                        difference: 1.0,
                        diff_path: self.harness.diff_path(&full_name),
                    }
                });

                let duration = test_start.elapsed();
                match &result {
                    TestResult::Skipped { reason } => {
                        tracing::warn!("  - {} skipped: {}", case.name, reason)
                    }
                    r if r.is_passed() => tracing::info!("  ✓ {} ({:?})", case.name, duration),
                    _ => tracing::error!("  ✗ {} ({:?})", case.name, duration),
                }

                results.push(TestRun {
                    name: case.name,
                    category: case.category,
                    result,
                    duration,
                });
            }
        }

        RunResult::new(results, start.elapsed())
    }

    /// Get the harness
    pub fn harness(&self) -> &TestHarness {
        &self.harness
    }
}

/// Results from running tests
pub struct RunResult {
    /// Individual test results
    pub results: Vec<TestRun>,
    /// Total time taken
    pub duration: Duration,
}

impl RunResult {
    pub fn new(results: Vec<TestRun>, duration: Duration) -> Self {
        Self { results, duration }
    }

    /// Count of passed tests
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_passed()).count()
    }

    /// Count of skipped tests
    pub fn skipped(&self) -> usize {
        self.results.iter().filter(|r| r.is_skipped()).count()
    }

    /// Count of failed tests
    pub fn failed(&self) -> usize {
        self.total() - self.passed() - self.skipped()
    }

    /// Total test count
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// No test failed (skips are not failures)
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Get results by category
    pub fn by_category(&self) -> HashMap<String, Vec<&TestRun>> {
        let mut map: HashMap<String, Vec<&TestRun>> = HashMap::new();
        for result in &self.results {
            map.entry(result.category.clone()).or_default().push(result);
        }
        map
    }

    /// Print summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════╗");
        println!("║           TEST RESULTS SUMMARY           ║");
        println!("╠══════════════════════════════════════════╣");
        println!("║  Passed:  {:>5}                          ║", self.passed());
        println!("║  Failed:  {:>5}                          ║", self.failed());
        println!("║  Skipped: {:>5}                          ║", self.skipped());
        println!("║  Total:   {:>5}                          ║", self.total());
        println!("║  Time:    {:>8.2?}                      ║", self.duration);
        println!("╚══════════════════════════════════════════╝");

        if self.failed() > 0 {
            println!("\nFailed tests:");
            for result in &self.results {
                if !result.is_passed() && !result.is_skipped() {
                    println!("  ✗ {}::{}", result.category, result.name);
                }
            }
        }
    }
}
