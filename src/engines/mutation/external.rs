//! External mutation tool integration: materializes a test module for the
//! suite, runs the tool under a wall-clock limit and reads its report.

use super::fallback::FallbackOracle;
use super::report::{parse_report, ReportCounts};
use super::suite::PreparedSuite;
use super::{MutationOracle, MutationResult};
use crate::config::MutationConfig;
use crate::error::{EvobugError, Result};
use crate::problems::ProblemAdapter;
use crate::types::{Genome, Output};
use serde::Serialize;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

pub const TEST_MODULE_NAME: &str = "generated_mutation_tests";
pub const REPORT_FILE_NAME: &str = "mutation_report.yml";
/// Search path handed to the tool, joined like `PATH`
pub const SEARCH_PATH_VAR: &str = "EVOBUG_TEST_PATH";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Serialize)]
struct TestModule<'a> {
    target: &'a str,
    test_class: &'static str,
    cases: Vec<TestCase<'a>>,
}

#[derive(Serialize)]
struct TestCase<'a> {
    name: String,
    args: &'a Genome,
    expected: Expectation<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Expectation<'a> {
    Equals(&'a Output),
    Raises(&'a str),
}

struct ProcessOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

pub struct ExternalOracle {
    tool: String,
    timeout: Duration,
    extra_search_paths: Vec<PathBuf>,
    fallback: FallbackOracle,
}

impl ExternalOracle {
    pub fn new(tool: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            timeout,
            extra_search_paths: Vec::new(),
            fallback: FallbackOracle::new(),
        }
    }

    pub fn from_config(config: &MutationConfig) -> Self {
        Self::new(config.tool.clone(), Duration::from_secs(config.timeout_secs))
            .with_search_paths(config.extra_search_paths.clone())
    }

    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.extra_search_paths = paths;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackOracle) -> Self {
        self.fallback = fallback;
        self
    }

    fn run_backend(&self, problem: &dyn ProblemAdapter, suite: &PreparedSuite) -> Result<ReportCounts> {
        let tool = resolve_tool(&self.tool)
            .ok_or_else(|| EvobugError::BackendUnavailable(self.tool.clone()))?;

        // Removed on drop, on every return path below
        let dir = tempfile::Builder::new().prefix("mutation_tests_").tempdir()?;
        let module_path = dir.path().join(format!("{}.json", TEST_MODULE_NAME));
        let report_path = dir.path().join(REPORT_FILE_NAME);
        write_test_module(&module_path, problem.id(), suite)?;

        let cwd = std::env::current_dir()?;
        let mut search_paths = vec![dir.path().to_path_buf(), cwd];
        search_paths.extend(self.extra_search_paths.iter().cloned());

        let mut cmd = Command::new(&tool);
        cmd.arg("--target")
            .arg(problem.id())
            .arg("--unit-test")
            .arg(TEST_MODULE_NAME);
        for path in &search_paths {
            cmd.arg("--path").arg(path);
        }
        cmd.arg("--report").arg(&report_path).arg("--quiet");
        if let Ok(joined) = std::env::join_paths(&search_paths) {
            cmd.env(SEARCH_PATH_VAR, joined);
        }

        log::debug!(
            "{}: running {} over {} inputs",
            problem.id(),
            tool.display(),
            suite.len()
        );
        let output = run_with_timeout(cmd, self.timeout)?;

        if !output.status.success() {
            let reason = match output.status.code() {
                Some(code) => format!("returncode_{}", code),
                None => "terminated_by_signal".to_string(),
            };
            return Err(report_error(reason, output));
        }
        if !report_path.exists() {
            return Err(report_error("missing_report".to_string(), output));
        }

        let contents = match std::fs::read_to_string(&report_path) {
            Ok(contents) => contents,
            Err(e) => return Err(report_error(format!("report_read_error:{}", e), output)),
        };
        parse_report(&contents)
            .map_err(|e| report_error(format!("report_parse_error:{}", e), output))
    }
}

impl MutationOracle for ExternalOracle {
    fn name(&self) -> &'static str {
        "external"
    }

    fn score_suite(&self, problem: &dyn ProblemAdapter, suite: &PreparedSuite) -> MutationResult {
        match self.run_backend(problem, suite) {
            Ok(counts) if counts.total == 0 || counts.killed == 0 => {
                log::info!(
                    "{}: external tool inconclusive ({}/{}), rescoring with fallback",
                    problem.id(),
                    counts.killed,
                    counts.total
                );
                MutationResult {
                    augmented: true,
                    ..self.fallback.score_suite(problem, suite)
                }
            }
            Ok(counts) => MutationResult::from_counts(counts.killed, counts.total, false),
            Err(EvobugError::BackendUnavailable(tool)) => {
                log::debug!("{}: {} not found, using fallback", problem.id(), tool);
                self.fallback.score_suite(problem, suite)
            }
            Err(EvobugError::BackendTimeout(secs)) => {
                log::warn!("{}: external tool timed out after {}s", problem.id(), secs);
                MutationResult::timeout()
            }
            Err(EvobugError::BackendReport {
                reason,
                stdout,
                stderr,
            }) => {
                log::warn!("{}: external tool failed ({}), using fallback", problem.id(), reason);
                MutationResult {
                    error: Some(reason),
                    stdout: Some(stdout),
                    stderr: Some(stderr),
                    ..self.fallback.score_suite(problem, suite)
                }
            }
            Err(other) => {
                log::warn!("{}: external run failed ({}), using fallback", problem.id(), other);
                MutationResult {
                    error: Some(other.to_string()),
                    ..self.fallback.score_suite(problem, suite)
                }
            }
        }
    }
}

fn report_error(reason: String, output: ProcessOutput) -> EvobugError {
    EvobugError::BackendReport {
        reason,
        stdout: output.stdout,
        stderr: output.stderr,
    }
}

/// Locate an executable by path, or by name on `PATH`
pub fn resolve_tool(tool: &str) -> Option<PathBuf> {
    let candidate = Path::new(tool);
    if candidate.is_absolute() || candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(tool))
        .find(|p| p.is_file())
}

fn write_test_module(path: &Path, target: &str, suite: &PreparedSuite) -> Result<()> {
    let cases = suite
        .cases()
        .iter()
        .enumerate()
        .map(|(idx, case)| TestCase {
            name: format!("test_case_{}", idx),
            args: &case.input,
            expected: match &case.expected {
                Ok(output) => Expectation::Equals(output),
                Err(fault) => Expectation::Raises(&fault.kind),
            },
        })
        .collect();
    let module = TestModule {
        target,
        test_class: "GeneratedTests",
        cases,
    };
    std::fs::write(path, serde_json::to_string_pretty(&module)?)?;
    Ok(())
}

/// Read a pipe to the end on its own thread; the text arrives on the channel
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Wait for a drained pipe until `deadline`. A pipe still open at the
/// deadline (a background process inherited it) counts as a timeout.
fn collect_output(rx: &Receiver<String>, deadline: Instant, timeout: Duration) -> Result<String> {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(text) => Ok(text),
        Err(RecvTimeoutError::Timeout) => Err(EvobugError::BackendTimeout(timeout.as_secs())),
        Err(RecvTimeoutError::Disconnected) => Ok(String::new()),
    }
}

fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<ProcessOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(EvobugError::BackendUnavailable(format!(
                "{:?}",
                cmd.get_program()
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            break None;
        }
        thread::sleep(POLL_INTERVAL);
    };

    // Reader threads left behind here finish once the pipes close
    let Some(status) = status else {
        return Err(EvobugError::BackendTimeout(timeout.as_secs()));
    };

    Ok(ProcessOutput {
        status,
        stdout: collect_output(&stdout_rx, deadline, timeout)?,
        stderr: collect_output(&stderr_rx, deadline, timeout)?,
    })
}
