use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness running the CLI inside a temporary working directory
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    /// Create a new test harness with an empty working directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gymsched").expect("Failed to find gymsched binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("GYMSCHED_LOG");
        cmd
    }

    /// Write a file into the working directory and return its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common rule documents
pub struct TestFixtures;

impl TestFixtures {
    pub fn weekly_rule() -> &'static str {
        r#"{
            "frequency": "weekly",
            "start": "2024-01-01",
            "end_type": "never",
            "title": "Yoga Flow",
            "selected_weekdays": [
                {"day_of_week": "monday", "start_time": "09:00", "end_time": "10:00"}
            ]
        }"#
    }

    pub fn monthly_rule() -> &'static str {
        r#"{
            "frequency": "monthly",
            "start": "2024-01-01",
            "end": "2024-12-31",
            "end_type": "on",
            "week_number": [1, -1],
            "selected_weekdays": [
                {"day_of_week": "tuesday", "start_time": "18:00", "end_time": "19:00"}
            ]
        }"#
    }

    pub fn invalid_yearly_rule() -> &'static str {
        r#"{
            "frequency": "yearly",
            "start": "2024-01-01",
            "selected_months": [],
            "selected_weekdays": []
        }"#
    }
}
