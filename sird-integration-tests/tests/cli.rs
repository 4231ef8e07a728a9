#[cfg(test)]
mod tests {
    use assert_cmd::cargo::CargoError;
    use std::path::PathBuf;
    use tempfile::tempdir;

    pub fn run_external_runner(runner_name: &str) -> Result<assert_cmd::Command, CargoError> {
        assert_cmd::Command::cargo_bin(runner_name)
    }

    fn scenario_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("tests")
            .join("data")
            .join("quarantined_groups.json")
    }

    #[test]
    fn default_scenario_runs_one_hundred_days() {
        let output = run_external_runner("runner_test_two_groups")
            .unwrap()
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.starts_with("day=100 "), "unexpected output: {stdout}");
    }

    #[test]
    fn days_can_be_overridden() {
        run_external_runner("runner_test_two_groups")
            .unwrap()
            .args(["--days", "0"])
            .assert()
            .success()
            .stdout("day=0 S=10998.000 I=2.000 R=0.000 D=0.000\n");
    }

    #[test]
    fn command_line_args_sets_level() {
        run_external_runner("runner_test_two_groups")
            .unwrap()
            .args(["--log-level=trace", "--days", "2"])
            .assert()
            .success();
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        run_external_runner("runner_test_two_groups")
            .unwrap()
            .args(["--log-level=loud"])
            .assert()
            .failure();
    }

    #[test]
    fn scenario_file_and_report() {
        let temp_dir = tempdir().unwrap();
        run_external_runner("runner_test_two_groups")
            .unwrap()
            .args([
                "--config",
                scenario_path().to_str().unwrap(),
                "--output-dir",
                temp_dir.path().to_str().unwrap(),
            ])
            .assert()
            .success();

        let report = temp_dir.path().join("sird_report.csv");
        let mut reader = csv::Reader::from_path(report).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "day",
                "population",
                "susceptible",
                "infected",
                "recovered",
                "deceased",
                "active_infected"
            ]
        );
        // 61 days of city, town and total rows
        assert_eq!(reader.records().count(), 61 * 3);
    }

    #[test]
    fn vaccination_from_custom_args() {
        run_external_runner("runner_test_vaccination")
            .unwrap()
            .args(["--days", "0", "--target", "group2", "--count", "100"])
            .assert()
            .success()
            .stdout("group1 R=0.000\ngroup2 R=0.000\n");

        let output = run_external_runner("runner_test_vaccination")
            .unwrap()
            .args(["--days", "1", "--target", "group2", "--count", "100"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("group2 R=100.100"), "unexpected output: {stdout}");
    }

    #[test]
    fn vaccination_of_unknown_population_fails() {
        run_external_runner("runner_test_vaccination")
            .unwrap()
            .args(["--target", "group3", "--count", "100"])
            .assert()
            .failure();
    }
}
