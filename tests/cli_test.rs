use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/journey.csv")
        .arg("--today")
        .arg("2025-12-10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "destination,single,return,sales,takings",
        ))
        // Christmas Sale takes 20% off London
        .stdout(predicate::str::contains("London,25.50,45.00,1,20.40"))
        // First Manchester attempt is short, the retry goes through at full fare
        .stdout(predicate::str::contains("Manchester,32.00,58.00,1,58.00"))
        .stdout(predicate::str::contains("Bristol,20.00,38.00,0,0.00"))
        .stderr(predicate::str::contains(
            "Insufficient funds: 48.00 more required",
        ));

    Ok(())
}

#[test]
fn test_cli_rejects_bad_today() {
    let mut cmd = Command::new(cargo_bin!("railfare"));
    cmd.arg("tests/fixtures/journey.csv")
        .arg("--today")
        .arg("10/12/2025");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_missing_script() {
    let mut cmd = Command::new(cargo_bin!("railfare"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
