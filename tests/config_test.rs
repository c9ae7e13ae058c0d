use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"{
    "originStation": "Cambridge",
    "users": [
        { "username": "ops", "password": "s3cret", "isAdmin": true }
    ],
    "destinations": [
        { "name": "Ely", "singlePrice": "5.20", "returnPrice": "9.00" },
        { "name": "Norwich", "singlePrice": "18.00", "returnPrice": "30.00" }
    ],
    "offers": [
        {
            "name": "Fen Saver",
            "station": "Ely",
            "discount": "10",
            "startDate": "2026-04-01",
            "endDate": "2026-04-30"
        }
    ]
}"#;

#[test]
fn test_custom_config_replaces_seed() {
    let mut config = NamedTempFile::new().unwrap();
    config.write_all(CONFIG.as_bytes()).unwrap();

    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "action, a, b, c").unwrap();
    writeln!(script, "insert, 10").unwrap();
    writeln!(script, "buy, Ely, Single").unwrap();
    writeln!(script, "buy, London, Single").unwrap();
    writeln!(script, "login, ops, s3cret").unwrap();
    writeln!(script, "adjust_prices, 1.1").unwrap();

    let mut cmd = Command::new(cargo_bin!("railfare"));
    cmd.arg(script.path())
        .arg("--config")
        .arg(config.path())
        .arg("--today")
        .arg("2026-04-10");

    // 5.20 less 10% is 4.68; prices then rise to 5.72/9.90 and 19.80/33.00
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ely,5.72,9.90,1,4.68"))
        .stdout(predicate::str::contains("Norwich,19.80,33.00,0,0.00"))
        .stdout(predicate::str::contains("London").not())
        .stderr(predicate::str::contains("Destination 'London' not found"));
}

#[test]
fn test_config_with_invalid_offer_is_rejected() {
    let broken = CONFIG.replace("\"discount\": \"10\"", "\"discount\": \"150\"");
    let mut config = NamedTempFile::new().unwrap();
    config.write_all(broken.as_bytes()).unwrap();

    let mut cmd = Command::new(cargo_bin!("railfare"));
    cmd.arg("tests/fixtures/journey.csv")
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Discount percentage must be in (0, 100]"));
}
