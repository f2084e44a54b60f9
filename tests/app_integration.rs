use splitbook::AppCommand;
use splitbook::core::config::AppConfig;
use splitbook::core::query::ExpenseQuery;
use splitbook::core::{compute_balances, compute_settlements};
use std::fs;
use tracing::info;

mod test_utils {
    use std::fs;

    pub const LEDGER: &str = r#"
currency: "$"
current_user: "1"
participants:
  - id: "1"
    name: "You"
  - id: "2"
    name: "Alex"
  - id: "3"
    name: "Sam"
expenses:
  - id: "1"
    description: "Cabin"
    amount: 90.0
    date: 2023-06-15
    paid_by: "1"
    shares:
      - { participant: "1", amount: 30.0, paid: true }
      - { participant: "2", amount: 30.0 }
      - { participant: "3", amount: 30.0 }
  - id: "2"
    description: "Old trip"
    amount: 400.0
    date: 2023-01-02
    paid_by: "2"
    settled: true
    shares:
      - { participant: "1", amount: 200.0 }
      - { participant: "2", amount: 200.0, paid: true }
"#;

    pub fn write_ledger(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        fs::write(file.path(), content).expect("Failed to write ledger file");
        file
    }
}

#[test_log::test]
fn test_ledger_to_settlements_flow() {
    let file = test_utils::write_ledger(test_utils::LEDGER);
    let config = AppConfig::load_from_path(file.path()).expect("Failed to load ledger");

    let balances = compute_balances(&config.ledger.expenses, &config.ledger.participants)
        .expect("Failed to compute balances");
    let settlements = compute_settlements(&balances).expect("Failed to plan settlements");
    info!(?balances, ?settlements, "Computed ledger");

    let pairs: Vec<_> = settlements
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str(), s.amount))
        .collect();
    assert_eq!(pairs, vec![("2", "1", 30.0), ("3", "1", 30.0)]);
}

#[test_log::test]
fn test_all_commands_run_against_ledger_file() {
    let file = test_utils::write_ledger(test_utils::LEDGER);
    let path = file.path().to_str().unwrap();

    for command in [
        AppCommand::Balances { json: false },
        AppCommand::Balances { json: true },
        AppCommand::Expenses(ExpenseQuery::default()),
        AppCommand::Friends,
        AppCommand::Check,
    ] {
        let result = splitbook::run_command(command.clone(), Some(path));
        assert!(
            result.is_ok(),
            "{command:?} failed with: {:?}",
            result.err()
        );
    }
}

#[test_log::test]
fn test_empty_ledger_runs() {
    let file = test_utils::write_ledger("participants: []\nexpenses: []\n");
    let path = file.path().to_str().unwrap();

    assert!(splitbook::run_command(AppCommand::Balances { json: false }, Some(path)).is_ok());
    assert!(splitbook::run_command(AppCommand::Friends, Some(path)).is_ok());
}

#[test_log::test]
fn test_invalid_amount_is_reported() {
    let ledger = r#"
participants:
  - id: "1"
    name: "You"
expenses:
  - id: "1"
    description: "Broken"
    amount: 10.0
    date: 2023-06-15
    paid_by: "1"
    shares:
      - { participant: "2", amount: -10.0 }
"#;
    let file = test_utils::write_ledger(ledger);
    let result = splitbook::run_command(
        AppCommand::Balances { json: false },
        Some(file.path().to_str().unwrap()),
    );

    let err = result.expect_err("Negative share should be rejected");
    assert!(format!("{err:#}").contains("invalid amount"));
}

#[test_log::test]
fn test_malformed_ledger_fails_to_parse() {
    let file = test_utils::write_ledger("participants: {not: [a, list]\n");
    let err = splitbook::run_command(AppCommand::Friends, Some(file.path().to_str().unwrap()))
        .expect_err("Malformed YAML should fail");
    assert!(err.to_string().contains("Failed to parse ledger file"));
}

#[test_log::test]
fn test_setup_then_load() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("ledger.yaml");

    splitbook::cli::setup::setup_at_path(&path).expect("Setup failed");
    let content = fs::read_to_string(&path).expect("Failed to read ledger");
    assert!(content.contains("current_user"));

    let result = splitbook::run_command(
        AppCommand::Balances { json: false },
        Some(path.to_str().unwrap()),
    );
    assert!(result.is_ok(), "Balances failed with: {:?}", result.err());
}
