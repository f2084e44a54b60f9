use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use splitbook::core::log::init_logging;
use splitbook::core::query::{ExpenseQuery, SortDirection, SortKey};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the ledger file
    #[arg(short, long, global = true)]
    ledger_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Title,
    Amount,
    Date,
    PaidBy,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> SortKey {
        match arg {
            SortArg::Title => SortKey::Title,
            SortArg::Amount => SortKey::Amount,
            SortArg::Date => SortKey::Date,
            SortArg::PaidBy => SortKey::PaidBy,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an example ledger file
    Setup,
    /// Display balances and suggested settlements
    Balances {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List expenses
    Expenses {
        /// Only show expenses whose description or payer matches
        #[arg(short, long)]
        search: Option<String>,
        /// Column to sort by
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,
        /// Sort in ascending order (default for every column but date)
        #[arg(long, conflicts_with = "desc")]
        asc: bool,
        /// Sort in descending order (default for date, newest first)
        #[arg(long)]
        desc: bool,
    },
    /// List participants with their net balance
    Friends,
    /// Check expense shares and the settlement plan
    Check,
}

impl From<Commands> for splitbook::AppCommand {
    fn from(cmd: Commands) -> splitbook::AppCommand {
        match cmd {
            Commands::Balances { json } => splitbook::AppCommand::Balances { json },
            Commands::Expenses {
                search,
                sort,
                asc,
                desc,
            } => splitbook::AppCommand::Expenses(ExpenseQuery {
                search,
                sort_by: sort.into(),
                direction: match (asc, desc) {
                    (true, _) => Some(SortDirection::Asc),
                    (_, true) => Some(SortDirection::Desc),
                    _ => None,
                },
            }),
            Commands::Friends => splitbook::AppCommand::Friends,
            Commands::Check => splitbook::AppCommand::Check,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let command = cli
        .command
        .unwrap_or(Commands::Balances { json: false });
    let result = match command {
        Commands::Setup => match cli.ledger_path.as_deref() {
            Some(path) => splitbook::cli::setup::setup_at_path(path),
            None => splitbook::cli::setup::setup(),
        },
        cmd => splitbook::run_command(cmd.into(), cli.ledger_path.as_deref()),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
