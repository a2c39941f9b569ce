use clap::Parser;

use truth_table::report::generate_truth_table_to;
use truth_table::table::{TableConfig, DEFAULT_MAX_VARIABLES};

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate a truth table from a Boolean expression like A'B+C or WXYZ.")]
struct Cli {
    /// Boolean expression using + (OR), ^ (XOR), ' (NOT), implicit AND.
    #[arg(value_name = "EXPR")]
    expr: String,

    /// Enable Karnaugh map display for 2 to 4 variables.
    #[arg(short = 'k', long)]
    karnaugh: bool,

    /// Maximum number of distinct variables.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_MAX_VARIABLES)]
    max_vars: usize,

    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let config = TableConfig {
        max_variables: args.max_vars,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    generate_truth_table_to(&mut out, &args.expr, args.karnaugh, &config)?;

    Ok(())
}
