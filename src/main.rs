use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use vfilter::cli::{self, CheckOptions, CheckResult, CliError, ConvertOptions};

#[derive(ClapParser)]
#[command(name = "vfilter")]
#[command(about = "vfilter - Check and translate filter expressions for vector-store queries")]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter
    Check {
        /// The filter (reads from stdin if not provided)
        filter: Option<String>,

        /// Only validate syntax, skip semantic checks
        #[arg(long)]
        syntax_only: bool,
    },

    /// Translate a filter into backend JSON
    Convert {
        /// The filter (reads from stdin if not provided)
        filter: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print a filter in canonical form
    Format {
        /// The filter (reads from stdin if not provided)
        filter: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'vfilter docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { filter, syntax_only } => run_check(filter, syntax_only),
        Commands::Convert { filter, pretty } => run_convert(filter, pretty),
        Commands::Format { filter } => run_format(filter),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_filter(filter: Option<String>) -> Result<String, CliError> {
    match filter {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(filter: Option<String>, syntax_only: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        filter: read_filter(filter)?,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(_) => println!("Syntax is valid"),
        CheckResult::Valid(_) => println!("Filter is valid"),
    }
    Ok(())
}

fn run_convert(filter: Option<String>, pretty: bool) -> Result<(), CliError> {
    let options = ConvertOptions {
        filter: read_filter(filter)?,
        pretty,
    };
    println!("{}", cli::execute_convert(&options)?);
    Ok(())
}

fn run_format(filter: Option<String>) -> Result<(), CliError> {
    println!("{}", cli::execute_format(&read_filter(filter)?)?);
    Ok(())
}
