use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use gpa_calc::config::{Config, OutputFormat};
use gpa_calc::gpa::{GpaResult, GradeTable, RowInput};
use gpa_calc::output;
use gpa_calc::session::Session;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 3;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enter subjects one by one (default if no subcommand)
    Interactive,
    /// Calculate from rows given on the command line
    Compute {
        /// Row as MARKS:SUBJECT:CREDIT, e.g. 90:Java:4 (repeat for each subject)
        #[arg(short, long = "row", required = true, allow_hyphen_values = true)]
        rows: Vec<String>,
    },
    /// Calculate from a YAML sheet of rows
    Sheet {
        /// Path to the sheet file
        path: PathBuf,
    },
    /// Show the grading scale
    Scale,
}

#[derive(Parser, Debug)]
#[command(name = "gpa-calc")]
#[command(about = "Credit-weighted GPA calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gpa-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Interactive);
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);
    if cli.verbose {
        match &config_path {
            Some(path) => eprintln!("Config: {}", path.display()),
            None => eprintln!("Config: default location"),
        }
    }
    let config = match gpa_calc::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let format = cli.format.unwrap_or(config.format);
    let use_colors = !cli.no_color && config.color.enabled(output::should_use_colors());

    if cli.verbose {
        eprintln!(
            "Format: {:?}, colors: {}, breakdown: {}",
            format, use_colors, config.breakdown
        );
    }

    match command {
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut prompter = gpa_calc::prompt::Prompter::new(
                stdin.lock(),
                stdout.lock(),
                use_colors,
                config.breakdown,
            );
            if let Err(e) = prompter.run() {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Compute { rows } => {
            let mut inputs = Vec::with_capacity(rows.len());
            let mut parse_errors = Vec::new();
            for row in &rows {
                match RowInput::parse_arg(row) {
                    Ok(input) => inputs.push(input),
                    Err(e) => parse_errors.push(e),
                }
            }
            if !parse_errors.is_empty() {
                for e in parse_errors {
                    eprintln!("  - {}", e);
                }
                std::process::exit(EXIT_INVALID_INPUT);
            }
            run_batch(inputs, format, use_colors, &config, cli.verbose);
        }
        Commands::Sheet { path } => {
            let inputs = match gpa_calc::sheet::load_sheet(&path) {
                Ok(rows) => rows,
                Err(e) => {
                    eprintln!("Sheet error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if cli.verbose {
                eprintln!("Loaded {} rows from {}", inputs.len(), path.display());
            }
            run_batch(inputs, format, use_colors, &config, cli.verbose);
        }
        Commands::Scale => {
            println!("{}", output::format_scale(GradeTable::standard(), use_colors));
        }
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load rows gathered up front into a session, calculate and print the
/// result, exiting on invalid input.
fn run_batch(
    inputs: Vec<RowInput>,
    format: OutputFormat,
    use_colors: bool,
    config: &Config,
    verbose: bool,
) {
    let mut session = Session::new();
    if let Err(e) = session.load_rows(inputs) {
        eprintln!("{}", output::format_errors(&[e]));
        std::process::exit(EXIT_INVALID_INPUT);
    }

    let result = match session.calculate() {
        Ok(result) => result,
        Err(errors) => {
            eprintln!("{}", output::format_errors(&errors));
            std::process::exit(EXIT_INVALID_INPUT);
        }
    };

    if verbose {
        eprintln!(
            "{} subjects, {} points over {} credits",
            result.breakdown.len(),
            result.total_points,
            result.total_credits
        );
    }

    if let Err(e) = print_result(&result, format, use_colors, config.breakdown) {
        eprintln!("Output error: {:#}", e);
        std::process::exit(EXIT_IO);
    }
}

fn print_result(
    result: &GpaResult,
    format: OutputFormat,
    use_colors: bool,
    breakdown: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if breakdown {
                println!("{}", output::format_breakdown(result, use_colors));
                println!();
            }
            println!("{}", output::format_result(result, use_colors));
        }
        OutputFormat::Tsv => println!("{}", output::format_tsv(result)),
        OutputFormat::Json => println!("{}", output::format_json(result)?),
    }
    Ok(())
}
