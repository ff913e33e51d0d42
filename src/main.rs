use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::info;

use ruchants::{
    brute::brute_force,
    checker::is_accepted,
    generate::{edge_suite, large_suite, random_suite, small_suite, RandomConfig},
    io::{format_instances, read_instances, write_answers, OutputFormat},
    max_equal_sum::solve_instance,
    validate::is_valid_input,
    Answer,
};

#[derive(Parser, Debug)]
#[command(name = "ruchants", version, about = "Maximum sets of equal-sum windows with a minimum gap")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve every case of the input
    Solve(SolveArgs),
    /// Solve with the exhaustive reference solver (small inputs only)
    Brute(SolveArgs),
    /// Check that the input is strictly formatted and within constraints
    Validate {
        /// Input file, stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Check an output file against an input file
    Check {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Also require the answers to be optimal
        #[arg(long)]
        optimal: bool,
    },
    /// Print a generated test suite
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// Input file, stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Suite {
    Small,
    Edge,
    Large,
    Random,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, value_enum, default_value_t = Suite::Small)]
    suite: Suite,

    #[arg(long, default_value_t = 123_456)]
    seed: u64,

    /// Number of cases for the random suite
    #[arg(long, default_value_t = 10)]
    cases: usize,

    /// Largest array length for the random suite
    #[arg(long, default_value_t = 40)]
    max_n: usize,

    /// Largest absolute value for the random suite
    #[arg(long, default_value_t = 5)]
    max_abs: i64,

    /// Emit JSON instead of the plain input format
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn solve(args: &SolveArgs, solver: impl Fn(&ruchants::Instance) -> Answer) -> Result<()> {
    let text = read_text(args.input.as_deref())?;
    let instances = read_instances(&text)?;

    let answers: Vec<Answer> = instances
        .iter()
        .enumerate()
        .map(|(i, instance)| {
            let answer = solver(instance);
            info!(
                "case {}: n={} M={} D={} -> k={} S={}",
                i + 1,
                instance.array_length(),
                instance.max_len,
                instance.min_gap,
                answer.count,
                answer.sum
            );
            answer
        })
        .collect();

    let mut out = BufWriter::new(io::stdout().lock());
    write_answers(&mut out, &answers, args.format)
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let instances = match args.suite {
        Suite::Small => small_suite(),
        Suite::Edge => edge_suite(),
        Suite::Large => large_suite(args.seed),
        Suite::Random => {
            let config = RandomConfig {
                max_n: args.max_n,
                max_abs: args.max_abs,
            };
            random_suite(args.seed, args.cases, &config)
        }
    };
    info!("generated {} cases", instances.len());

    let mut out = BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer(&mut out, &instances).context("failed to serialize instances")?;
        writeln!(out)?;
    } else {
        out.write_all(format_instances(&instances).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn verdict(accepted: bool) -> ExitCode {
    println!("{}", if accepted { "True" } else { "False" });
    if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Solve(args) => solve(&args, solve_instance)?,
        Command::Brute(args) => solve(&args, |instance| {
            brute_force(&instance.values, instance.max_len, instance.min_gap)
        })?,
        Command::Validate { input } => {
            let text = read_text(input.as_deref())?;
            return Ok(verdict(is_valid_input(&text)));
        }
        Command::Check {
            input,
            output,
            optimal,
        } => {
            let input_text = read_text(Some(input.as_path()))?;
            let output_text = read_text(Some(output.as_path()))?;
            return Ok(verdict(is_accepted(&input_text, &output_text, optimal)));
        }
        Command::Generate(args) => generate(&args)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
