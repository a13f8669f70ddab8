use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cnfuzz::generator::FormulaGenerator;
use cnfuzz::option_file::parse_option_file;
use cnfuzz::options::seed_from_entropy;
use cnfuzz::options::GeneratorOptions;
use cnfuzz::options::SizeProfile;
use cnfuzz::options::MAX_SEED;
use cnfuzz::output::DimacsWriter;
use cnfuzz::print_cnfuzz_assert_warning_message;
use log::error;
use log::info;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// The seed of the formula. If omitted, a seed is taken from the operating system.
    #[arg(value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_SEED)))]
    seed: Option<u32>,

    /// Generate a quantified formula in the QDIMACS format.
    #[arg(short, long)]
    qbf: bool,

    /// Generate an incremental formula, with assumption queries between the clauses.
    #[arg(short, long, conflicts_with = "qbf")]
    incremental: bool,

    /// Bounds the number of layers and their widths.
    #[arg(long, value_enum, default_value_t)]
    profile: SizeProfile,

    /// A file with lines `name default min max`; every option is fuzzed and written into the
    /// formula as a comment.
    #[arg(long = "options")]
    option_file: Option<PathBuf>,

    /// Write the formula to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log the plan and the query schedule.
    #[arg(short, long)]
    verbose: bool,
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "c [{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    let args = Cli::parse();
    configure_logging(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    print_cnfuzz_assert_warning_message!();

    let seed = args.seed.unwrap_or_else(seed_from_entropy);
    let options = GeneratorOptions::new(seed, args.qbf, args.incremental, args.profile)?;

    let option_specs = match &args.option_file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Error reading {}", path.display()))?;
            parse_option_file(&contents)
                .with_context(|| format!("Failed to parse options from {}", path.display()))?
        }
        None => vec![],
    };

    let generator = FormulaGenerator::new(&options, &option_specs);

    let summary = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Error creating {}", path.display()))?;
            generator.generate(&mut DimacsWriter::new(file))?
        }
        None => generator.generate(&mut DimacsWriter::new(std::io::stdout().lock()))?,
    };

    info!(
        "Seed {seed}: {} variables, {} clauses, {} queries",
        summary.num_variables, summary.num_clauses, summary.num_queries
    );

    Ok(())
}
