use clap::{CommandFactory, Parser};
use console::style;
use std::process;
use sumcheck::adapters::{
    ConsoleOutputAdapter, FileFactory, JsonOutputAdapter, MultiAlgorithmHasher, ProgressBarAdapter,
};
use sumcheck::cli::{Cli, OutputFormat};
use sumcheck::domain::{ChecksumReport, HashAlgorithm};
use sumcheck::ports::{FileSystemPort, OutputPort};
use sumcheck::services::{Checker, HashComparator};

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    let algorithm = args.selected_algorithm().unwrap_or_else(|err| usage_error(&err));
    if let Err(err) = args.input_files() {
        usage_error(&err);
    }
    let check_digest = args.normalized_check().unwrap_or_else(|err| usage_error(&err));

    if let Err(err) = run(&args, algorithm, check_digest) {
        eprintln!("{} {}", style("sumcheck: error:").red().bold(), err);
        process::exit(1);
    }
}

fn run(args: &Cli, algorithm: HashAlgorithm, check_digest: Option<String>) -> anyhow::Result<()> {
    let factory = FileFactory::new();
    let hasher = MultiAlgorithmHasher::new();
    let progress = ProgressBarAdapter::new().with_quiet(!args.progress);

    let mut checker = Checker::new(hasher, progress);
    checker.set_show_progress(args.progress);
    for path in &args.files {
        checker.add(factory.create(path), algorithm);
    }

    checker.calculate_hash_sums();
    let report = checker.report(algorithm)?;

    match check_digest {
        Some(digest) => write_comparisons(args, &report, &digest),
        None => write_report(args, &report),
    }
}

fn write_report(args: &Cli, report: &ChecksumReport) -> anyhow::Result<()> {
    let output: Box<dyn OutputPort> = match args.output_format {
        OutputFormat::Text => {
            Box::new(ConsoleOutputAdapter::new().with_show_invalid(!args.hide_invalid))
        }
        OutputFormat::Json => match &args.output_file {
            Some(path) => Box::new(JsonOutputAdapter::with_file(path)?),
            None => Box::new(JsonOutputAdapter::with_stdout()),
        },
    };

    output.write_report(report)
}

fn write_comparisons(args: &Cli, report: &ChecksumReport, digest: &str) -> anyhow::Result<()> {
    let comparisons = HashComparator::compare_report(report, digest);

    match args.output_format {
        OutputFormat::Text => ConsoleOutputAdapter::new()
            .with_show_invalid(!args.hide_invalid)
            .write_comparisons(report, &comparisons),
        OutputFormat::Json => match &args.output_file {
            Some(path) => JsonOutputAdapter::with_file(path)?.write_comparisons(&comparisons),
            None => JsonOutputAdapter::with_stdout().write_comparisons(&comparisons),
        },
    }
}

fn usage_error(err: &anyhow::Error) -> ! {
    eprintln!("{} {}\n", style("sumcheck: error:").red().bold(), err);
    let _ = Cli::command().write_help(&mut std::io::stderr());
    eprintln!();
    process::exit(1);
}
