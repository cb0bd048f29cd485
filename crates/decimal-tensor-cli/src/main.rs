use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use decimal_tensor::config::{DecimalPolicy, Rounding};
use decimal_tensor_cli::commands::{emit, load_policy, run, Operation, DEFAULT_LOG_FILTER};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DTENSOR_LOG", DEFAULT_LOG_FILTER))
        .init();

    let mut command = Command::new("dtensor")
        .version(clap::crate_version!())
        .about("Exact decimal matrix algorithms on CSV input")
        .subcommand_required(true)
        .arg_required_else_help(true);

    for op in Operation::all() {
        command = command.subcommand(matrix_command(op));
    }

    let matches = command
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let Some((name, sub_m)) = matches.subcommand() else {
        unreachable!("Subcommand is required by CLI configuration")
    };
    let op: Operation = name.parse().map_err(anyhow::Error::msg)?;
    handle_operation(op, sub_m)
}

fn matrix_command(op: Operation) -> Command {
    let about = match op {
        Operation::Rref => "Reduce a matrix to reduced row-echelon form",
        Operation::Det => "Compute the determinant of a square matrix",
        Operation::Inverse => "Invert a square, nonsingular matrix",
        Operation::Trace => "Sum the diagonal of a square matrix",
        Operation::Transpose => "Transpose a matrix",
        Operation::Check => "Report structural properties of a matrix",
    };

    Command::new(op.name())
        .about(about)
        .arg(
            Arg::new("input")
                .help("Path to the CSV matrix file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON decimal policy (division_scale, inverse_scale, rounding)")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("rounding")
                .long("rounding")
                .help("Override the rounding mode from the JSON config.")
                .value_parser([
                    "up",
                    "down",
                    "ceiling",
                    "floor",
                    "half_up",
                    "half_down",
                    "half_even",
                ])
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output_file")
                .short('o')
                .long("output")
                .help("Write the result as CSV to this path instead of printing it.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
}

fn handle_operation(op: Operation, matches: &ArgMatches) -> Result<()> {
    let input: &PathBuf = matches
        .get_one("input")
        .ok_or_else(|| anyhow::anyhow!("Missing input path"))?;
    let output: Option<&PathBuf> = matches.get_one("output_file");
    log::info!("[dtensor::{}] Input matrix: {:?}", op.name(), input);

    let mut policy = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("[dtensor::{}] Using config: {:?}", op.name(), config_path);
            load_policy(config_path)?
        }
        None => DecimalPolicy::default(),
    };

    if let Some(rounding) = matches.get_one::<String>("rounding") {
        policy.rounding = rounding.parse::<Rounding>().map_err(anyhow::Error::msg)?;
    }
    log::debug!("[dtensor::{}] Decimal policy: {:?}", op.name(), policy);

    match run(op, input, &policy) {
        Ok(outcome) => emit(&outcome, output.map(PathBuf::as_path)),
        Err(e) => {
            log::error!("[dtensor::{}] {:#}", op.name(), e);
            std::process::exit(1)
        }
    }
}
