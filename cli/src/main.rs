mod config;
mod elementary;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use config::CliConfig;
use matrix3d::{Matrix3d, format, multiply, parse_with_policy};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Compose and convert CSS transform matrices", long_about = None)]
struct Cli {
    /// Path to RON configuration file to use
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Treat unrecognizable transform values as the identity
    #[arg(long, global = true)]
    lenient: bool,

    /// Number of decimals to round printed values to
    #[arg(short, long, global = true)]
    precision: Option<usize>,

    /// Print `matrix(...)` when the result has no 3D components
    #[arg(long, global = true)]
    short: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Expand 6 or 16 comma or space separated values to a `matrix3d` value
    Format {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Convert a transform property value to canonical `matrix3d` form
    Parse { transform: String },
    /// Compose transforms, the last one being applied first
    Multiply {
        #[arg(required = true, num_args = 2..)]
        transforms: Vec<String>,
    },
    /// Compute the inverse of a transform
    Inverse { transform: String },
    /// Build the matrix of an elementary transform function such as
    /// `rotateX 45` or `translate3d 10 20 30`
    Build {
        function: String,

        #[arg(allow_hyphen_values = true)]
        args: Vec<f64>,
    },
}

fn load_config(cli: &Cli) -> Result<CliConfig> {
    let config = match &cli.config_path {
        Some(path) => CliConfig::from_ron_file(path)?,
        None => CliConfig::default(),
    };
    Ok(config.with_overrides(cli.lenient, cli.precision, cli.short))
}

fn parse_values(values: &[String]) -> Result<Vec<f64>> {
    values
        .iter()
        .flat_map(|value| value.split([',', ' ']))
        .filter(|token| !token.trim().is_empty())
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid matrix value {token:?}"))
        })
        .collect()
}

fn parse_transform(text: &str, config: &CliConfig) -> Result<Matrix3d> {
    parse_with_policy(text, config.parse_policy)
        .with_context(|| format!("Could not interpret {text:?} as a transform"))
}

fn run(command: Command, config: &CliConfig) -> Result<Matrix3d> {
    match command {
        Command::Format { values } => {
            let values = parse_values(&values)?;
            Ok(format(&values)?)
        }
        Command::Parse { transform } => parse_transform(&transform, config),
        Command::Multiply { transforms } => {
            let mut product = Matrix3d::identity();
            for transform in &transforms {
                product = multiply(product, parse_transform(transform, config)?)
                    .with_context(|| format!("Could not compose with {transform:?}"))?;
            }
            log::debug!("Composed {} transforms", transforms.len());
            Ok(product)
        }
        Command::Inverse { transform } => parse_transform(&transform, config)?
            .inverted()
            .map_err(|error| anyhow!("Could not invert {transform:?}: {error}")),
        Command::Build { function, args } => elementary::elementary_transform(&function, &args),
    }
}

pub fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    log::debug!("Using {config:?}");

    let matrix = run(cli.command, &config)?;
    println!("{}", config.render(&matrix));
    Ok(())
}
