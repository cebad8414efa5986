
use unitmath::units::{UnitNode, UnitRegistry, UnitDisplayFormat, get_common};
use unitmath::units::parsing::parse_line;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::path::PathBuf;

/// Parses, combines, and renders unit expressions.
#[derive(Debug, Parser)]
#[command(name = "unitmath", version)]
struct Cli {
  /// Extra unit definitions, one per line, loaded after the defaults.
  #[arg(long, value_name = "FILE")]
  units: Option<PathBuf>,

  /// Start from an empty registry instead of the SI defaults.
  #[arg(long)]
  no_defaults: bool,

  /// Render results in this format only. All formats are printed
  /// otherwise.
  #[arg(long, value_name = "FORMAT")]
  format: Option<UnitDisplayFormat>,

  /// Expressions to evaluate, such as `Pa`, `kg*m/s^2`, or `J + N*m`.
  /// Binary operators must be surrounded by spaces.
  #[arg(required = true, value_name = "EXPR")]
  exprs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
  Mul,
  Div,
  Add,
  Sub,
}

impl Op {
  const ALL: [(&'static str, Op); 4] = [
    (" * ", Op::Mul),
    (" / ", Op::Div),
    (" + ", Op::Add),
    (" - ", Op::Sub),
  ];

  fn apply(self, lhs: &UnitNode, rhs: &UnitNode) -> Result<UnitNode> {
    match self {
      Op::Mul => Ok(lhs * rhs),
      Op::Div => Ok(lhs / rhs),
      Op::Add | Op::Sub => {
        match get_common(lhs, rhs) {
          Some(unit) => Ok(unit),
          None => bail!(
            "Units '{}' and '{}' have no common unit",
            lhs.render(UnitDisplayFormat::FlattenedAndSimplified),
            rhs.render(UnitDisplayFormat::FlattenedAndSimplified),
          ),
        }
      }
    }
  }
}

/// Splits `expr` at its first spaced operator, if it has one.
fn split_operator(expr: &str) -> Option<(&str, Op, &str)> {
  Op::ALL.iter()
    .filter_map(|(token, op)| expr.find(token).map(|index| (index, token.len(), *op)))
    .min_by_key(|(index, _, _)| *index)
    .map(|(index, len, op)| (&expr[..index], op, &expr[index + len..]))
}

fn evaluate(expr: &str, registry: &UnitRegistry) -> Result<UnitNode> {
  match split_operator(expr) {
    None => Ok(parse_line(expr, registry)?),
    Some((lhs, op, rhs)) => {
      let lhs = parse_line(lhs, registry)?;
      let rhs = parse_line(rhs, registry)?;
      tracing::debug!(?op, lhs = %lhs, rhs = %rhs, "applying operator");
      op.apply(&lhs, &rhs)
    }
  }
}

fn load_registry(cli: &Cli) -> Result<UnitRegistry> {
  let mut registry = if cli.no_defaults {
    UnitRegistry::new()
  } else {
    UnitRegistry::with_defaults()
  };
  if let Some(path) = &cli.units {
    registry.load_from_file(path)
      .with_context(|| format!("Could not load unit definitions from {}", path.display()))?;
  }
  Ok(registry)
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .init();

  let cli = Cli::parse();
  let registry = load_registry(&cli)?;

  for expr in &cli.exprs {
    let unit = evaluate(expr, &registry).with_context(|| format!("Could not evaluate '{expr}'"))?;
    match cli.format {
      Some(format) => println!("{}", unit.render(format)),
      None => {
        println!("{expr}");
        for format in UnitDisplayFormat::ALL {
          println!("  {:<26}{}", format.name(), unit.render(format));
        }
      }
    }
  }
  Ok(())
}
