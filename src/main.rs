use std::env;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};
use trade_calculator::config::Config;
use trade_calculator::report::{Report, format_report};
use trade_calculator::{InputField, RawTradeInputs};

const DEFAULT_CONFIG_PATH: &str = "configs/calculator.yaml";

const USAGE: &str = "\
Usage: trade-calculator --max-risk=<amount> --profit=<percent> --stop-loss=<percent>
                        --leverage=<multiplier> --margin-limit=<amount>
                        [--config=<path>] [--json]";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    inputs: RawTradeInputs,
    json: bool,
    help: bool,
}

fn flag_field(name: &str) -> Option<InputField> {
    match name {
        "max-risk" => Some(InputField::MaxRisk),
        "profit" => Some(InputField::ProfitPercent),
        "stop-loss" => Some(InputField::StopLossPercent),
        "leverage" => Some(InputField::Leverage),
        "margin-limit" => Some(InputField::MarginLimit),
        _ => None,
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();

    for arg in args {
        match arg.as_str() {
            "--json" => {
                parsed.json = true;
                continue;
            }
            "--help" | "-h" => {
                parsed.help = true;
                continue;
            }
            _ => {}
        }

        let Some((name, value)) = arg.strip_prefix("--").and_then(|a| a.split_once('=')) else {
            return Err(format!("unrecognized argument: {}", arg));
        };

        if name == "config" {
            parsed.config_path = Some(value.to_string());
        } else if let Some(field) = flag_field(name) {
            *parsed.inputs.get_mut(field) = value.to_string();
        } else {
            return Err(format!("unknown flag: --{}", name));
        }
    }

    Ok(parsed)
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let config = match args.config_path.as_deref() {
        Some(path) => Config::load(path),
        None => Config::load_or_default(DEFAULT_CONFIG_PATH),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.app.log_level.as_deref());

    let calculator = config.calculator();

    debug!(
        app = %config.app.name,
        fee_percent_per_side = %calculator.fees().percent_per_side,
        decimal_places = calculator.decimal_places(),
        strict = calculator.is_strict(),
        "Calculator configured"
    );

    let inputs = match args.inputs.parse() {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match calculator.calculate(&inputs) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        position_size = %result.position_size,
        margin_required = %result.margin_required,
        adjusted = result.is_adjusted(),
        "Trade calculated"
    );

    let report = Report::new(&inputs, &result).with_decimal_places(calculator.decimal_places());
    if args.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!(error = %e, "Failed to serialize report");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", format_report(&report));
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_fields() {
        let parsed = parse_args(args(&[
            "--max-risk=100",
            "--profit=5",
            "--stop-loss=2",
            "--leverage=10",
            "--margin-limit=1000",
            "--json",
        ]))
        .unwrap();

        assert_eq!(parsed.inputs.max_risk, "100");
        assert_eq!(parsed.inputs.profit_percent, "5");
        assert_eq!(parsed.inputs.stop_loss_percent, "2");
        assert_eq!(parsed.inputs.leverage, "10");
        assert_eq!(parsed.inputs.margin_limit, "1000");
        assert!(parsed.json);
        assert!(parsed.config_path.is_none());
    }

    #[test]
    fn test_parse_args_config_and_negative_value() {
        let parsed = parse_args(args(&["--config=custom.yaml", "--profit=-1.5"])).unwrap();

        assert_eq!(parsed.config_path.as_deref(), Some("custom.yaml"));
        assert_eq!(parsed.inputs.profit_percent, "-1.5");
        assert!(parsed.inputs.leverage.is_empty());
    }

    #[test]
    fn test_parse_args_unknown_flag() {
        let err = parse_args(args(&["--fee=0.1"])).unwrap_err();
        assert_eq!(err, "unknown flag: --fee");
    }

    #[test]
    fn test_parse_args_positional_rejected() {
        let err = parse_args(args(&["100"])).unwrap_err();
        assert!(err.contains("unrecognized argument"));
    }
}
