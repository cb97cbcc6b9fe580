mod error;
mod kitchen;
mod logging;
mod metrics;
mod sim;
mod types;
mod worker;

use error::ConfigError;
use sim::SimConfig;
use types::CookTiming;

fn parse_number(field: &'static str, arg: &str) -> Result<u64, ConfigError> {
    arg.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: arg.to_string(),
        })
}

/// Positional form: `<units> [cook_ms] [jitter_ms]`.
fn parse_config(args: &[String]) -> Result<SimConfig, ConfigError> {
    let mut args = args.iter();
    let units = match args.next() {
        Some(arg) => parse_number("units", arg)?,
        None => return Err(ConfigError::MissingUnits),
    };
    let defaults = CookTiming::default();
    let cook_ms = match args.next() {
        Some(arg) => parse_number("cook_ms", arg)?,
        None => defaults.cook.as_millis() as u64,
    };
    let jitter_ms = match args.next() {
        Some(arg) => parse_number("jitter_ms", arg)?,
        None => defaults.max_jitter.as_millis() as u64,
    };
    if let Some(extra) = args.next() {
        return Err(ConfigError::UnexpectedArgument(extra.clone()));
    }

    let config = SimConfig {
        timing: CookTiming::from_millis(cook_ms, jitter_ms),
        ..SimConfig::new(units)
    };
    config.validate()?;
    Ok(config)
}

fn print_usage(program: &str) {
    println!("Ramen Kitchen");
    println!("Usage:");
    println!("  {program} <units> [cook_ms] [jitter_ms]");
    println!("  {program} --help");
    println!();
    println!("Four cooks (A-D) share four burners until <units> ramen packets are used up.");
    println!("Defaults:");
    println!("  cook_ms=2000 jitter_ms=1000");
    println!("Set RUST_LOG=debug to also print the burner board after each change.");
}

fn exit_with_usage(program: &str, message: &str) -> ! {
    eprintln!("{message}");
    print_usage(program);
    std::process::exit(2);
}

fn main() {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "ramen_kitchen".to_string());
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some("--help" | "-h" | "help") = args.first().map(String::as_str) {
        print_usage(&program);
        return;
    }

    let config = match parse_config(&args) {
        Ok(config) => config,
        Err(err) => exit_with_usage(&program, &format!("config error: {err}")),
    };

    logging::init();
    match sim::run(&config) {
        Ok(summary) => sim::print_summary(&summary),
        Err(err) => {
            eprintln!("run error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn units_only_uses_default_timing() {
        let config = parse_config(&args(&["10"])).expect("valid config");
        assert_eq!(config.units, 10);
        assert_eq!(config.workers, vec!["A", "B", "C", "D"]);
        assert_eq!(config.burners, 4);
        assert_eq!(config.timing, CookTiming::default());
    }

    #[test]
    fn timing_overrides_are_positional() {
        let config = parse_config(&args(&["3", "5", "0"])).expect("valid config");
        assert_eq!(config.units, 3);
        assert_eq!(config.timing.cook, Duration::from_millis(5));
        assert_eq!(config.timing.max_jitter, Duration::ZERO);
    }

    #[test]
    fn bad_input_is_a_config_error() {
        assert_eq!(parse_config(&[]), Err(ConfigError::MissingUnits));
        assert_eq!(
            parse_config(&args(&["ten"])),
            Err(ConfigError::InvalidNumber {
                field: "units",
                value: "ten".to_string(),
            })
        );
        assert!(matches!(
            parse_config(&args(&["-1"])),
            Err(ConfigError::InvalidNumber { field: "units", .. })
        ));
        assert!(matches!(
            parse_config(&args(&["1", "fast"])),
            Err(ConfigError::InvalidNumber { field: "cook_ms", .. })
        ));
        assert_eq!(
            parse_config(&args(&["1", "1", "1", "x"])),
            Err(ConfigError::UnexpectedArgument("x".to_string()))
        );
    }
}
