mod config;
mod pretty;

use config::Config;

use std::io::IsTerminal;

use clap::Parser;
use colored::{control::set_override, Colorize};
use datumorbit_core::{
    builtin_drivers, driver_by_name, driver_ids, month_grid, DateDriver, DateInput, DateValue,
    FormatType, Part, Span,
};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::pretty::{Parts, Summary};

const LONG_ABOUT: &str = r#"
Dorb explores dates through swappable date-arithmetic backends.

Give it a date and see it normalized, formatted, decomposed into parts,
and laid out on a month calendar - computed by either the chrono or the
time crate behind one uniform interface.

INPUT:
  ISO 8601 date or datetime    1991-07-13, 1991-07-13T09:05:02Z
  Epoch milliseconds           679363200000 (also @679363200000)
  The current moment           now

EXAMPLES:
  dorb 1991-07-13                       Summary for a date
  dorb 1991-07-13 --calendar            Summary plus month calendar
  dorb now --add 2 weeks                Two weeks from now
  dorb 2024-01-31 --add P1M             Month arithmetic (clamps to Feb 29)
  dorb 1991-07-13 -f "%B %Y"            Custom chrono pattern
  dorb 1991-07-13 --format-type aria-label
  dorb 2024-12-24 --diff 2024-01-01 --unit days
  dorb 1991-07-13 -d time               Same answers, time backend

SPANS (--add / --sub):
  Compact      1h30m, 2d, 1d12h
  Spelled out  5 days, 2 hours, 5 days 2 hours
  ISO 8601     P5D, PT2H30M, P1M
  Clock        1:30:00

DRIVERS:
  Every operation goes through a driver so backends are interchangeable.
  Custom -f patterns use the backend's native syntax:
    chrono  strftime, e.g. %m/%d/%Y
    time    format_description, e.g. [month]/[day]/[year]
  Named formats (--format-type day|month|weekday|display|aria-label)
  resolve per driver, so output matches across backends.

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting   | CLI flag       | Env var        | Default
  ----------|----------------|----------------|--------
  driver    | -d, --driver   | DORB_DRIVER    | chrono
  no_color  | -C, --no-color | DORB_NO_COLOR  | false

  Config file location: dorb --config-path
  Generate default config: dorb --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"#;

#[derive(Parser)]
#[command(name = "dorb")]
#[command(version)]
#[command(about = "Explore dates through swappable date-arithmetic backends")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = "For more information, visit: https://github.com/mjukis-ab/datumorbit")]
struct Cli {
    /// The date input
    ///
    /// ISO 8601 (`1991-07-13`, `1991-07-13T09:05:02Z`), epoch milliseconds
    /// (`679363200000` or `@679363200000`), or `now`.
    #[arg(value_name = "DATE")]
    input: Option<String>,

    /// Date backend to use (chrono, time)
    #[arg(long, short = 'd', value_name = "DRIVER")]
    driver: Option<String>,

    /// Format with a backend-native pattern instead of a summary
    #[arg(long, short = 'f', value_name = "PATTERN")]
    format: Option<String>,

    /// Format with a named format type (day, month, weekday, display, aria-label)
    #[arg(long, value_name = "TYPE", conflicts_with = "format")]
    format_type: Option<String>,

    /// Shift forward by a span first (e.g. `1d12h`, `2 weeks`, `P1M`)
    #[arg(long, value_name = "SPAN", allow_hyphen_values = true)]
    add: Option<String>,

    /// Shift backward by a span first
    #[arg(long, value_name = "SPAN", allow_hyphen_values = true)]
    sub: Option<String>,

    /// Print the difference to another date instead of a summary
    #[arg(long, value_name = "DATE")]
    diff: Option<String>,

    /// Unit for --diff (seconds, minutes, hours, days, weekdays, weeks, months, years)
    #[arg(long, value_name = "PART", default_value = "days")]
    unit: String,

    /// Print the month calendar around the date
    #[arg(long, short = 'c')]
    calendar: bool,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// List available drivers
    #[arg(long)]
    drivers: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => eprintln!("Could not determine config directory"),
        }
        return;
    }

    if cli.config_init {
        init_config();
        return;
    }

    if cli.drivers {
        print_drivers();
        return;
    }

    // Initialize tracing based on verbosity level (before config loading for logging)
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load config file and merge with CLI args
    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let no_color = if cli.no_color {
        tracing::debug!("no_color = true (from CLI)");
        true
    } else {
        file_config.no_color()
    };
    if no_color || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    let driver_name = if let Some(ref name) = cli.driver {
        tracing::debug!("driver = {} (from CLI)", name);
        name.clone()
    } else {
        let name = file_config.driver();
        let source = if std::env::var("DORB_DRIVER").is_ok() {
            "env DORB_DRIVER"
        } else if file_config.driver.is_some() {
            "config file"
        } else {
            "default"
        };
        tracing::debug!("driver = {} (from {})", name, source);
        name
    };

    let Some(driver) = driver_by_name(&driver_name) else {
        eprintln!(
            "Unknown driver `{}`. Available: {}",
            driver_name,
            driver_ids().join(", ")
        );
        std::process::exit(2);
    };
    let driver = driver.as_ref();

    let Some(ref raw_input) = cli.input else {
        eprintln!("No input. Try: dorb 1991-07-13 (see --help)");
        std::process::exit(2);
    };

    let input = parse_input(driver, raw_input);
    let Some(mut value) = driver.normalize(&input) else {
        eprintln!("Not a recognizable date: `{}`", raw_input);
        std::process::exit(1);
    };

    for (flag, raw_span, backward) in [("--add", &cli.add, false), ("--sub", &cli.sub, true)] {
        let Some(raw_span) = raw_span else { continue };
        let span = match raw_span.parse::<Span>() {
            Ok(span) => span,
            Err(e) => {
                eprintln!("{} {}: {}", flag, raw_span, e);
                std::process::exit(2);
            }
        };
        let shifted = if backward {
            driver.subtract(&value.into(), &span)
        } else {
            driver.add(&value.into(), &span)
        };
        match shifted {
            Some(next) => value = next,
            None => {
                eprintln!("{} {} left the supported date range", flag, raw_span);
                std::process::exit(1);
            }
        }
    }

    if let Some(ref other_raw) = cli.diff {
        let part = match cli.unit.parse::<Part>() {
            Ok(part) => part,
            Err(e) => {
                eprintln!("--unit: {}", e);
                std::process::exit(2);
            }
        };
        let other = parse_input(driver, other_raw);
        let Some(diff) = driver.diff(&value.into(), &other, part) else {
            eprintln!("Not a recognizable date: `{}`", other_raw);
            std::process::exit(1);
        };
        if cli.json {
            println!("{}", serde_json::json!({ "diff": diff, "unit": part.id() }));
        } else {
            println!("{}", diff);
        }
        return;
    }

    let pattern = match (&cli.format, &cli.format_type) {
        (Some(pattern), _) => Some(pattern.clone()),
        (None, Some(name)) => match name.parse::<FormatType>() {
            Ok(format_type) => Some(driver.format_string(format_type).to_string()),
            Err(e) => {
                eprintln!("--format-type: {}", e);
                std::process::exit(2);
            }
        },
        (None, None) => None,
    };
    if let Some(pattern) = pattern {
        let Some(rendered) = driver.format(&value.into(), Some(&pattern)) else {
            eprintln!(
                "Pattern not supported by the {} driver: `{}`",
                driver.id(),
                pattern
            );
            std::process::exit(1);
        };
        if cli.json {
            println!("{}", serde_json::json!({ "formatted": rendered }));
        } else {
            println!("{}", rendered);
        }
        return;
    }

    let Some(summary) = build_summary(driver, value) else {
        // Normalization succeeded, so component reads cannot fail; guard anyway.
        eprintln!("Could not read components of `{}`", value);
        std::process::exit(1);
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Could not serialize summary: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    pretty::print_summary(&summary);

    if cli.calendar {
        if let Some(grid) = month_grid(driver, &value.into()) {
            println!();
            pretty::print_calendar(&grid, Some(value.day_key()));
        }
    }
}

/// `now`, epoch milliseconds (with optional `@` prefix), or text handed to
/// the driver as-is.
fn parse_input(driver: &dyn DateDriver, raw: &str) -> DateInput {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("now") {
        return driver.now().into();
    }
    let digits = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if let Ok(millis) = digits.parse::<i64>() {
        return DateInput::Millis(millis);
    }
    DateInput::Text(trimmed.to_string())
}

fn build_summary(driver: &dyn DateDriver, value: DateValue) -> Option<Summary> {
    let input: DateInput = value.into();
    let named = |format_type| driver.format(&input, Some(driver.format_string(format_type)));

    Some(Summary {
        driver: driver.id().to_string(),
        iso: driver.format(&input, None)?,
        display: named(FormatType::Display)?,
        aria_label: named(FormatType::AriaLabel)?,
        weekday: driver.weekday(&input)?,
        weekday_name: named(FormatType::Weekday)?,
        month_caption: named(FormatType::Month)?,
        days_in_month: driver.days_in_month(&input)?,
        parts: Parts {
            seconds: driver.get(&input, Part::Seconds)?,
            minutes: driver.get(&input, Part::Minutes)?,
            hours: driver.get(&input, Part::Hours)?,
            days: driver.get(&input, Part::Days)?,
            weekdays: driver.get(&input, Part::Weekdays)?,
            weeks: driver.get(&input, Part::Weeks)?,
            months: driver.get(&input, Part::Months)?,
            years: driver.get(&input, Part::Years)?,
        },
    })
}

fn print_drivers() {
    println!("{}", "Available drivers".bold().underline());
    println!();
    for driver in builtin_drivers() {
        let info = driver.info();
        println!("  {} {}", format!("{:<8}", info.id).bold(), info.description);
        if !driver.aliases().is_empty() {
            println!("           aliases: {}", driver.aliases().join(", ").dimmed());
        }
    }
    println!();
    println!("Custom -f patterns use the backend's native syntax:");
    println!("  chrono  strftime, e.g. %m/%d/%Y");
    println!("  time    format_description, e.g. [month]/[day]/[year]");
}

fn init_config() {
    let Some(path) = Config::path() else {
        eprintln!("Could not determine config directory");
        std::process::exit(1);
    };
    if path.exists() {
        eprintln!("Config already exists: {}", path.display());
        std::process::exit(1);
    }
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Could not create {}: {}", parent.display(), e);
            std::process::exit(1);
        }
    }
    match std::fs::write(&path, config::DEFAULT_CONFIG) {
        Ok(()) => println!("Wrote {}", path.display()),
        Err(e) => {
            eprintln!("Could not write {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datumorbit_core::ChronoDriver;

    #[test]
    fn test_parse_input_shapes() {
        let driver = ChronoDriver;
        assert_eq!(
            parse_input(&driver, "679363200000"),
            DateInput::Millis(679_363_200_000)
        );
        assert_eq!(
            parse_input(&driver, "@679363200000"),
            DateInput::Millis(679_363_200_000)
        );
        assert_eq!(
            parse_input(&driver, " 1991-07-13 "),
            DateInput::Text("1991-07-13".to_string())
        );
        assert!(matches!(parse_input(&driver, "now"), DateInput::Value(_)));
    }

    #[test]
    fn test_summary_for_fixed_date() {
        let driver = ChronoDriver;
        let value = driver.normalize(&"1991-07-13".into()).unwrap();
        let summary = build_summary(&driver, value).unwrap();

        assert_eq!(summary.display, "07/13/1991");
        assert_eq!(summary.weekday, 5);
        assert_eq!(summary.weekday_name, "Sat");
        assert_eq!(summary.month_caption, "July 1991");
        assert_eq!(summary.days_in_month, 31);
        assert_eq!(summary.parts.weeks, 28);
    }
}
