//! # txtfmt
//!
//! A CLI front end for txtfmtlib's report-table formatters.
//!
//! ## Usage
//!
//! ```bash
//! # Round a JSON table to 2 digits, leaving the "n" column alone
//! txtfmt round table.json --digits 2 --exclude-cols-pattern '^n$'
//!
//! # Round a vector read from stdin, per-element digits, comma decimals
//! echo '["12,50", 3.14159, null]' | txtfmt round --digits 1,2,0 --dec , --na -
//!
//! # Companion formatters
//! txtfmt int 1234567 --language sv --no-html
//! txtfmt pval 0.056 0.0031 0.00001
//! txtfmt merge "Age" "(years)" --latex
//! ```

mod render;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use txtfmtlib::{
    txt_int_vec, txt_merge_lines, txt_pval_vec, txt_round_table, txt_round_vec, Cell, Exclusion,
    IntOptions, PvalOptions, RoundOptions, Table,
};

use crate::render::OutputMode;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("txtfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Format numbers for statistical report tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug information to stderr"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .subcommand(
            Command::new("round")
                .about("Round a JSON vector or table to fixed decimals")
                .arg(
                    Arg::new("input")
                        .help("JSON file with a cell array or a table object (stdin if omitted or '-')"),
                )
                .arg(
                    Arg::new("digits")
                        .short('d')
                        .long("digits")
                        .value_delimiter(',')
                        .value_parser(value_parser!(usize))
                        .default_value("0")
                        .help("Fractional digits: one value, or one per element / working column"),
                )
                .arg(
                    Arg::new("digits-nonzero")
                        .long("digits-nonzero")
                        .value_parser(value_parser!(usize))
                        .help("Allow up to N digits so small non-zero values don't round to zero"),
                )
                .arg(
                    Arg::new("na")
                        .long("na")
                        .help("Placeholder for missing values"),
                )
                .arg(
                    Arg::new("dec")
                        .long("dec")
                        .default_value(".")
                        .help("Decimal marker used by text input"),
                )
                .arg(
                    Arg::new("out-dec")
                        .long("out-dec")
                        .default_value(".")
                        .help("Decimal marker used in the output"),
                )
                .arg(
                    Arg::new("exclude-rows")
                        .long("exclude-rows")
                        .value_delimiter(',')
                        .value_parser(value_parser!(usize))
                        .conflicts_with("exclude-rows-pattern")
                        .help("Zero-based rows to leave untouched (comma-separated)"),
                )
                .arg(
                    Arg::new("exclude-rows-pattern")
                        .long("exclude-rows-pattern")
                        .help("Leave rows whose name matches this regex untouched"),
                )
                .arg(
                    Arg::new("exclude-cols")
                        .long("exclude-cols")
                        .value_delimiter(',')
                        .value_parser(value_parser!(usize))
                        .conflicts_with("exclude-cols-pattern")
                        .help("Zero-based columns to leave untouched (comma-separated)"),
                )
                .arg(
                    Arg::new("exclude-cols-pattern")
                        .long("exclude-cols-pattern")
                        .help("Leave columns whose name matches this regex untouched"),
                ),
        )
        .subcommand(
            Command::new("int")
                .about("Format integers with thousands separators")
                .arg(
                    Arg::new("values")
                        .required(true)
                        .num_args(1..)
                        .allow_negative_numbers(true)
                        .help("Values to format"),
                )
                .arg(
                    Arg::new("language")
                        .short('l')
                        .long("language")
                        .default_value("en")
                        .help("Language code ('en' groups with ',', others with a space)"),
                )
                .arg(
                    Arg::new("no-html")
                        .long("no-html")
                        .action(ArgAction::SetTrue)
                        .help("Use a plain space instead of &nbsp;"),
                ),
        )
        .subcommand(
            Command::new("pval")
                .about("Format p-values")
                .arg(
                    Arg::new("values")
                        .required(true)
                        .num_args(1..)
                        .help("P-values to format"),
                )
                .arg(
                    Arg::new("lim-sig")
                        .long("lim-sig")
                        .value_parser(value_parser!(f64))
                        .default_value("0.0001")
                        .help("Values below this are shown as '< LIM'"),
                )
                .arg(
                    Arg::new("lim-2dec")
                        .long("lim-2dec")
                        .value_parser(value_parser!(f64))
                        .default_value("0.01")
                        .help("Values at or above this get two significant digits"),
                )
                .arg(
                    Arg::new("no-html")
                        .long("no-html")
                        .action(ArgAction::SetTrue)
                        .help("Use '<' instead of &lt;"),
                ),
        )
        .subcommand(
            Command::new("merge")
                .about("Merge lines into a single multi-line cell")
                .arg(
                    Arg::new("lines")
                        .required(true)
                        .num_args(1..)
                        .help("Lines to merge (embedded newlines split further)"),
                )
                .arg(
                    Arg::new("latex")
                        .long("latex")
                        .action(ArgAction::SetTrue)
                        .help("Emit LaTeX \\vbox stacking instead of <br>"),
                ),
        )
}

/// Parse a one-character decimal marker argument
fn parse_marker(matches: &ArgMatches, name: &str) -> anyhow::Result<char> {
    let raw = matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or(".");
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("--{} expects a single character, got '{}'", name, raw),
    }
}

/// Build an exclusion from either an index list or a name pattern
fn extract_exclusion(
    matches: &ArgMatches,
    indices: &str,
    pattern: &str,
) -> anyhow::Result<Option<Exclusion>> {
    if let Some(pattern) = matches.get_one::<String>(pattern) {
        return Ok(Some(Exclusion::pattern(pattern)?));
    }
    Ok(matches
        .get_many::<usize>(indices)
        .map(|v| Exclusion::indices(v.copied())))
}

/// Build round options from matches
fn build_round_options(matches: &ArgMatches) -> anyhow::Result<RoundOptions> {
    let digits: Vec<usize> = matches
        .get_many::<usize>("digits")
        .map(|v| v.copied().collect())
        .unwrap_or_else(|| vec![0]);

    let mut options = RoundOptions::new()
        .digits_per_item(digits)
        .na_placeholder(
            matches
                .get_one::<String>("na")
                .cloned()
                .unwrap_or_default(),
        )
        .decimal_marker(parse_marker(matches, "dec")?)
        .output_marker(parse_marker(matches, "out-dec")?);

    if let Some(max) = matches.get_one::<usize>("digits-nonzero") {
        options = options.digits_nonzero(*max);
    }
    if let Some(rows) = extract_exclusion(matches, "exclude-rows", "exclude-rows-pattern")? {
        options = options.exclude_rows(rows);
    }
    if let Some(cols) = extract_exclusion(matches, "exclude-cols", "exclude-cols-pattern")? {
        options = options.exclude_cols(cols);
    }
    Ok(options)
}

/// Read JSON input from a file, or stdin for `None` / `-`
fn read_input(path: Option<&String>) -> anyhow::Result<serde_json::Value> {
    let raw = match path.map(|s| s.as_str()) {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read file '{}'", path))?,
    };
    tracing::debug!(bytes = raw.len(), "read input");
    serde_json::from_str(&raw).context("input is not valid JSON")
}

/// Parse a command-line value into a cell: numbers, `NA`, or text
fn cell_from_arg(raw: &str) -> Cell {
    if raw == "NA" {
        return Cell::Missing;
    }
    raw.parse::<f64>()
        .map(Cell::numeric)
        .unwrap_or_else(|_| Cell::text(raw))
}

/// Collect the positional values of a subcommand as cells
fn extract_cells(matches: &ArgMatches, name: &str) -> Vec<Cell> {
    matches
        .get_many::<String>(name)
        .map(|v| v.map(|s| cell_from_arg(s)).collect())
        .unwrap_or_default()
}

/// Handler for the round command
fn round_handler(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let options = build_round_options(matches)?;
    let input = read_input(matches.get_one::<String>("input"))?;

    match input {
        serde_json::Value::Array(_) => {
            let cells: Vec<Cell> = serde_json::from_value(input)?;
            let values = txt_round_vec(&cells, &options)?;
            render::render_values(&values, mode)
        }
        serde_json::Value::Object(_) => {
            let table: Table = serde_json::from_value(input)?;
            let rounded = txt_round_table(&table, &options)?;
            render::render_table(&rounded, mode)
        }
        _ => Err(anyhow!(
            "expected a JSON array of cells or a table object with \"rows\""
        )),
    }
}

/// Handler for the int command
fn int_handler(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let options = IntOptions::new()
        .language(
            matches
                .get_one::<String>("language")
                .cloned()
                .unwrap_or_else(|| "en".to_string()),
        )
        .html(!matches.get_flag("no-html"));
    let values = txt_int_vec(&extract_cells(matches, "values"), &options);
    render::render_values(&values, mode)
}

/// Handler for the pval command
fn pval_handler(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let mut options = PvalOptions::new().html(!matches.get_flag("no-html"));
    if let Some(lim) = matches.get_one::<f64>("lim-sig") {
        options = options.lim_sig(*lim);
    }
    if let Some(lim) = matches.get_one::<f64>("lim-2dec") {
        options = options.lim_2dec(*lim);
    }
    let values = txt_pval_vec(&extract_cells(matches, "values"), &options)?;
    render::render_values(&values, mode)
}

/// Handler for the merge command
fn merge_handler(matches: &ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let lines: Vec<&String> = matches
        .get_many::<String>("lines")
        .map(|v| v.collect())
        .unwrap_or_default();
    let merged = txt_merge_lines(&lines, !matches.get_flag("latex"))?;
    render::render_values(&[merged], mode)
}

/// Install the stderr log subscriber; `RUST_LOG` overrides `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(name: &str, sub: &ArgMatches) -> anyhow::Result<String> {
    let mode = sub
        .get_one::<String>("output")
        .map(|s| OutputMode::from_arg(s))
        .unwrap_or_default();

    match name {
        "round" => round_handler(sub, mode),
        "int" => int_handler(sub, mode),
        "pval" => pval_handler(sub, mode),
        "merge" => merge_handler(sub, mode),
        _ => Err(anyhow!("unknown command '{}'", name)),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    // Global flags are read from the subcommand, where clap propagates them.
    let Some((name, sub)) = matches.subcommand() else {
        return ExitCode::FAILURE;
    };
    init_logging(sub.get_flag("verbose"));

    match run(name, sub) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
