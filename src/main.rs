mod transcript;

use nutribot::{Dataset, NutriBot, Turn, render};
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

const DEFAULT_SESSION: &str = "local";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let dataset = match Dataset::load(&config.food, &config.beverages) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let bot = NutriBot::new(dataset);
    let palette = transcript::Palette::new(config.color);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: failed to read stdin: {err}");
                std::process::exit(1);
            }
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        match text {
            ":info" => transcript::print_info(&bot.dataset_info(), &palette),
            ":reload" => match bot.reload_with(|| Dataset::load(&config.food, &config.beverages)) {
                Ok(info) => transcript::print_info(&info, &palette),
                Err(err) => transcript::print_reply(&render(&Turn::Failed(err)), &palette),
            },
            _ => transcript::print_reply(&bot.respond(&config.session, text), &palette),
        }
    }
}

struct CliConfig {
    food: PathBuf,
    beverages: PathBuf,
    session: String,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut food: Option<PathBuf> = None;
    let mut beverages: Option<PathBuf> = None;
    let mut session = DEFAULT_SESSION.to_string();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("nutribot {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--food" => {
                let value = args.next().ok_or_else(|| "error: --food expects a path".to_string())?;
                food = Some(PathBuf::from(value));
            }
            "--beverages" => {
                let value = args.next().ok_or_else(|| "error: --beverages expects a path".to_string())?;
                beverages = Some(PathBuf::from(value));
            }
            "--session" => {
                session = args.next().ok_or_else(|| "error: --session expects a value".to_string())?;
            }
            _ if arg.starts_with("--food=") => food = Some(PathBuf::from(arg.trim_start_matches("--food="))),
            _ if arg.starts_with("--beverages=") => {
                beverages = Some(PathBuf::from(arg.trim_start_matches("--beverages=")));
            }
            _ if arg.starts_with("--session=") => session = arg.trim_start_matches("--session=").to_string(),
            _ => {
                return Err(format!("error: unknown argument '{arg}'\n\n{}", help_text()));
            }
        }
    }

    let food = food.ok_or_else(|| format!("error: --food is required\n\n{}", help_text()))?;
    let beverages = beverages.ok_or_else(|| format!("error: --beverages is required\n\n{}", help_text()))?;

    if session.trim().is_empty() {
        return Err("error: --session must not be empty".to_string());
    }

    Ok(CliConfig { food, beverages, session, color })
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "nutribot {version}

Chat with a nutrition table. Reads one message per line from stdin.

Usage:
  nutribot --food <csv> --beverages <csv> [OPTIONS]

Options:
  --food <csv>               Food table (columns: food_name, energy_kcal,
                             carb_g, protein_g, fat_g, fibre_g).
  --beverages <csv>          Beverage table, same columns.
  --session <id>             Session id for multi-step dialogs.
                             Default: {default_session}
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Commands (typed as a message):
  :info                      Show row counts and the first row of each table.
  :reload                    Re-read both CSV files.

Logging:
  RUST_LOG=nutribot=debug    Trace intent classification and dialog steps.

Exit codes:
  0  Success.
  1  Dataset or I/O error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_session = DEFAULT_SESSION
    )
}
