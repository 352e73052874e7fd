//! Command-line front end for the phrase store.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and open the durable store.
//! - Render notifications and collections as plain terminal output.
//!
//! # Invariants
//! - Exit code 0 on success, 1 on a rejected add or unknown id, 2 on usage
//!   or setup errors.

use log::warn;
use phrasematrix_core::db::open_db;
use phrasematrix_core::{
    init_logging, AppConfig, LogNotifier, Notification, Notifier, Phrase, PhraseProvider, Severity,
    SqliteKvStore,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "usage: phrasematrix [--data-dir DIR] [--locale en|es] [--log-level LEVEL] [--log-dir DIR] <command>

commands:
  add <text...>    add a phrase
  delete <id>      delete a phrase by id
  list             list all phrases, newest first
  search <term>    list phrases containing <term>, ignoring case
  ping             print core health and version
  help             print this message";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add(String),
    Delete(String),
    List,
    Search(String),
    Ping,
    Help,
}

#[derive(Debug, Default)]
struct Overrides {
    data_dir: Option<PathBuf>,
    locale: Option<String>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (overrides, command) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if command == Command::Help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    if command == Command::Ping {
        println!("phrasematrix_core ping={}", phrasematrix_core::ping());
        println!(
            "phrasematrix_core version={}",
            phrasematrix_core::core_version()
        );
        return ExitCode::SUCCESS;
    }

    let config = match resolve_config(overrides) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    match run(&config, command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(2)
        }
    }
}

fn parse_args(args: &[String]) -> Result<(Overrides, Command), String> {
    let mut overrides = Overrides::default();
    let mut rest = args.iter();

    let name = loop {
        let Some(arg) = rest.next() else {
            return Err("missing command".to_string());
        };
        let mut flag_value = |flag: &str| {
            rest.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--data-dir" => overrides.data_dir = Some(PathBuf::from(flag_value(arg.as_str())?)),
            "--locale" => overrides.locale = Some(flag_value(arg.as_str())?),
            "--log-level" => overrides.log_level = Some(flag_value(arg.as_str())?),
            "--log-dir" => overrides.log_dir = Some(PathBuf::from(flag_value(arg.as_str())?)),
            "-h" | "--help" | "help" => return Ok((overrides, Command::Help)),
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            command => break command,
        }
    };

    let operands: Vec<&str> = rest.map(String::as_str).collect();
    let command = match (name, operands.as_slice()) {
        ("add", []) => return Err("add needs phrase text".to_string()),
        ("add", words) => Command::Add(words.join(" ")),
        ("delete", [id]) => Command::Delete((*id).to_string()),
        ("delete", _) => return Err("delete takes exactly one id".to_string()),
        ("list", []) => Command::List,
        ("search", [term]) => Command::Search((*term).to_string()),
        ("search", _) => return Err("search takes exactly one term".to_string()),
        ("ping", []) => Command::Ping,
        (other, _) => return Err(format!("unknown or malformed command `{other}`")),
    };

    Ok((overrides, command))
}

fn resolve_config(overrides: Overrides) -> Result<AppConfig, String> {
    let mut config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(dir) = overrides.data_dir {
        config.data_dir = dir;
    }
    if let Some(locale) = overrides.locale {
        config.set_locale(&locale).map_err(|err| err.to_string())?;
    }
    if let Some(level) = overrides.log_level {
        config
            .set_log_level(&level)
            .map_err(|err| err.to_string())?;
    }
    if let Some(dir) = overrides.log_dir {
        config.set_log_dir(dir);
    }
    config.data_dir = absolutize(&config.data_dir)?;
    Ok(config)
}

fn absolutize(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve current directory: {err}"))?;
    Ok(cwd.join(path))
}

fn run(config: &AppConfig, command: Command) -> Result<bool, String> {
    std::fs::create_dir_all(&config.data_dir).map_err(|err| {
        format!(
            "cannot create data directory `{}`: {err}",
            config.data_dir.display()
        )
    })?;

    let log_dir = absolutize(&config.log_dir())?;
    if let Err(err) = init_logging(config.log_level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(config.db_path()).map_err(|err| err.to_string())?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| err.to_string())?;
    let mut provider = PhraseProvider::initialized(kv, report_notification, config.locale);
    let store = provider.phrases_mut().map_err(|err| err.to_string())?;

    let succeeded = match command {
        Command::Add(text) => match store.add_phrase(&text) {
            Ok(phrase) => {
                println!("{}", phrase.id);
                true
            }
            Err(err) => {
                warn!("event=cli_add module=cli status=rejected reason={}", err.code());
                false
            }
        },
        Command::Delete(id) => {
            let removed = store.delete_phrase(&id);
            if !removed {
                eprintln!("no phrase with id `{id}`");
            }
            removed
        }
        Command::List => {
            print_phrases(store.phrases().iter());
            true
        }
        Command::Search(term) => {
            store.set_search_term(term);
            print_phrases(store.filtered_phrases().into_iter());
            true
        }
        Command::Ping | Command::Help => true,
    };

    Ok(succeeded)
}

/// Records the notification in the log file, then shows it on the terminal.
fn report_notification(notification: Notification) {
    LogNotifier.notify(notification.clone());
    match notification.severity {
        Severity::Default => println!("[{}] {}", notification.title, notification.message),
        Severity::Destructive => eprintln!("[{}] {}", notification.title, notification.message),
    }
}

fn print_phrases<'a>(phrases: impl Iterator<Item = &'a Phrase>) {
    for phrase in phrases {
        println!(
            "{}\t{}\t{}",
            phrase.id,
            phrase.created_at.format("%Y-%m-%d %H:%M"),
            phrase.text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Command};
    use std::path::PathBuf;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_flags_before_command() {
        let (overrides, command) = parse_args(&args(&[
            "--data-dir",
            "/tmp/pm",
            "--locale",
            "es",
            "add",
            "Hola",
            "mundo",
        ]))
        .unwrap();

        assert_eq!(overrides.data_dir, Some(PathBuf::from("/tmp/pm")));
        assert_eq!(overrides.locale.as_deref(), Some("es"));
        assert_eq!(command, Command::Add("Hola mundo".to_string()));
    }

    #[test]
    fn rejects_missing_operands_and_unknown_flags() {
        assert!(parse_args(&args(&["add"])).is_err());
        assert!(parse_args(&args(&["delete"])).is_err());
        assert!(parse_args(&args(&["--verbose", "list"])).is_err());
        assert!(parse_args(&args(&["--locale"])).is_err());
        assert!(parse_args(&args(&[])).is_err());
    }

    #[test]
    fn help_wins_over_anything_after_it() {
        assert_eq!(parse_args(&args(&["--help"])).unwrap().1, Command::Help);
        assert_eq!(parse_args(&args(&["-h", "add"])).unwrap().1, Command::Help);
        assert_eq!(
            parse_args(&args(&["--locale", "es", "help", "extra"]))
                .unwrap()
                .1,
            Command::Help
        );
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_args(&args(&["list"])).unwrap().1, Command::List);
        assert_eq!(
            parse_args(&args(&["search", "WORLD"])).unwrap().1,
            Command::Search("WORLD".to_string())
        );
        assert_eq!(
            parse_args(&args(&["delete", "abc"])).unwrap().1,
            Command::Delete("abc".to_string())
        );
    }
}
