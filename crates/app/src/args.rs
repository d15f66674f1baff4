use std::fmt;

use lesson_core::model::{
    AccessibilitySettingsDraft, ColorBlindness, FontFamily, Theme,
};

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownSubcommand(String),
    InvalidDbUrl { raw: String },
    InvalidValue { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownSubcommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  aacl [lesson]  [--db <sqlite_url>] [--fast]");
    eprintln!("  aacl profile   [--db <sqlite_url>]");
    eprintln!("  aacl reset     [--db <sqlite_url>]");
    eprintln!("  aacl settings  [--db <sqlite_url>] [--font lexend|opendyslexic]");
    eprintln!("                 [--theme default|dark|high-contrast]");
    eprintln!("                 [--color-blindness none|protanopia|deuteranopia|tritanopia|achromatopsia]");
    eprintln!("                 [--reading-ruler on|off] [--adhd on|off] [--bionic on|off]");
    eprintln!("                 [--font-size <0.8-1.5>] [--line-height <1.0-3.0>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://aacl.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  AACL_DB_URL, AACL_FAST, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Lesson,
    Profile,
    Reset,
    Settings,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "lesson" => Some(Self::Lesson),
            "profile" => Some(Self::Profile),
            "reset" => Some(Self::Reset),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub command: Command,
    pub db_url: String,
    pub fast: bool,
    pub settings: AccessibilitySettingsDraft,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.parse().map_err(|_| ArgsError::InvalidValue { flag, raw })
}

fn parse_switch(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<bool, ArgsError> {
    let raw = require_value(args, flag)?;
    match raw.as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(ArgsError::InvalidValue { flag, raw }),
    }
}

impl Args {
    /// Parse `argv` (without the program name). `Ok(None)` means help was requested.
    pub fn parse(argv: Vec<String>) -> Result<Option<Self>, ArgsError> {
        let mut iter = argv.into_iter().peekable();

        // Default behavior: a lesson when no subcommand is provided.
        let command = match iter.next_if(|first| !first.starts_with('-')) {
            None => Command::Lesson,
            Some(first) => Command::from_arg(&first)
                .ok_or_else(|| ArgsError::UnknownSubcommand(first.clone()))?,
        };

        let mut db_url = std::env::var("AACL_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://aacl.sqlite3".into(), normalize_sqlite_url);
        let mut fast = std::env::var("AACL_FAST").is_ok_and(|value| value == "1");
        let mut settings = AccessibilitySettingsDraft::new();

        while let Some(arg) = iter.next() {
            match (command, arg.as_str()) {
                (_, "--help" | "-h") => return Ok(None),
                (_, "--db") => {
                    let value = require_value(&mut iter, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                (Command::Lesson, "--fast") => fast = true,
                (Command::Settings, "--font") => {
                    settings.font = Some(parse_value::<FontFamily>(&mut iter, "--font")?);
                }
                (Command::Settings, "--theme") => {
                    settings.theme = Some(parse_value::<Theme>(&mut iter, "--theme")?);
                }
                (Command::Settings, "--color-blindness") => {
                    settings.color_blindness =
                        Some(parse_value::<ColorBlindness>(&mut iter, "--color-blindness")?);
                }
                (Command::Settings, "--reading-ruler") => {
                    settings.reading_ruler = Some(parse_switch(&mut iter, "--reading-ruler")?);
                }
                (Command::Settings, "--adhd") => {
                    settings.adhd_mode = Some(parse_switch(&mut iter, "--adhd")?);
                }
                (Command::Settings, "--bionic") => {
                    settings.bionic_mode = Some(parse_switch(&mut iter, "--bionic")?);
                }
                (Command::Settings, "--font-size") => {
                    settings.font_scale = Some(parse_value::<f32>(&mut iter, "--font-size")?);
                }
                (Command::Settings, "--line-height") => {
                    settings.line_height = Some(parse_value::<f32>(&mut iter, "--line-height")?);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            command,
            db_url,
            fast,
            settings,
        }))
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist before sqlx opens it.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn defaults_to_lesson() {
        let args = Args::parse(argv(&["--db", "sqlite::memory:", "--fast"]))
            .unwrap()
            .unwrap();
        assert_eq!(args.command, Command::Lesson);
        assert_eq!(args.db_url, "sqlite::memory:");
        assert!(args.fast);
        assert!(args.settings.is_empty());
    }

    #[test]
    fn settings_flags_build_a_draft() {
        let args = Args::parse(argv(&[
            "settings",
            "--theme",
            "high-contrast",
            "--adhd",
            "on",
            "--font-size",
            "1.25",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(args.command, Command::Settings);
        assert_eq!(args.settings.theme, Some(Theme::HighContrast));
        assert_eq!(args.settings.adhd_mode, Some(true));
        assert_eq!(args.settings.font_scale, Some(1.25));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Args::parse(argv(&["quiz"])),
            Err(ArgsError::UnknownSubcommand(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["profile", "--fast"])),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["settings", "--theme", "neon"])),
            Err(ArgsError::InvalidValue { flag: "--theme", .. })
        ));
        assert!(matches!(
            Args::parse(argv(&["settings", "--bionic"])),
            Err(ArgsError::MissingValue { flag: "--bionic" })
        ));
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/aacl.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/aacl.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
