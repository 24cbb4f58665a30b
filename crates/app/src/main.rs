use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use kids_core::model::{Language, ProfileDraft};
use services::{AppServices, Clock};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context, web_speech_engines};

const DEFAULT_LOG_FILTER: &str = "warn,app=info,ui=info,services=info,kids_core=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLanguage { raw: String },
    InvalidProfile { raw: String },
    InvalidLogFilter { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLanguage { raw } => {
                write!(f, "invalid --lang value: {raw} (expected en, es or fr)")
            }
            ArgsError::InvalidProfile { raw } => {
                write!(f, "invalid --profile value: {raw} (expected <name>:<age>)")
            }
            ArgsError::InvalidLogFilter { raw } => write!(f, "invalid --log value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--lang <en|es|fr>] [--profile <name>:<age>] [--shuffle] [--log <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --lang en");
    eprintln!("  --log {DEFAULT_LOG_FILTER}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  KIDS_LEARN_LANG, KIDS_LEARN_PROFILE, KIDS_LEARN_SHUFFLE, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    language: Language,
    profile: Option<ProfileDraft>,
    shuffle_options: bool,
    log_filter: String,
}

impl Args {
    /// Flags win over the environment, which wins over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut language = env("KIDS_LEARN_LANG")
            .map(|raw| parse_language(&raw))
            .transpose()?
            .unwrap_or_default();
        let mut profile = env("KIDS_LEARN_PROFILE")
            .map(|raw| parse_profile(&raw, language))
            .transpose()?;
        let mut shuffle_options = env("KIDS_LEARN_SHUFFLE")
            .is_some_and(|raw| matches!(raw.trim(), "1" | "true" | "yes"));
        let mut log_filter = env("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--lang" => {
                    let value = require_value(args, "--lang")?;
                    language = parse_language(&value)?;
                }
                "--profile" => {
                    let value = require_value(args, "--profile")?;
                    profile = Some(parse_profile(&value, language)?);
                }
                "--shuffle" => shuffle_options = true,
                "--log" => {
                    let value = require_value(args, "--log")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidLogFilter { raw: value });
                    }
                    log_filter = value;
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        // A launch profile always speaks the final app language.
        if let Some(draft) = profile.as_mut() {
            draft.language = language;
        }

        Ok(Some(Self {
            language,
            profile,
            shuffle_options,
            log_filter,
        }))
    }
}

fn parse_language(raw: &str) -> Result<Language, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidLanguage {
        raw: raw.to_string(),
    })
}

/// `<name>:<age>`; the name may itself contain colons.
fn parse_profile(raw: &str, language: Language) -> Result<ProfileDraft, ArgsError> {
    let invalid = || ArgsError::InvalidProfile {
        raw: raw.to_string(),
    };
    let (name, age) = raw.rsplit_once(':').ok_or_else(invalid)?;
    let age: u8 = age.trim().parse().map_err(|_| invalid())?;
    if name.trim().is_empty() {
        return Err(invalid());
    }
    Ok(ProfileDraft::new(name.trim(), age, language))
}

fn init_tracing(filter: &str) -> Result<(), ArgsError> {
    let filter = EnvFilter::try_new(filter).map_err(|_| ArgsError::InvalidLogFilter {
        raw: filter.to_string(),
    })?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv, |key| std::env::var(key).ok()) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };
    init_tracing(&parsed.log_filter)?;

    let services = AppServices::in_memory(
        Clock::default_clock(),
        parsed.language,
        web_speech_engines(),
    )?
    .with_shuffle_options(parsed.shuffle_options);

    if let Some(draft) = parsed.profile {
        let profile = services.progress().create_profile(draft)?;
        info!(name = profile.name(), age = profile.age(), "launch profile ready");
    }
    info!(language = parsed.language.code(), "launching desktop window");

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Kids Learning")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Option<Args>, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter, |key| {
            env.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        })
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let args = parse(&[], &[]).unwrap().unwrap();
        assert_eq!(args.language, Language::En);
        assert_eq!(args.profile, None);
        assert!(!args.shuffle_options);
        assert_eq!(args.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn flags_override_environment() {
        let args = parse(
            &["--lang", "fr", "--profile", "Zoé:6", "--shuffle"],
            &[("KIDS_LEARN_LANG", "es"), ("RUST_LOG", "debug")],
        )
        .unwrap()
        .unwrap();
        assert_eq!(args.language, Language::Fr);
        assert_eq!(args.profile, Some(ProfileDraft::new("Zoé", 6, Language::Fr)));
        assert!(args.shuffle_options);
        assert_eq!(args.log_filter, "debug");
    }

    #[test]
    fn profile_from_environment_uses_app_language() {
        let args = parse(
            &["--lang", "es"],
            &[("KIDS_LEARN_PROFILE", "Mia:4")],
        )
        .unwrap()
        .unwrap();
        assert_eq!(args.profile, Some(ProfileDraft::new("Mia", 4, Language::Es)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(&["--lang", "de"], &[]),
            Err(ArgsError::InvalidLanguage { .. })
        ));
        assert!(matches!(
            parse(&["--profile", "Mia"], &[]),
            Err(ArgsError::InvalidProfile { .. })
        ));
        assert!(matches!(
            parse(&["--profile", ":7"], &[]),
            Err(ArgsError::InvalidProfile { .. })
        ));
        assert!(matches!(
            parse(&["--lang"], &[]),
            Err(ArgsError::MissingValue { flag: "--lang" })
        ));
        assert!(matches!(
            parse(&["--fullscreen"], &[]),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse(&["--help"], &[]).unwrap().is_none());
    }
}
