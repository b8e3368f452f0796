use clap::{Arg, ArgMatches, Command, builder::ValueParser};
use url::Url;

pub const ARG_BACKEND_URL: &str = "backend-url";
pub const ARG_DB: &str = "db";
pub const ARG_VERBOSITY: &str = "verbosity";

pub const DEFAULT_DB_URL: &str = "sqlite://alphatest.sqlite3";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>()
            && parsed <= 5
        {
            return Ok(parsed);
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

/// Accept only absolute http(s) URLs; the API base is derived from this.
#[must_use]
pub fn validator_backend_url() -> ValueParser {
    ValueParser::from(move |raw: &str| -> std::result::Result<Url, String> {
        let url = Url::parse(raw.trim()).map_err(|err| format!("invalid URL: {err}"))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!("unsupported scheme: {other}")),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    Command::new("alphatest")
        .about("Desktop client for the AlphaTest exam practice service")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(ARG_BACKEND_URL)
                .short('b')
                .long("backend-url")
                .help("Backend origin; requests go to <backend-url>/api")
                .env("ALPHATEST_BACKEND_URL")
                .required(true)
                .value_parser(validator_backend_url()),
        )
        .arg(
            Arg::new(ARG_DB)
                .short('d')
                .long("db")
                .help("SQLite database holding the persisted credential")
                .env("ALPHATEST_DB_URL")
                .default_value(DEFAULT_DB_URL),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ALPHATEST_LOG_LEVEL")
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

/// Settings extracted from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub db_url: String,
    pub verbosity: u8,
}

impl Settings {
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let api_base_url = matches
            .get_one::<Url>(ARG_BACKEND_URL)
            .map(api_base_url)
            .unwrap_or_default();
        let db_url = matches
            .get_one::<String>(ARG_DB)
            .cloned()
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());
        let verbosity = matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0);

        Self {
            api_base_url,
            db_url,
            verbosity,
        }
    }
}

/// `<backend>/api`, without doubling slashes.
#[must_use]
pub fn api_base_url(backend: &Url) -> String {
    format!("{}/api", backend.as_str().trim_end_matches('/'))
}
