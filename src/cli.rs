use clap::Parser;
use const_format::concatcp;

/// Stamped by release builds, e.g. `LIL_BUILD_TIME=$(date -u +%FT%TZ) cargo build --release`.
const BUILD_TIME: &str = match option_env!("LIL_BUILD_TIME") {
    Some(time) => time,
    None => "unknown",
};

/// Unstamped builds report themselves as a development version.
pub const VERSION: &str = match option_env!("LIL_BUILD_TIME") {
    Some(_) => concatcp!(env!("CARGO_PKG_VERSION"), " (built at ", BUILD_TIME, ")"),
    None => "development version",
};

#[derive(Parser, Debug)]
#[command(name = "lil")]
#[command(about = "A menu-bar app listing your assigned Linear issues", version = VERSION)]
#[command(after_help = "CONFIGURATION:
    LINEAR_API_KEY                  Linear personal API key (required)
    RUST_LOG                        Log filter, e.g. lil=debug
    ~/.config/lil/config.toml       Optional api_key, cache_file, tooltip_fallback")]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag_exits_with_version() {
        let err = Cli::try_parse_from(["lil", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(VERSION));
    }

    #[test]
    fn test_version_string_matches_stamp() {
        match option_env!("LIL_BUILD_TIME") {
            Some(time) => {
                assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
                assert!(VERSION.ends_with(&format!("(built at {time})")));
            }
            None => assert_eq!(VERSION, "development version"),
        }
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["lil", "--json"]).is_err());
    }
}
