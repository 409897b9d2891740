use crate::prefs::ThemeMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "momonga-playground")]
#[command(about = "Terminal playground for the momonga language")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/momonga-playground/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Interpreter program, overriding `interpreter.program` from the config
    #[arg(long, value_name = "PROGRAM")]
    pub interpreter: Option<String>,

    /// Snippet to open at startup (see --list-snippets)
    #[arg(long, value_name = "KEY")]
    pub snippet: Option<String>,

    /// Color theme; also saved as the new preference
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<ThemeMode>,

    /// Write logs to this file instead of the default state directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Preferences file (layout and theme)
    #[arg(long, value_name = "PATH")]
    pub prefs: Option<PathBuf>,

    /// Print the built-in snippets and exit
    #[arg(long)]
    pub list_snippets: bool,
}

fn parse_theme(s: &str) -> Result<ThemeMode, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "momonga-playground",
            "--theme",
            "light",
            "--snippet",
            "array",
            "--interpreter",
            "/usr/local/bin/momonga",
        ])
        .unwrap();

        assert_eq!(cli.theme, Some(ThemeMode::Light));
        assert_eq!(cli.snippet.as_deref(), Some("array"));
        assert_eq!(cli.interpreter.as_deref(), Some("/usr/local/bin/momonga"));
        assert!(!cli.list_snippets);
    }

    #[test]
    fn test_bad_theme_rejected() {
        assert!(Cli::try_parse_from(["momonga-playground", "--theme", "sepia"]).is_err());
    }
}
