use clap::error::ErrorKind;
use clap::Parser;

#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "zipreel")]
#[command(author, version, about = "Fetch ZIP archives, pull out the videos inside, then save and/or play them", long_about = None)]
pub struct Cli {
    /// Archive sources (http://, https:// or file:// URIs). Only used when
    /// ZIP_URLS, ZIP_URLS_FILE and urls.txt provide nothing
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// What to do with discovered videos: download, play or both.
    /// Unknown values fall back to both. Overrides MODE
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Keep each per-source work area on disk instead of deleting it
    #[arg(long)]
    pub keep_work_dirs: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse_lenient(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Parse with clap, but never abort the run over arguments we don't know.
    ///
    /// `--help` and `--version` behave as usual. Any other parse error (an
    /// unknown flag, `-m` without a value) falls back to a plain scan where
    /// unrecognized arguments become source candidates and are filtered
    /// later by the resolver.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        match Self::try_parse_from(&args) {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
            Err(_) => Self::scan(&args),
        }
    }

    fn scan(args: &[String]) -> Self {
        let mut cli = Self::default();
        let mut rest = args.iter().skip(1);

        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "-m" | "--mode" => cli.mode = rest.next().cloned(),
                "--keep-work-dirs" => cli.keep_work_dirs = true,
                other => match other.strip_prefix("--mode=") {
                    Some(value) => cli.mode = Some(value.to_string()),
                    None => cli.sources.push(other.to_string()),
                },
            }
        }

        cli
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_mode_and_sources() {
        let cli = Cli::parse_from(["zipreel", "-m", "play", "https://host/a.zip", "file:///tmp/b.zip"]);
        assert_eq!(cli.mode.as_deref(), Some("play"));
        assert_eq!(cli.sources, vec!["https://host/a.zip", "file:///tmp/b.zip"]);
        assert!(!cli.keep_work_dirs);
    }

    #[test]
    fn test_unknown_mode_is_accepted_verbatim() {
        let cli = Cli::parse_from(["zipreel", "--mode", "shuffle", "--keep-work-dirs"]);
        assert_eq!(cli.mode.as_deref(), Some("shuffle"));
        assert!(cli.sources.is_empty());
        assert!(cli.keep_work_dirs);
    }

    #[test]
    fn test_trailing_mode_flag_without_value_is_ignored() {
        let cli = Cli::parse_lenient(["zipreel", "https://host/a.zip", "-m"]);
        assert_eq!(cli.mode, None);
        assert_eq!(cli.sources, vec!["https://host/a.zip"]);
    }

    #[test]
    fn test_unknown_flag_does_not_abort() {
        let cli = Cli::parse_lenient(["zipreel", "--verbose", "https://host/a.zip", "--mode", "download"]);
        assert_eq!(cli.mode.as_deref(), Some("download"));
        assert_eq!(cli.sources, vec!["--verbose", "https://host/a.zip"]);
        assert!(!cli.keep_work_dirs);
    }

    #[test]
    fn test_scan_handles_equals_form_and_keep_flag() {
        let cli = Cli::parse_lenient(["zipreel", "-x", "--mode=play", "--keep-work-dirs", "file:///a.zip"]);
        assert_eq!(
            cli,
            Cli {
                sources: vec!["-x".into(), "file:///a.zip".into()],
                mode: Some("play".into()),
                keep_work_dirs: true,
            }
        );
    }

    #[test]
    fn test_well_formed_arguments_use_clap() {
        let cli = Cli::parse_lenient(["zipreel", "--mode=both", "https://host/a.zip"]);
        assert_eq!(cli.mode.as_deref(), Some("both"));
        assert_eq!(cli.sources, vec!["https://host/a.zip"]);
    }
}
