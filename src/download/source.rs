//! Source descriptors and the operating mode.
//!
//! A `Source` is one reference to a ZIP archive. Parsing is purely textual;
//! whether the target exists or the scheme is usable is decided later by the
//! acquirer.

use std::fmt;
use std::path::PathBuf;

const FILE_SCHEME: &str = "file://";

/// One archive reference, as given by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Anything with a `scheme://` prefix other than `file://`
    RemoteUrl(String),
    /// A plain filesystem path
    LocalPath(PathBuf),
    /// An explicit `file://` URI
    InlineFileUrl(String),
}

impl Source {
    /// Parse a raw candidate. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if has_prefix_ignore_case(raw, FILE_SCHEME) {
            Some(Source::InlineFileUrl(raw.to_string()))
        } else if raw.contains("://") {
            Some(Source::RemoteUrl(raw.to_string()))
        } else {
            Some(Source::LocalPath(PathBuf::from(raw)))
        }
    }

    /// Filesystem path named by an inline `file://` URI (scheme stripped verbatim).
    pub fn inline_path(raw: &str) -> PathBuf {
        let stripped = if has_prefix_ignore_case(raw, FILE_SCHEME) {
            &raw[FILE_SCHEME.len()..]
        } else {
            raw
        };
        PathBuf::from(stripped)
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::RemoteUrl(_) => "remote",
            Source::LocalPath(_) => "local",
            Source::InlineFileUrl(_) => "file-url",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::RemoteUrl(url) | Source::InlineFileUrl(url) => write!(f, "{}", url),
            Source::LocalPath(path) => write!(f, "{}", path.display()),
        }
    }
}

/// `str::starts_with`, ASCII case-insensitive.
pub(crate) fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// What happens to every discovered video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Copy into the output directory only
    DownloadOnly,
    /// Open with the default media application only
    PlayOnly,
    /// Copy, then open the copy
    #[default]
    Both,
}

impl Mode {
    /// Parse a mode token (`download`, `play`, `both`), case-insensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "download" => Some(Mode::DownloadOnly),
            "play" => Some(Mode::PlayOnly),
            "both" => Some(Mode::Both),
            _ => None,
        }
    }

    /// Resolve an optional token; anything unrecognized silently becomes `Both`.
    pub fn resolve(token: Option<&str>) -> Self {
        token.and_then(Self::from_token).unwrap_or_default()
    }

    /// Whether files are copied into the output directory.
    pub fn saves(self) -> bool {
        matches!(self, Mode::DownloadOnly | Mode::Both)
    }

    /// Whether files are handed to the media opener.
    pub fn plays(self) -> bool {
        matches!(self, Mode::PlayOnly | Mode::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::DownloadOnly => "download",
            Mode::PlayOnly => "play",
            Mode::Both => "both",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
