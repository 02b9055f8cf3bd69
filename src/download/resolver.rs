//! Source resolution: which archives to process, and in which mode.
//!
//! Sources come from an ordered chain of providers. The first provider that
//! yields at least one source wins and every later provider is ignored:
//!
//! 1. `ZIP_URLS`: comma-separated list
//! 2. `ZIP_URLS_FILE`: newline-delimited file, if it exists
//! 3. `urls.txt` in the working directory, if it exists
//! 4. command-line arguments that look like `http://`, `https://` or `file://`
//!
//! The mode is resolved independently: `MODE` (default `both`), overridden
//! by `--mode`/`-m`. Unknown tokens fall back to `both` without complaint.

use std::env;
use std::path::PathBuf;

use crate::core::config;
use crate::download::source::{has_prefix_ignore_case, Mode, Source};

/// One origin in the precedence chain.
pub trait SourceProvider: Send + Sync {
    /// Human-readable origin name, used in logs
    fn name(&self) -> &str;

    /// Sources from this origin, in order. `None` when the origin is absent
    /// or yields nothing after trimming.
    fn provide(&self) -> Option<Vec<Source>>;
}

/// Parse trimmed, non-empty candidates, keeping their order.
fn collect_sources<'a>(candidates: impl Iterator<Item = &'a str>) -> Option<Vec<Source>> {
    let sources: Vec<Source> = candidates.filter_map(Source::parse).collect();
    if sources.is_empty() {
        None
    } else {
        Some(sources)
    }
}

/// Comma-separated list held in an environment variable.
pub struct EnvListProvider {
    value: Option<String>,
}

impl EnvListProvider {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }
}

impl SourceProvider for EnvListProvider {
    fn name(&self) -> &str {
        config::sources::LIST_ENV
    }

    fn provide(&self) -> Option<Vec<Source>> {
        collect_sources(self.value.as_deref()?.split(','))
    }
}

/// Newline-delimited list file. Missing files are skipped silently.
pub struct ListFileProvider {
    name: String,
    path: Option<PathBuf>,
}

impl ListFileProvider {
    pub fn new(name: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }
}

impl SourceProvider for ListFileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self) -> Option<Vec<Source>> {
        let path = self.path.as_ref()?;
        if !path.exists() {
            return None;
        }

        match fs_err::read_to_string(path) {
            Ok(contents) => collect_sources(contents.lines()),
            Err(e) => {
                log::warn!("⚠️  Could not read source list: {}", e);
                None
            }
        }
    }
}

/// Command-line arguments recognized by their URI scheme.
pub struct CliArgsProvider {
    args: Vec<String>,
}

impl CliArgsProvider {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }
}

impl SourceProvider for CliArgsProvider {
    fn name(&self) -> &str {
        "command line"
    }

    fn provide(&self) -> Option<Vec<Source>> {
        collect_sources(
            self.args
                .iter()
                .map(|arg| arg.trim())
                .filter(|arg| {
                    config::sources::CLI_PREFIXES
                        .iter()
                        .any(|prefix| has_prefix_ignore_case(arg, prefix))
                }),
        )
    }
}

/// Raw values the resolver works from.
///
/// Kept separate from the process environment so resolution can be tested
/// without touching global state.
#[derive(Debug, Clone, Default)]
pub struct ResolverInputs {
    /// Value of `ZIP_URLS`
    pub env_list: Option<String>,
    /// Value of `ZIP_URLS_FILE`
    pub env_file: Option<PathBuf>,
    /// Default list file (`urls.txt` in the working directory)
    pub default_file: Option<PathBuf>,
    /// Positional command-line arguments
    pub args: Vec<String>,
    /// Value of `MODE`
    pub env_mode: Option<String>,
    /// Value following `--mode`/`-m`
    pub mode_flag: Option<String>,
}

impl ResolverInputs {
    /// Capture the current process environment plus the parsed command line.
    pub fn from_env(args: Vec<String>, mode_flag: Option<String>) -> Self {
        let non_blank = |key: &str| env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            env_list: non_blank(config::sources::LIST_ENV),
            env_file: non_blank(config::sources::FILE_ENV).map(PathBuf::from),
            default_file: env::current_dir()
                .ok()
                .map(|cwd| cwd.join(config::sources::DEFAULT_FILE)),
            args,
            env_mode: env::var(config::sources::MODE_ENV).ok(),
            mode_flag,
        }
    }
}

/// Outcome of resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Sources in processing order (may be empty)
    pub sources: Vec<Source>,
    /// Mode for the whole run
    pub mode: Mode,
    /// Name of the provider that supplied the sources
    pub origin: Option<String>,
}

/// Ordered fallback over [`SourceProvider`]s, plus mode resolution.
pub struct SourceResolver {
    providers: Vec<Box<dyn SourceProvider>>,
    env_mode: Option<String>,
    mode_flag: Option<String>,
}

impl SourceResolver {
    /// Create a resolver with no providers.
    pub fn new(env_mode: Option<String>, mode_flag: Option<String>) -> Self {
        Self {
            providers: Vec::new(),
            env_mode,
            mode_flag,
        }
    }

    /// Append a provider. Providers are consulted in insertion order.
    pub fn register(&mut self, provider: Box<dyn SourceProvider>) {
        self.providers.push(provider);
    }

    /// Build the standard four-step chain from captured inputs.
    pub fn from_inputs(inputs: ResolverInputs) -> Self {
        let mut resolver = Self::new(inputs.env_mode, inputs.mode_flag);
        resolver.register(Box::new(EnvListProvider::new(inputs.env_list)));
        resolver.register(Box::new(ListFileProvider::new(
            config::sources::FILE_ENV,
            inputs.env_file,
        )));
        resolver.register(Box::new(ListFileProvider::new(
            config::sources::DEFAULT_FILE,
            inputs.default_file,
        )));
        resolver.register(Box::new(CliArgsProvider::new(inputs.args)));
        resolver
    }

    /// The mode: flag beats environment, unknown tokens become `Both`.
    pub fn resolve_mode(&self) -> Mode {
        let token = self.mode_flag.as_deref().or(self.env_mode.as_deref());
        Mode::resolve(token)
    }

    /// Walk the chain and resolve the mode. Never fails; no sources is a
    /// valid (empty) result.
    pub fn resolve(&self) -> Resolution {
        let mode = self.resolve_mode();

        for provider in &self.providers {
            if let Some(sources) = provider.provide() {
                log::debug!("Resolved {} source(s) from {}", sources.len(), provider.name());
                return Resolution {
                    sources,
                    mode,
                    origin: Some(provider.name().to_string()),
                };
            }
        }

        Resolution {
            sources: Vec::new(),
            mode,
            origin: None,
        }
    }
}
