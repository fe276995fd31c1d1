use std::path::PathBuf;

/// A display language discovered at startup.
///
/// The code is derived from a language file name (`strings.de.toml` -> `de`);
/// the icon is the matching file in the configured icon directory. The
/// registry of languages is built once and immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub icon_path: PathBuf,
}
