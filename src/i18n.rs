use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::models::Language;

const LANG_FILE_PREFIX: &str = "strings.";
const LANG_FILE_SUFFIX: &str = ".toml";

/// Translation tables plus the immutable language registry.
///
/// Built once at startup from the configured directories: every
/// `strings.<code>.toml` in the languages directory becomes one language,
/// and each language must have an icon file (any extension) whose stem is
/// the code. A language without an icon is a fatal configuration error.
#[derive(Debug)]
pub struct Localization {
    tables: HashMap<String, HashMap<String, String>>,
    languages: Vec<Language>,
    current: String,
}

impl Localization {
    pub fn load(languages_dir: &Path, icons_dir: &Path) -> Result<Self> {
        let mut tables = HashMap::new();
        let mut languages = Vec::new();

        let entries = fs::read_dir(languages_dir).with_context(|| {
            format!("failed to read languages directory {}", languages_dir.display())
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(code) = language_code(&path) else {
                continue;
            };

            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read language file {}", path.display()))?;
            let table: HashMap<String, String> = toml::from_str(&text)
                .with_context(|| format!("invalid language file {}", path.display()))?;

            let Some(icon_path) = find_icon(icons_dir, &code)? else {
                bail!(
                    "no icon for language '{}' found in {}",
                    code,
                    icons_dir.display()
                );
            };

            languages.push(Language {
                code: code.clone(),
                icon_path,
            });
            tables.insert(code, table);
        }

        if languages.is_empty() {
            bail!(
                "no language files (strings.<code>.toml) found in {}",
                languages_dir.display()
            );
        }
        languages.sort_by(|a, b| a.code.cmp(&b.code));

        let current = languages[0].code.clone();
        Ok(Self {
            tables,
            languages,
            current,
        })
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Select a language. Unknown codes are ignored; returns whether the
    /// language changed.
    pub fn set_language(&mut self, code: &str) -> bool {
        if code == self.current || !self.tables.contains_key(code) {
            return false;
        }
        self.current = code.to_string();
        true
    }

    /// Switch to the next language in registry order, wrapping around.
    pub fn cycle_language(&mut self) {
        let Some(pos) = self.languages.iter().position(|l| l.code == self.current) else {
            return;
        };
        let next = (pos + 1) % self.languages.len();
        self.current = self.languages[next].code.clone();
    }

    /// Translated text for a key in the current language. Pure given
    /// (key, current language). Unknown keys fall back to the key itself.
    pub fn get(&self, key: &str) -> String {
        self.tables
            .get(&self.current)
            .and_then(|table| table.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// `strings.de.toml` -> `de`
fn language_code(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let code = name
        .strip_prefix(LANG_FILE_PREFIX)?
        .strip_suffix(LANG_FILE_SUFFIX)?;
    (!code.is_empty()).then(|| code.to_string())
}

/// First file in the icon directory whose stem equals the language code.
fn find_icon(icons_dir: &Path, code: &str) -> Result<Option<PathBuf>> {
    let entries = fs::read_dir(icons_dir)
        .with_context(|| format!("failed to read icons directory {}", icons_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.file_stem().and_then(|s| s.to_str()) == Some(code) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_language(dir: &Path, code: &str, body: &str) {
        fs::write(dir.join(format!("strings.{code}.toml")), body).unwrap();
    }

    fn write_icon(dir: &Path, code: &str) {
        fs::write(dir.join(format!("{code}.png")), b"icon").unwrap();
    }

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let languages = dir.path().join("languages");
        let icons = dir.path().join("icons");
        fs::create_dir_all(&languages).unwrap();
        fs::create_dir_all(&icons).unwrap();
        (dir, languages, icons)
    }

    #[test]
    fn test_loads_languages_sorted_by_code() {
        let (_dir, languages, icons) = setup();
        write_language(&languages, "en", "HeaderID = \"ID\"");
        write_language(&languages, "de", "HeaderID = \"Nr.\"");
        write_icon(&icons, "en");
        write_icon(&icons, "de");

        let loc = Localization::load(&languages, &icons).unwrap();
        let codes: Vec<&str> = loc.languages().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["de", "en"]);
        assert_eq!(loc.current(), "de");
        assert_eq!(loc.languages()[0].icon_path, icons.join("de.png"));
    }

    #[test]
    fn test_missing_icon_is_fatal() {
        let (_dir, languages, icons) = setup();
        write_language(&languages, "en", "HeaderID = \"ID\"");
        write_language(&languages, "fr", "HeaderID = \"No\"");
        write_icon(&icons, "en");

        let err = Localization::load(&languages, &icons).unwrap_err();
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn test_icon_must_be_a_file_not_a_directory() {
        let (_dir, languages, icons) = setup();
        write_language(&languages, "en", "HeaderID = \"ID\"");
        fs::create_dir_all(icons.join("en")).unwrap();

        let err = Localization::load(&languages, &icons).unwrap_err();
        assert!(err.to_string().contains("en"));
    }

    #[test]
    fn test_empty_languages_directory_is_fatal() {
        let (_dir, languages, icons) = setup();
        assert!(Localization::load(&languages, &icons).is_err());
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let (_dir, languages, icons) = setup();
        write_language(&languages, "en", "HeaderID = \"ID\"");
        write_icon(&icons, "en");
        fs::write(languages.join("readme.txt"), "not a language").unwrap();
        fs::write(languages.join("strings.toml"), "x = \"y\"").unwrap();

        let loc = Localization::load(&languages, &icons).unwrap();
        assert_eq!(loc.languages().len(), 1);
    }

    #[test]
    fn test_get_translates_in_current_language() {
        let (_dir, languages, icons) = setup();
        write_language(&languages, "en", "PriorityHigh = \"High\"");
        write_language(&languages, "de", "PriorityHigh = \"Hoch\"");
        write_icon(&icons, "en");
        write_icon(&icons, "de");

        let mut loc = Localization::load(&languages, &icons).unwrap();
        assert_eq!(loc.get("PriorityHigh"), "Hoch");
        assert!(loc.set_language("en"));
        assert_eq!(loc.get("PriorityHigh"), "High");
        // Same key and language always yields the same text
        assert_eq!(loc.get("PriorityHigh"), "High");
    }

    #[test]
    fn test_unknown_keys_fall_back_to_the_key() {
        let (_dir, languages, icons) = setup();
        write_language(&languages, "en", "PriorityHigh = \"High\"");
        write_icon(&icons, "en");

        let loc = Localization::load(&languages, &icons).unwrap();
        assert_eq!(loc.get("NoSuchKey"), "NoSuchKey");
    }

    #[test]
    fn test_set_language_rejects_unknown_codes() {
        let (_dir, languages, icons) = setup();
        write_language(&languages, "en", "");
        write_icon(&icons, "en");

        let mut loc = Localization::load(&languages, &icons).unwrap();
        assert!(!loc.set_language("xx"));
        assert_eq!(loc.current(), "en");
    }

    #[test]
    fn test_cycle_language_wraps_around() {
        let (_dir, languages, icons) = setup();
        for code in ["de", "en", "fr"] {
            write_language(&languages, code, "");
            write_icon(&icons, code);
        }

        let mut loc = Localization::load(&languages, &icons).unwrap();
        assert_eq!(loc.current(), "de");
        loc.cycle_language();
        assert_eq!(loc.current(), "en");
        loc.cycle_language();
        assert_eq!(loc.current(), "fr");
        loc.cycle_language();
        assert_eq!(loc.current(), "de");
    }
}
