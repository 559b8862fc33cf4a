// Declarative setup: languages, snapshot locations and import sources.

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};
use crate::language::{LanguageProvider, LanguageProviders};
use crate::segmentation::SegmenterSpec;
use crate::sources::SourceSpec;

/// Root of a lexica setup file.
///
/// ```json
/// {
///   "languages": [
///     { "key": "fi", "name": "Finnish", "segmenter": { "kind": "syllables" } }
///   ],
///   "lexicon_providers": [
///     { "language": "fi", "path": "snapshots/fi-core.lexicon" }
///   ],
///   "source_sets": [
///     {
///       "language": "fi",
///       "name": "fi-core",
///       "sources": [{ "kind": "json_lines", "path": "data/fi.jsonl" }]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexicaSetup {
    #[serde(default)]
    pub languages: Vec<LanguageSpec>,
    /// Snapshots to load, per language.
    #[serde(default)]
    pub lexicon_providers: Vec<LexiconProviderSpec>,
    /// Source lists to import from, per language.
    #[serde(default)]
    pub source_sets: Vec<SourceSetSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageSpec {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub segmenter: SegmenterSpec,
}

/// A snapshot file holding one lexicon of `language`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconProviderSpec {
    pub language: String,
    pub path: PathBuf,
}

/// The ordered sources one lexicon of `language` is imported from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSetSpec {
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sources: Vec<SourceSpec>,
}

impl LexicaSetup {
    /// Parse and validate a setup from JSON text.
    ///
    /// Relative paths are kept as they are.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let setup: Self = serde_json::from_str(json)
            .map_err(|e| LexiconError::Configuration(format!("invalid setup: {e}")))?;
        setup.validate()?;
        Ok(setup)
    }

    /// Read, parse and validate a setup file.
    ///
    /// Relative snapshot and source paths are resolved against the
    /// directory holding the file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LexiconError::io(path, e))?;
        let mut setup: Self = serde_json::from_str(&json).map_err(|e| {
            LexiconError::Configuration(format!("invalid setup {}: {e}", path.display()))
        })?;

        if let Some(base) = path.parent() {
            setup.resolve_paths(base);
        }
        setup.validate()?;
        tracing::debug!(
            path = %path.display(),
            languages = setup.languages.len(),
            "loaded lexica setup",
        );
        Ok(setup)
    }

    /// Check that language keys are unique and non-empty, that segmenter
    /// costs are finite and non-negative, and that every provider and source
    /// set refers to a declared language.
    pub fn validate(&self) -> Result<()> {
        let mut keys = HashSet::new();
        for language in &self.languages {
            if language.key.is_empty() {
                return Err(LexiconError::Configuration(format!(
                    "language '{}' has an empty key",
                    language.name
                )));
            }
            language.segmenter.validate().map_err(|e| match e {
                LexiconError::Configuration(message) => {
                    LexiconError::Configuration(format!("language '{}': {message}", language.key))
                }
                other => other,
            })?;
            if !keys.insert(language.key.as_str()) {
                return Err(LexiconError::Configuration(format!(
                    "language '{}' is declared twice",
                    language.key
                )));
            }
        }

        let check = |language: &str, what: &str| {
            if keys.contains(language) {
                Ok(())
            } else {
                Err(LexiconError::Configuration(format!(
                    "{what} refers to undeclared language '{language}'"
                )))
            }
        };
        for provider in &self.lexicon_providers {
            check(
                &provider.language,
                &format!("lexicon provider {}", provider.path.display()),
            )?;
        }
        for set in &self.source_sets {
            check(&set.language, &format!("source set '{}'", set.name))?;
        }
        Ok(())
    }

    /// Build the language registry the setup declares.
    pub fn language_providers(&self) -> Result<LanguageProviders> {
        let mut providers = LanguageProviders::new();
        for language in &self.languages {
            language.segmenter.validate()?;
            providers.register(LanguageProvider::new(
                &language.key,
                &language.name,
                language.segmenter.build(),
            ))?;
        }
        Ok(providers)
    }

    pub fn providers_for<'a>(
        &'a self,
        language: &'a str,
    ) -> impl Iterator<Item = &'a LexiconProviderSpec> + 'a {
        self.lexicon_providers
            .iter()
            .filter(move |p| p.language == language)
    }

    pub fn source_sets_for<'a>(
        &'a self,
        language: &'a str,
    ) -> impl Iterator<Item = &'a SourceSetSpec> + 'a {
        self.source_sets
            .iter()
            .filter(move |s| s.language == language)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for provider in &mut self.lexicon_providers {
            if provider.path.is_relative() {
                provider.path = base.join(&provider.path);
            }
        }
        for source in self.source_sets.iter_mut().flat_map(|s| &mut s.sources) {
            source.resolve_against(base);
        }
    }
}
