// Language identities and the registry that resolves them.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::error::{LexiconError, Result};
use crate::segmentation::Segmenter;

/// A language a lexicon can be bound to: its key, display name and the
/// segmenter that turns forms into index units.
pub struct LanguageProvider {
    key: String,
    name: String,
    segmenter: Arc<dyn Segmenter>,
}

impl LanguageProvider {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        segmenter: Arc<dyn Segmenter>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            segmenter,
        }
    }

    /// Stable identifier, e.g. `"fi"` or `"grc"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segmenter(&self) -> &dyn Segmenter {
        self.segmenter.as_ref()
    }
}

impl fmt::Debug for LanguageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProvider")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Registry of language providers, keyed by language key.
///
/// Iteration follows registration order.
#[derive(Debug, Default)]
pub struct LanguageProviders {
    providers: Vec<Arc<LanguageProvider>>,
    by_key: HashMap<String, usize>,
}

impl LanguageProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. Fails if its key is already taken.
    pub fn register(&mut self, provider: LanguageProvider) -> Result<Arc<LanguageProvider>> {
        if self.by_key.contains_key(provider.key()) {
            return Err(LexiconError::Configuration(format!(
                "language '{}' is registered twice",
                provider.key()
            )));
        }
        let provider = Arc::new(provider);
        self.by_key
            .insert(provider.key().to_string(), self.providers.len());
        self.providers.push(Arc::clone(&provider));
        Ok(provider)
    }

    pub fn get(&self, key: &str) -> Option<Arc<LanguageProvider>> {
        self.by_key
            .get(key)
            .map(|&i| Arc::clone(&self.providers[i]))
    }

    /// Like [`get`](Self::get), but an unknown key is a configuration error.
    pub fn require(&self, key: &str) -> Result<Arc<LanguageProvider>> {
        self.get(key)
            .ok_or_else(|| LexiconError::Configuration(format!("unknown language '{key}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<LanguageProvider>> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::CharSegmenter;

    fn provider(key: &str) -> LanguageProvider {
        LanguageProvider::new(key, key.to_uppercase(), Arc::new(CharSegmenter::default()))
    }

    #[test]
    fn register_and_resolve() {
        let mut providers = LanguageProviders::new();
        providers.register(provider("fi")).unwrap();
        providers.register(provider("la")).unwrap();

        assert_eq!(providers.len(), 2);
        assert_eq!(providers.get("la").unwrap().name(), "LA");
        assert!(providers.get("grc").is_none());
        let keys: Vec<&str> = providers.iter().map(|p| p.key()).collect();
        assert_eq!(keys, ["fi", "la"]);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut providers = LanguageProviders::new();
        providers.register(provider("fi")).unwrap();
        let err = providers.register(provider("fi")).unwrap_err();
        assert!(matches!(err, LexiconError::Configuration(_)));
        assert_eq!(providers.len(), 1);
    }

    #[test]
    fn require_unknown_language_fails() {
        let providers = LanguageProviders::new();
        assert!(providers.is_empty());
        let err = providers.require("xx").unwrap_err();
        assert!(err.to_string().contains("unknown language 'xx'"));
    }

    #[test]
    fn provider_segments_through_its_segmenter() {
        let p = provider("fi");
        assert_eq!(p.segmenter().segment("Ab"), ["a", "b"]);
    }
}
