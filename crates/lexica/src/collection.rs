// Shared, swappable set of loaded lexica, grouped by language.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;

use crate::error::{LexiconError, Result};
use crate::lexicon::Lexicon;

type Entries = HashMap<String, Vec<Arc<Lexicon>>>;

/// Multimap from language key to the lexica loaded for that language.
///
/// Every mutation happens under one write lock, so a reader sees a language's
/// entries either entirely before or entirely after a swap.
#[derive(Debug, Default)]
pub struct LexiconCollection {
    inner: RwLock<Entries>,
}

impl LexiconCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexica registered for `language`, in the order they were added.
    pub fn get(&self, language: &str) -> Vec<Arc<Lexicon>> {
        self.read().get(language).cloned().unwrap_or_default()
    }

    /// Keys of the languages with at least one lexicon, sorted.
    pub fn languages(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, lexica)| !lexica.is_empty())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Append a lexicon under its own language.
    pub fn add(&self, lexicon: Arc<Lexicon>) {
        let key = lexicon.language().key().to_string();
        self.write().entry(key).or_default().push(lexicon);
    }

    /// Swap the entries of `language` for `lexica`.
    ///
    /// Every lexicon must be bound to `language`; otherwise nothing changes.
    pub fn replace(&self, language: &str, lexica: Vec<Arc<Lexicon>>) -> Result<()> {
        if let Some(stray) = lexica.iter().find(|l| l.language().key() != language) {
            return Err(LexiconError::InvalidArgument(format!(
                "lexicon '{}' belongs to language '{}', not '{language}'",
                stray.name(),
                stray.language().key()
            )));
        }

        let count = lexica.len();
        {
            let mut entries = self.write();
            if lexica.is_empty() {
                entries.remove(language);
            } else {
                entries.insert(language.to_string(), lexica);
            }
        }
        tracing::info!(language, lexica = count, "replaced lexica");
        Ok(())
    }

    /// Swap the whole collection for `lexica`, grouped by their languages.
    pub fn replace_all(&self, lexica: Vec<Arc<Lexicon>>) {
        let count = lexica.len();
        let mut grouped = Entries::new();
        for lexicon in lexica {
            grouped
                .entry(lexicon.language().key().to_string())
                .or_default()
                .push(lexicon);
        }
        let languages = grouped.len();

        *self.write() = grouped;
        tracing::info!(languages, lexica = count, "replaced all lexica");
    }

    /// Drop the entries of `language`, returning them.
    pub fn remove(&self, language: &str) -> Vec<Arc<Lexicon>> {
        self.write().remove(language).unwrap_or_default()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// Total number of lexica across all languages.
    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every write is a single insert, remove or assignment, so a poisoned
    // map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageProvider;
    use crate::segmentation::CharSegmenter;

    fn lexicon(language: &str, name: &str) -> Arc<Lexicon> {
        let provider = Arc::new(LanguageProvider::new(
            language,
            language,
            Arc::new(CharSegmenter::default()),
        ));
        Arc::new(Lexicon::new(provider, name, ""))
    }

    fn names(lexica: &[Arc<Lexicon>]) -> Vec<&str> {
        lexica.iter().map(|l| l.name()).collect()
    }

    #[test]
    fn add_groups_by_language() {
        let collection = LexiconCollection::new();
        collection.add(lexicon("fi", "a"));
        collection.add(lexicon("la", "b"));
        collection.add(lexicon("fi", "c"));

        assert_eq!(names(&collection.get("fi")), ["a", "c"]);
        assert_eq!(names(&collection.get("la")), ["b"]);
        assert!(collection.get("grc").is_empty());
        assert_eq!(collection.languages(), ["fi", "la"]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn replace_swaps_one_language() {
        let collection = LexiconCollection::new();
        collection.add(lexicon("fi", "old"));
        collection.add(lexicon("la", "kept"));

        collection
            .replace("fi", vec![lexicon("fi", "new1"), lexicon("fi", "new2")])
            .unwrap();
        assert_eq!(names(&collection.get("fi")), ["new1", "new2"]);
        assert_eq!(names(&collection.get("la")), ["kept"]);

        collection.replace("fi", Vec::new()).unwrap();
        assert!(collection.get("fi").is_empty());
        assert_eq!(collection.languages(), ["la"]);
    }

    #[test]
    fn replace_rejects_foreign_lexicon() {
        let collection = LexiconCollection::new();
        collection.add(lexicon("fi", "old"));
        let err = collection
            .replace("fi", vec![lexicon("fi", "ok"), lexicon("la", "stray")])
            .unwrap_err();
        assert!(matches!(err, LexiconError::InvalidArgument(_)));
        assert_eq!(names(&collection.get("fi")), ["old"]);
    }

    #[test]
    fn replace_all_and_clear() {
        let collection = LexiconCollection::new();
        collection.add(lexicon("grc", "gone"));
        collection.replace_all(vec![lexicon("fi", "a"), lexicon("la", "b")]);
        assert_eq!(collection.languages(), ["fi", "la"]);
        assert!(collection.get("grc").is_empty());

        assert_eq!(names(&collection.remove("fi")), ["a"]);
        assert_eq!(collection.len(), 1);

        collection.clear();
        assert!(collection.is_empty());
    }

    #[test]
    fn readers_keep_their_snapshot() {
        let collection = LexiconCollection::new();
        collection.add(lexicon("fi", "old"));
        let held = collection.get("fi");
        collection.replace("fi", vec![lexicon("fi", "new")]).unwrap();
        assert_eq!(names(&held), ["old"]);
        assert_eq!(names(&collection.get("fi")), ["new"]);
    }
}
