// Lexicon assembly: building a lexicon from an ordered list of sources.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::Result;
use crate::language::LanguageProvider;
use crate::lexicon::Lexicon;
use crate::sources::LexiconSource;

/// Build a lexicon from `sources`, consumed in order.
///
/// Each source is opened, drained, and dropped (closed) before the next one
/// starts. Lemmata sharing a key across sources are all kept, in source
/// order. The first failing source aborts the import; the partially built
/// lexicon is discarded.
pub fn import_lexicon(
    language: Arc<LanguageProvider>,
    name: impl Into<String>,
    description: impl Into<String>,
    sources: Vec<Box<dyn LexiconSource>>,
) -> Result<Lexicon> {
    let mut lexicon = Lexicon::new(language, name, description);
    tracing::info!(
        lexicon = lexicon.name(),
        language = lexicon.language().key(),
        sources = sources.len(),
        "importing lexicon",
    );

    for mut source in sources {
        let before = lexicon.len();
        source.open()?;
        for lemma in source.lemmata()? {
            lexicon.add(lemma?);
        }
        tracing::debug!(
            source = source.name(),
            lemmata = lexicon.len() - before,
            "source imported",
        );
    }

    tracing::info!(
        lexicon = lexicon.name(),
        lemmata = lexicon.len(),
        "lexicon imported",
    );
    Ok(lexicon)
}

/// [`import_lexicon`] on the blocking thread pool.
///
/// Must be called from within a tokio runtime. Dropping the handle does not
/// stop the import; the result is simply never observed.
pub fn spawn_import(
    language: Arc<LanguageProvider>,
    name: String,
    description: String,
    sources: Vec<Box<dyn LexiconSource>>,
) -> JoinHandle<Result<Lexicon>> {
    tokio::task::spawn_blocking(move || import_lexicon(language, name, description, sources))
}

#[cfg(test)]
mod tests {
    use lexica_model::Lemma;

    use super::*;
    use crate::error::LexiconError;
    use crate::segmentation::CharSegmenter;
    use crate::sources::{LemmaStream, MemorySource};

    fn language() -> Arc<LanguageProvider> {
        Arc::new(LanguageProvider::new(
            "en",
            "English",
            Arc::new(CharSegmenter::default()),
        ))
    }

    fn memory(name: &str, entries: &[(&str, &str)]) -> Box<dyn LexiconSource> {
        let lemmata = entries
            .iter()
            .map(|(key, form)| Lemma::new(*key, *form, Vec::new()))
            .collect();
        Box::new(MemorySource::new(name, lemmata))
    }

    /// A source whose `open` always fails.
    struct Unreachable;

    impl LexiconSource for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn open(&mut self) -> Result<()> {
            Err(LexiconError::source_failure("unreachable", "connection refused"))
        }

        fn lemmata(&mut self) -> Result<LemmaStream<'_>> {
            unreachable!("never opened")
        }
    }

    #[test]
    fn duplicate_keys_across_sources_are_kept_in_order() {
        let lexicon = import_lexicon(
            language(),
            "merged",
            "",
            vec![memory("A", &[("X", "alpha")]), memory("B", &[("X", "beta")])],
        )
        .unwrap();

        let forms: Vec<&str> = lexicon.lemmata_by_key("X").map(Lemma::form).collect();
        assert_eq!(forms, ["alpha", "beta"]);
    }

    #[test]
    fn every_lemma_is_searchable() {
        let lexicon = import_lexicon(
            language(),
            "animals",
            "",
            vec![
                memory("a", &[("K1", "cat"), ("K2", "cot")]),
                memory("b", &[("K3", "dog")]),
            ],
        )
        .unwrap();
        assert_eq!(lexicon.len(), 3);
        for lemma in lexicon.lemmata() {
            let hits = lexicon.get_lemmata(lemma.form(), 0.0).unwrap();
            assert!(hits.iter().any(|r| std::ptr::eq(r.lemma, lemma)));
        }
    }

    #[test]
    fn failing_source_aborts_import() {
        let result = import_lexicon(
            language(),
            "broken",
            "",
            vec![memory("ok", &[("K1", "cat")]), Box::new(Unreachable)],
        );
        match result {
            Err(LexiconError::Source { source_name, .. }) => {
                assert_eq!(source_name, "unreachable")
            }
            other => panic!("expected a source error, got {other:?}"),
        }
    }

    #[test]
    fn empty_key_is_imported() {
        let lexicon = import_lexicon(
            language(),
            "blank",
            "",
            vec![memory("m", &[("K1", "cat"), ("", "dog")])],
        )
        .unwrap();
        assert_eq!(lexicon.len(), 2);
        let forms: Vec<&str> = lexicon.lemmata_by_key("").map(Lemma::form).collect();
        assert_eq!(forms, ["dog"]);
    }

    #[test]
    fn no_sources_gives_empty_lexicon() {
        let lexicon = import_lexicon(language(), "empty", "nothing here", Vec::new()).unwrap();
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.description(), "nothing here");
    }

    #[tokio::test]
    async fn spawn_import_runs_in_background() {
        let lexicon = spawn_import(
            language(),
            "bg".to_string(),
            String::new(),
            vec![memory("m", &[("K1", "cat")])],
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(lexicon.len(), 1);
    }
}
