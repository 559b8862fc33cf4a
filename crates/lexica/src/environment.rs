// Process-level orchestration of setup, language registry and loaded lexica.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::assembly::spawn_import;
use crate::collection::LexiconCollection;
use crate::error::Result;
use crate::language::LanguageProviders;
use crate::lexicon::Lexicon;
use crate::setup::LexicaSetup;
use crate::snapshot::{spawn_load, spawn_save};

/// A validated setup together with the language registry it declares and
/// the collection its lexica are installed into.
///
/// Load and import run on the blocking thread pool. Results are installed
/// only once every lexicon of the affected languages has been built, so a
/// failure leaves the collection as it was.
#[derive(Debug)]
pub struct LexicaEnvironment {
    setup: LexicaSetup,
    languages: LanguageProviders,
    lexica: Arc<LexiconCollection>,
}

impl LexicaEnvironment {
    pub fn new(setup: LexicaSetup) -> Result<Self> {
        Self::with_collection(setup, Arc::new(LexiconCollection::new()))
    }

    /// Use an existing collection, e.g. one shared with other components.
    pub fn with_collection(setup: LexicaSetup, lexica: Arc<LexiconCollection>) -> Result<Self> {
        setup.validate()?;
        let languages = setup.language_providers()?;
        Ok(Self {
            setup,
            languages,
            lexica,
        })
    }

    /// Read the setup from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(LexicaSetup::from_path(path)?)
    }

    pub fn setup(&self) -> &LexicaSetup {
        &self.setup
    }

    pub fn languages(&self) -> &LanguageProviders {
        &self.languages
    }

    pub fn lexica(&self) -> &Arc<LexiconCollection> {
        &self.lexica
    }

    /// Load the snapshots listed for `language`, replacing that language's
    /// lexica. Returns the loaded lexica.
    pub async fn load_lexica_for(&self, language: &str) -> Result<Vec<Arc<Lexicon>>> {
        let provider = self.languages.require(language)?;
        let handles = self
            .setup
            .providers_for(language)
            .map(|spec| spawn_load(spec.path.clone(), Arc::clone(&provider)))
            .collect();

        let loaded = join_all(handles).await?;
        self.lexica.replace(language, loaded.clone())?;
        Ok(loaded)
    }

    /// Load every listed snapshot, replacing the whole collection.
    pub async fn load_all_lexica(&self) -> Result<Vec<Arc<Lexicon>>> {
        let mut handles = Vec::with_capacity(self.setup.lexicon_providers.len());
        for spec in &self.setup.lexicon_providers {
            let provider = self.languages.require(&spec.language)?;
            handles.push(spawn_load(spec.path.clone(), provider));
        }

        let loaded = join_all(handles).await?;
        self.lexica.replace_all(loaded.clone());
        Ok(loaded)
    }

    /// Import the source sets of `language`, replacing that language's
    /// lexica. Returns the imported lexica.
    pub async fn import_lexica_for(&self, language: &str) -> Result<Vec<Arc<Lexicon>>> {
        let provider = self.languages.require(language)?;
        let handles = self
            .setup
            .source_sets_for(language)
            .map(|set| {
                let sources = set.sources.iter().map(|s| s.build()).collect();
                spawn_import(
                    Arc::clone(&provider),
                    set.name.clone(),
                    set.description.clone(),
                    sources,
                )
            })
            .collect();

        let imported = join_all(handles).await?;
        self.lexica.replace(language, imported.clone())?;
        Ok(imported)
    }

    /// Import every source set, replacing the whole collection.
    pub async fn import_all_lexica(&self) -> Result<Vec<Arc<Lexicon>>> {
        let mut handles = Vec::with_capacity(self.setup.source_sets.len());
        for set in &self.setup.source_sets {
            let provider = self.languages.require(&set.language)?;
            let sources = set.sources.iter().map(|s| s.build()).collect();
            handles.push(spawn_import(
                provider,
                set.name.clone(),
                set.description.clone(),
                sources,
            ));
        }

        let imported = join_all(handles).await?;
        self.lexica.replace_all(imported.clone());
        Ok(imported)
    }

    /// Write a lexicon snapshot to `path`.
    pub async fn save_lexicon(&self, lexicon: Arc<Lexicon>, path: impl Into<PathBuf>) -> Result<()> {
        spawn_save(lexicon, path.into()).await?
    }
}

/// Await every handle in order. The first failure is returned once all
/// tasks have finished, so none keeps running unobserved.
async fn join_all(handles: Vec<JoinHandle<Result<Lexicon>>>) -> Result<Vec<Arc<Lexicon>>> {
    let mut lexica = Vec::with_capacity(handles.len());
    let mut failure = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(lexicon)) => lexica.push(Arc::new(lexicon)),
            Ok(Err(error)) => {
                failure.get_or_insert(error);
            }
            Err(error) => {
                failure.get_or_insert(error.into());
            }
        }
    }

    match failure {
        Some(error) => {
            tracing::warn!(%error, "lexica not installed");
            Err(error)
        }
        None => Ok(lexica),
    }
}
