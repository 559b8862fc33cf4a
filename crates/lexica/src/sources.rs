// Data sources feeding the assembly pipeline.
//
// A source is opened, drained once through `lemmata`, and closed by dropping
// it. The pipeline never sees anything but the `LexiconSource` trait.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use lexica_model::Lemma;
use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// Lazily produced lemmata of an opened source. Finite and single pass.
pub type LemmaStream<'a> = Box<dyn Iterator<Item = Result<Lemma>> + 'a>;

/// A finite producer of lemmata.
///
/// Resources acquired by [`open`](Self::open) are released when the source
/// is dropped.
pub trait LexiconSource: Send {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Acquire whatever the source reads from. Calling `open` again restarts
    /// the enumeration.
    fn open(&mut self) -> Result<()>;

    /// Enumerate the lemmata. Fails if the source has not been opened.
    fn lemmata(&mut self) -> Result<LemmaStream<'_>>;
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// Lemmata held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    lemmata: Vec<Lemma>,
    opened: bool,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, lemmata: Vec<Lemma>) -> Self {
        Self {
            name: name.into(),
            lemmata,
            opened: false,
        }
    }
}

impl LexiconSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<()> {
        self.opened = true;
        Ok(())
    }

    fn lemmata(&mut self) -> Result<LemmaStream<'_>> {
        if !self.opened {
            return Err(LexiconError::source_failure(&self.name, "source is not open"));
        }
        Ok(Box::new(self.lemmata.iter().cloned().map(Ok)))
    }
}

// ---------------------------------------------------------------------------
// JSON-lines source
// ---------------------------------------------------------------------------

/// A file holding one JSON lemma record per line.
///
/// Blank lines are skipped. A malformed record fails with its 1-based line
/// number.
#[derive(Debug)]
pub struct JsonLinesSource {
    name: String,
    path: PathBuf,
    reader: Option<BufReader<File>>,
}

impl JsonLinesSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            reader: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LexiconSource for JsonLinesSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<()> {
        let file = File::open(&self.path).map_err(|e| LexiconError::io(&self.path, e))?;
        self.reader = Some(BufReader::new(file));
        Ok(())
    }

    fn lemmata(&mut self) -> Result<LemmaStream<'_>> {
        let path = self.path.as_path();
        let reader = self
            .reader
            .take()
            .ok_or_else(|| LexiconError::source_failure(&self.name, "source is not open"))?;

        let records = reader
            .lines()
            .enumerate()
            .filter_map(move |(i, line)| {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => return Some(Err(LexiconError::io(path, e))),
                };
                if line.trim().is_empty() {
                    return None;
                }
                Some(
                    serde_json::from_str::<Lemma>(&line).map_err(|error| LexiconError::Json {
                        path: path.to_path_buf(),
                        line: i + 1,
                        error,
                    }),
                )
            });
        Ok(Box::new(records))
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Declarative description of a source, as found in a setup file.
///
/// ```json
/// { "kind": "json_lines", "path": "data/fi.jsonl" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    JsonLines {
        path: PathBuf,
        #[serde(default)]
        name: Option<String>,
    },
    Inline {
        name: String,
        lemmata: Vec<Lemma>,
    },
}

impl SourceSpec {
    pub fn build(&self) -> Box<dyn LexiconSource> {
        match self {
            SourceSpec::JsonLines { path, name } => {
                let name = name
                    .clone()
                    .unwrap_or_else(|| path.display().to_string());
                Box::new(JsonLinesSource::new(name, path.clone()))
            }
            SourceSpec::Inline { name, lemmata } => {
                Box::new(MemorySource::new(name.clone(), lemmata.clone()))
            }
        }
    }

    /// Resolve a relative file path against `base`.
    pub(crate) fn resolve_against(&mut self, base: &Path) {
        if let SourceSpec::JsonLines { path, .. } = self {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn drain(source: &mut dyn LexiconSource) -> Result<Vec<Lemma>> {
        source.open()?;
        source.lemmata()?.collect()
    }

    #[test]
    fn memory_source_yields_in_order() {
        let mut source = MemorySource::new(
            "mem",
            vec![
                Lemma::new("A", "kala", Vec::new()),
                Lemma::new("B", "kissa", Vec::new()),
            ],
        );
        let keys: Vec<String> = drain(&mut source)
            .unwrap()
            .iter()
            .map(|l| l.key().to_string())
            .collect();
        assert_eq!(keys, ["A", "B"]);
        // Reopening restarts the enumeration.
        assert_eq!(drain(&mut source).unwrap().len(), 2);
    }

    #[test]
    fn lemmata_before_open_fails() {
        let mut source = MemorySource::new("mem", Vec::new());
        assert!(matches!(
            source.lemmata().err(),
            Some(LexiconError::Source { .. })
        ));

        let mut source = JsonLinesSource::new("file", "unused.jsonl");
        assert!(source.lemmata().is_err());
    }

    #[test]
    fn json_lines_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"key":"K1","form":"cat"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            r#"{{"key":"K2","form":"cot","senses":[{{"description":"bed"}}],"notes":["n"]}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let mut source = JsonLinesSource::new("fixture", file.path());
        let lemmata = drain(&mut source).unwrap();
        assert_eq!(lemmata.len(), 2);
        assert_eq!(lemmata[1].form(), "cot");
        assert_eq!(lemmata[1].senses()[0].description(), "bed");
        assert_eq!(lemmata[1].notes(), ["n"]);
    }

    #[test]
    fn malformed_record_reports_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"key":"K1","form":"cat"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"form":"keyless"}}"#).unwrap();
        file.flush().unwrap();

        let mut source = JsonLinesSource::new("fixture", file.path());
        match drain(&mut source) {
            Err(LexiconError::Json { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = JsonLinesSource::new("missing", dir.path().join("none.jsonl"));
        assert!(matches!(source.open(), Err(LexiconError::Io { .. })));
    }

    #[test]
    fn source_spec_builds_sources() {
        let spec: SourceSpec = serde_json::from_str(
            r#"{"kind":"inline","name":"mini","lemmata":[{"key":"K","form":"x"}]}"#,
        )
        .unwrap();
        let mut source = spec.build();
        assert_eq!(source.name(), "mini");
        assert_eq!(drain(source.as_mut()).unwrap().len(), 1);

        let mut spec: SourceSpec =
            serde_json::from_str(r#"{"kind":"json_lines","path":"fi.jsonl"}"#).unwrap();
        spec.resolve_against(Path::new("/data"));
        assert_eq!(
            spec,
            SourceSpec::JsonLines {
                path: PathBuf::from("/data/fi.jsonl"),
                name: None
            }
        );
        assert_eq!(spec.build().name(), "/data/fi.jsonl");
    }
}
