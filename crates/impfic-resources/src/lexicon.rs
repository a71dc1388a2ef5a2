//! Read-only lexical resource table
//!
//! The lexicon is a JSON array of term records in the format of the
//! Referentiebestand Nederlands (RBN): every record has an `id-form`
//! (the term), an `id-cat` (its part-of-speech category) and usually a
//! `sem-type`. All other fields are kept as they are.

use crate::error::ResourceError;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// One term record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalEntry {
    /// The term
    #[serde(rename = "id-form")]
    pub form: String,

    /// Part-of-speech category
    #[serde(rename = "id-cat")]
    pub category: String,

    /// Semantic type, if any
    #[serde(rename = "sem-type", default)]
    pub sem_type: Option<String>,

    /// Remaining fields of the record
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Term lookup table indexed by form and by category
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexicalEntry>,
    by_form: HashMap<String, usize>,
    by_category: BTreeMap<String, Vec<usize>>,
}

impl Lexicon {
    /// Load a lexicon from a JSON file, decompressing it if it ends in `.gz`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let records = if path.extension().is_some_and(|ext| ext == "gz") {
            serde_json::from_reader(GzDecoder::new(reader))?
        } else {
            serde_json::from_reader(reader)?
        };
        let lexicon = Self::from_records(records)?;
        info!("Loaded {} lexicon terms from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Build a lexicon from a JSON array of term records
    ///
    /// Records without an `id-cat` field are skipped.
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        Self::from_records(serde_json::from_str(json)?)
    }

    fn from_records(records: Vec<Map<String, Value>>) -> Result<Self, ResourceError> {
        let total = records.len();
        let mut entries = Vec::with_capacity(total);
        for record in records {
            if record.contains_key("id-cat") {
                entries.push(serde_json::from_value(Value::Object(record))?);
            }
        }
        if entries.len() < total {
            debug!("Skipped {} records without a category", total - entries.len());
        }
        Ok(Self::from_entries(entries))
    }

    /// Build a lexicon from parsed entries
    ///
    /// When two entries share a form, lookups by form return the later one.
    pub fn from_entries(entries: Vec<LexicalEntry>) -> Self {
        let mut by_form = HashMap::with_capacity(entries.len());
        let mut by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_form.insert(entry.form.clone(), idx);
            by_category.entry(entry.category.clone()).or_default().push(idx);
        }
        Self {
            entries,
            by_form,
            by_category,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `term` is in the lexicon
    pub fn has_term(&self, term: &str) -> bool {
        self.by_form.contains_key(term)
    }

    /// Look up the entry for `term`
    pub fn get_term(&self, term: &str) -> Option<&LexicalEntry> {
        self.by_form.get(term).map(|&idx| &self.entries[idx])
    }

    /// Part-of-speech categories present in the lexicon, sorted
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(String::as_str)
    }

    /// All entries of a part-of-speech category, in file order
    pub fn pos_terms(&self, pos: &str) -> Result<Vec<&LexicalEntry>, ResourceError> {
        self.by_category
            .get(pos)
            .map(|ids| ids.iter().map(|&idx| &self.entries[idx]).collect())
            .ok_or_else(|| ResourceError::UnknownPos(pos.to_string()))
    }

    /// Entries with the given semantic type, optionally restricted to one
    /// part-of-speech category
    pub fn sem_type_terms(
        &self,
        sem_type: &str,
        pos: Option<&str>,
    ) -> Result<Vec<&LexicalEntry>, ResourceError> {
        let candidates = match pos {
            Some(pos) => self.pos_terms(pos)?,
            None => self.entries.iter().collect(),
        };
        Ok(candidates
            .into_iter()
            .filter(|entry| entry.sem_type.as_deref() == Some(sem_type))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const RECORDS: &str = r#"[
        {"id-form": "lopen", "id-cat": "verb", "sem-type": "action", "id-number": "r_v-1"},
        {"id-form": "denken", "id-cat": "verb", "sem-type": "cognition"},
        {"id-form": "huis", "id-cat": "noun", "sem-type": "concrete"},
        {"id-form": "rennen", "id-cat": "verb", "sem-type": "action"},
        {"id-form": "eh"}
    ]"#;

    #[test]
    fn test_records_without_category_skipped() {
        let lexicon = Lexicon::from_json_str(RECORDS).unwrap();
        assert_eq!(lexicon.len(), 4);
        assert!(!lexicon.has_term("eh"));
    }

    #[test]
    fn test_get_term_keeps_extra_fields() {
        let lexicon = Lexicon::from_json_str(RECORDS).unwrap();
        let entry = lexicon.get_term("lopen").unwrap();
        assert_eq!(entry.category, "verb");
        assert_eq!(entry.sem_type.as_deref(), Some("action"));
        assert_eq!(entry.fields["id-number"], "r_v-1");
        assert!(lexicon.get_term("fiets").is_none());
    }

    #[test]
    fn test_pos_terms() {
        let lexicon = Lexicon::from_json_str(RECORDS).unwrap();
        let verbs: Vec<&str> = lexicon
            .pos_terms("verb")
            .unwrap()
            .iter()
            .map(|e| e.form.as_str())
            .collect();
        assert_eq!(verbs, vec!["lopen", "denken", "rennen"]);
        assert!(matches!(lexicon.pos_terms("adj"), Err(ResourceError::UnknownPos(_))));
        assert_eq!(lexicon.categories().collect::<Vec<_>>(), vec!["noun", "verb"]);
    }

    #[test]
    fn test_sem_type_terms() {
        let lexicon = Lexicon::from_json_str(RECORDS).unwrap();
        assert_eq!(lexicon.sem_type_terms("action", None).unwrap().len(), 2);
        assert_eq!(lexicon.sem_type_terms("action", Some("noun")).unwrap().len(), 0);
        assert_eq!(lexicon.sem_type_terms("concrete", Some("noun")).unwrap().len(), 1);
        assert!(lexicon.sem_type_terms("action", Some("adv")).is_err());
    }

    #[test]
    fn test_later_duplicate_form_wins() {
        let lexicon = Lexicon::from_json_str(
            r#"[{"id-form": "bank", "id-cat": "noun", "sem-type": "furniture"},
                {"id-form": "bank", "id-cat": "noun", "sem-type": "institution"}]"#,
        )
        .unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.get_term("bank").unwrap().sem_type.as_deref(), Some("institution"));
        assert_eq!(lexicon.pos_terms("noun").unwrap().len(), 2);
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", RECORDS).unwrap();
        let lexicon = Lexicon::from_path(file.path()).unwrap();
        assert!(lexicon.has_term("huis"));
    }

    #[test]
    fn test_from_gzipped_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rbn.json.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(RECORDS.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let lexicon = Lexicon::from_path(&path).unwrap();
        assert_eq!(lexicon.len(), 4);
        assert_eq!(lexicon.get_term("denken").unwrap().sem_type.as_deref(), Some("cognition"));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Lexicon::from_json_str("{\"id-form\": 1}"),
            Err(ResourceError::JsonParse(_))
        ));
    }
}
