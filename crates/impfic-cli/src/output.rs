//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use impfic_clause::Clause;
use impfic_domain::DocumentStats;
use impfic_parse::Conversion;
use impfic_resources::LexicalEntry;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Clauses of one sentence, ready for display.
pub struct SentenceClauses<'a> {
    /// Sentence id
    pub sentence: usize,
    /// Clauses in surface order
    pub clauses: Vec<Clause<'a>>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a conversion summary.
    pub fn format_inspection(&self, conversion: &Conversion) -> Result<String> {
        let doc = &conversion.document;
        let keys: Vec<&str> = doc.metadata().keys().map(String::as_str).collect();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "schema": conversion.schema,
                "sentences": doc.sentence_count(),
                "tokens": doc.len(),
                "entities": doc.entities().len(),
                "metadata": doc.metadata(),
                "anomalies": conversion.anomalies,
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Property", "Value"]);
                builder.push_record(["Schema".to_string(), conversion.schema.to_string()]);
                builder.push_record(["Sentences".to_string(), doc.sentence_count().to_string()]);
                builder.push_record(["Tokens".to_string(), doc.len().to_string()]);
                builder.push_record(["Entities".to_string(), doc.entities().len().to_string()]);
                builder.push_record(["Metadata".to_string(), keys.join(", ")]);
                builder.push_record(["Anomalies".to_string(), conversion.anomalies.len().to_string()]);

                let mut out = self.table(builder);
                for anomaly in &conversion.anomalies {
                    out.push('\n');
                    out.push_str(&self.warning(&anomaly.to_string()));
                }
                Ok(out)
            }
        }
    }

    /// Format the clauses of one or more sentences.
    pub fn format_clauses(&self, sentences: &[SentenceClauses<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<Value> = sentences
                    .iter()
                    .map(|s| {
                        let clauses: Vec<Value> = s
                            .clauses
                            .iter()
                            .map(|c| {
                                json!({
                                    "root": c.root(),
                                    "tokens": c.tokens().iter().map(|t| t.id).collect::<Vec<_>>(),
                                    "text": c.text(),
                                })
                            })
                            .collect();
                        json!({"sentence": s.sentence, "clauses": clauses})
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Table => {
                if sentences.iter().all(|s| s.clauses.is_empty()) {
                    return Ok(self.colorize("No clauses found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Sentence", "Clause", "Root", "Text"]);
                for s in sentences {
                    for (idx, clause) in s.clauses.iter().enumerate() {
                        let root = clause
                            .root_token()
                            .map(|t| t.text.clone())
                            .unwrap_or_else(|| "-".to_string());
                        builder.push_record([
                            s.sentence.to_string(),
                            idx.to_string(),
                            root,
                            clause.text(),
                        ]);
                    }
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format count statistics.
    pub fn format_stats(&self, stats: &DocumentStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Measure", "Count"]);
                for (measure, count) in stats.to_map() {
                    builder.push_record([measure, count.to_string()]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a lexicon lookup result.
    pub fn format_entry(&self, term: &str, entry: Option<&LexicalEntry>) -> Result<String> {
        let Some(entry) = entry else {
            return Ok(match self.format {
                OutputFormat::Json => "null".to_string(),
                OutputFormat::Table => self.warning(&format!("Term '{}' not found", term)),
            });
        };
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entry)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["id-form".to_string(), entry.form.clone()]);
                builder.push_record(["id-cat".to_string(), entry.category.clone()]);
                builder.push_record([
                    "sem-type".to_string(),
                    entry.sem_type.clone().unwrap_or_else(|| "-".to_string()),
                ]);
                for (key, value) in &entry.fields {
                    let value = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    builder.push_record([key.clone(), value]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format an anonymised identifier.
    pub fn format_hash(&self, hashed: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "hash": hashed }))?),
            OutputFormat::Table => Ok(hashed.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
