//! Single conversion entry point dispatching on payload schema

use crate::config::ParseConfig;
use crate::error::ParseError;
use crate::types::{Conversion, Schema};
use crate::{spacy, trankit};
use impfic_domain::Document;
use serde_json::Value;
use tracing::{debug, info};

/// Converts parser output payloads into documents
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    config: ParseConfig,
}

impl DocumentParser {
    /// Create a parser with a validated configuration
    pub fn new(config: ParseConfig) -> Result<Self, ParseError> {
        config.validate().map_err(ParseError::Config)?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Convert a payload read as `schema`
    pub fn parse(&self, payload: &Value, schema: Schema) -> Result<Conversion, ParseError> {
        info!("Converting {} payload", schema);
        let mut anomalies = Vec::new();

        let document = match schema {
            Schema::Spacy => {
                let payload: spacy::SpacyPayload = serde_json::from_value(payload.clone())?;
                spacy::convert(payload, &self.config, &mut anomalies)?
            }
            Schema::Trankit => {
                let payload: trankit::TrankitPayload = serde_json::from_value(payload.clone())?;
                trankit::convert(payload, &self.config, &mut anomalies)?
            }
        };

        info!(
            "Converted {} sentences, {} tokens, {} entities ({} anomalies)",
            document.sentence_count(),
            document.len(),
            document.entities().len(),
            anomalies.len()
        );

        Ok(Conversion {
            schema,
            document,
            anomalies,
        })
    }

    /// Detect the payload schema, then convert
    pub fn parse_auto(&self, payload: &Value) -> Result<Conversion, ParseError> {
        let schema = Schema::detect(payload)?;
        debug!("Detected {} schema", schema);
        self.parse(payload, schema)
    }

    /// Parse a JSON string, detect its schema and convert it
    pub fn parse_str(&self, json: &str) -> Result<Conversion, ParseError> {
        let payload: Value = serde_json::from_str(json)?;
        self.parse_auto(&payload)
    }
}

/// Convert a payload with the default configuration, dropping the anomaly report
pub fn parse(payload: &Value, schema: Schema) -> Result<Document, ParseError> {
    DocumentParser::default()
        .parse(payload, schema)
        .map(Conversion::into_document)
}

/// Detect the schema and convert with the default configuration
pub fn parse_auto(payload: &Value) -> Result<Document, ParseError> {
    DocumentParser::default()
        .parse_auto(payload)
        .map(Conversion::into_document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ParseConfig {
            gap_tolerance: 1000,
            ..ParseConfig::default()
        };
        assert!(matches!(DocumentParser::new(config), Err(ParseError::Config(_))));
    }

    #[test]
    fn test_mistyped_field_is_a_json_error() {
        let payload = json!({"text": "Hi.", "sents": "nope", "tokens": [], "ents": []});
        let result = DocumentParser::default().parse(&payload, Schema::Spacy);
        assert!(matches!(result, Err(ParseError::JsonParse(_))));
    }

    #[test]
    fn test_parse_str_rejects_bad_json() {
        let result = DocumentParser::default().parse_str("{not json");
        assert!(matches!(result, Err(ParseError::JsonParse(_))));
    }

    #[test]
    fn test_parse_auto_reports_schema() {
        let payload = json!({"text": "", "sentences": []});
        let conversion = DocumentParser::default().parse_auto(&payload).unwrap();
        assert_eq!(conversion.schema, Schema::Trankit);
        assert!(conversion.is_clean());
        assert!(conversion.document.is_empty());
    }
}
