//! Cross-module tests for the parser crate

#[cfg(test)]
mod tests {
    use crate::{ConversionAnomaly, DocumentParser, ParseConfig, ParseError, Schema};
    use serde_json::json;

    fn spacy_with_gap() -> serde_json::Value {
        json!({
            "text": "Yes.  No.",
            "sents": [{"start": 0, "end": 4}, {"start": 6, "end": 9}],
            "ents": [],
            "tokens": [
                {"start": 0, "end": 3, "pos": "INTJ", "dep": "ROOT", "head": 0},
                {"start": 3, "end": 4, "pos": "PUNCT", "dep": "punct", "head": 0},
                {"start": 4, "end": 5, "pos": "SPACE", "dep": "dep", "head": 1},
                {"start": 6, "end": 8, "pos": "INTJ", "dep": "ROOT", "head": 3},
                {"start": 8, "end": 9, "pos": "PUNCT", "dep": "punct", "head": 3}
            ]
        })
    }

    #[test]
    fn test_whitespace_token_in_gap_is_reported() {
        let conversion = DocumentParser::default()
            .parse(&spacy_with_gap(), Schema::Spacy)
            .unwrap();

        assert_eq!(conversion.document.sentences()[0].len(), 3);
        assert_eq!(conversion.document.sentences()[1].len(), 2);
        assert_eq!(
            conversion.anomalies,
            vec![ConversionAnomaly::GapAssigned { sentence: 0, token: 2, overshoot: 1 }]
        );
    }

    #[test]
    fn test_strict_config_rejects_gap_token() {
        let parser = DocumentParser::new(ParseConfig::strict()).unwrap();
        let result = parser.parse(&spacy_with_gap(), Schema::Spacy);
        assert!(matches!(result, Err(ParseError::UnassignedToken { index: 2, start: 4 })));
    }

    #[test]
    fn test_anomalies_serialize_with_kind_tag() {
        let anomaly = ConversionAnomaly::GapAssigned { sentence: 0, token: 2, overshoot: 1 };
        let value = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(value["kind"], "gap_assigned");
        assert_eq!(value["overshoot"], 1);
    }

    #[test]
    fn test_multibyte_text_uses_char_offsets() {
        let payload = json!({
            "text": "Zoë lacht.",
            "sentences": [{"tokens": [
                {"text": "Zoë", "dspan": [0, 3], "upos": "PROPN", "head": 2, "deprel": "nsubj", "ner": "S-PER"},
                {"text": "lacht", "dspan": [4, 9], "upos": "VERB", "head": 0, "deprel": "root", "ner": "O"},
                {"text": ".", "dspan": [9, 10], "upos": "PUNCT", "head": 2, "deprel": "punct", "ner": "O"}
            ]}]
        });
        let doc = DocumentParser::default().parse_auto(&payload).unwrap().into_document();
        let tokens = doc.sentences()[0].tokens();
        assert_eq!(tokens[0].text, "Zoë");
        assert_eq!(tokens[1].text, "lacht");
        assert_eq!(doc.sentences()[0].text(), "Zoë lacht.");
        assert_eq!(doc.entities()[0].text, "Zoë");
    }

    #[test]
    fn test_empty_annotations_become_absent() {
        let mut payload = spacy_with_gap();
        payload["tokens"][0]["lemma"] = json!("");
        let doc = DocumentParser::default()
            .parse(&payload, Schema::Spacy)
            .unwrap()
            .into_document();
        assert_eq!(doc.sentences()[0].tokens()[0].lemma, None);
    }
}
