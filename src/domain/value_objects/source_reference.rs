use serde::{Deserialize, Serialize};

/// A chunk actually used as context for one assistant answer, recorded on the
/// message so answers stay auditable against the index they were drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub chunk_id: String,
    pub score: f32,
}

impl SourceReference {
    pub fn new(chunk_id: String, score: f32) -> Self {
        Self { chunk_id, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_object() {
        let reference = SourceReference::new("doc-abc-p1-c0".to_string(), 0.87);
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json["chunk_id"], "doc-abc-p1-c0");
        let score = json["score"].as_f64().unwrap();
        assert!((score - 0.87).abs() < 1e-6);
    }

    #[test]
    fn test_list_round_trip() {
        let references = vec![
            SourceReference::new("doc-abc-p1-c0".to_string(), 0.9),
            SourceReference::new("doc-abc-p2-c3".to_string(), 0.7),
        ];
        let json = serde_json::to_string(&references).unwrap();
        let parsed: Vec<SourceReference> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, references);
    }
}
