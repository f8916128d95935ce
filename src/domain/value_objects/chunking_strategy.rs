use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategy {
    Semantic,
    Hierarchical,
    FixedSize,
    Structured,
}

impl ChunkingStrategy {
    pub const LEGAL_VALUES: [&'static str; 4] =
        ["semantic", "hierarchical", "fixed_size", "structured"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkingStrategy::Semantic => "semantic",
            ChunkingStrategy::Hierarchical => "hierarchical",
            ChunkingStrategy::FixedSize => "fixed_size",
            ChunkingStrategy::Structured => "structured",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "semantic" => Ok(ChunkingStrategy::Semantic),
            "hierarchical" => Ok(ChunkingStrategy::Hierarchical),
            "fixed_size" => Ok(ChunkingStrategy::FixedSize),
            "structured" => Ok(ChunkingStrategy::Structured),
            _ => Err(format!(
                "Invalid chunking strategy '{}', expected one of: {}",
                s,
                Self::LEGAL_VALUES.join(", ")
            )),
        }
    }

    pub fn uses_overlap(&self) -> bool {
        !matches!(self, ChunkingStrategy::Structured)
    }
}

impl Default for ChunkingStrategy {
    fn default() -> Self {
        ChunkingStrategy::Semantic
    }
}

impl std::fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for value in ChunkingStrategy::LEGAL_VALUES {
            let strategy = ChunkingStrategy::from_str(value).unwrap();
            assert_eq!(strategy.as_str(), value);
        }
    }

    #[test]
    fn test_case_insensitive_parsing() {
        assert_eq!(
            ChunkingStrategy::from_str("Semantic").unwrap(),
            ChunkingStrategy::Semantic
        );
        assert_eq!(
            ChunkingStrategy::from_str("FIXED_SIZE").unwrap(),
            ChunkingStrategy::FixedSize
        );
    }

    #[test]
    fn test_invalid_value_rejected() {
        let result = ChunkingStrategy::from_str("recursive");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("recursive"));
    }

    #[test]
    fn test_overlap_applies_to_all_but_structured() {
        assert!(ChunkingStrategy::Semantic.uses_overlap());
        assert!(ChunkingStrategy::Hierarchical.uses_overlap());
        assert!(ChunkingStrategy::FixedSize.uses_overlap());
        assert!(!ChunkingStrategy::Structured.uses_overlap());
    }
}
