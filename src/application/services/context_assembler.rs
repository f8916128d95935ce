use crate::application::ports::answer_generator::ContextChunk;
use crate::application::services::chunking::approx_token_count;
use crate::application::services::retrieval::RetrievedChunk;

/// Bounds the chunk set handed to generation. Two hard caps: at most
/// `max_chunks` entries and at most `token_budget` approximate tokens.
/// Rank order decides admission; a chunk that would blow the budget is
/// skipped, and lower-ranked smaller chunks may still fit.
pub struct ContextAssembler {
    max_chunks: usize,
    token_budget: usize,
}

impl ContextAssembler {
    pub fn new(max_chunks: usize, token_budget: usize) -> Self {
        Self {
            max_chunks,
            token_budget,
        }
    }

    pub fn assemble(&self, ranked: &[RetrievedChunk]) -> Vec<ContextChunk> {
        let mut selected = Vec::new();
        let mut used_tokens = 0usize;

        for chunk in ranked {
            if selected.len() >= self.max_chunks {
                break;
            }
            let cost = approx_token_count(&chunk.text);
            if used_tokens + cost > self.token_budget {
                continue;
            }
            used_tokens += cost;
            selected.push(ContextChunk {
                chunk_id: chunk.chunk_id.clone(),
                text: chunk.text.clone(),
                page_number: chunk.page_number,
                heading: chunk.heading.clone(),
                score: chunk.score,
            });
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked_chunk(chunk_id: &str, score: f32, words: usize) -> RetrievedChunk {
        RetrievedChunk {
            chunk_id: chunk_id.to_string(),
            score,
            text: vec!["word"; words].join(" "),
            page_number: Some(1),
            heading: None,
        }
    }

    #[test]
    fn test_respects_chunk_count_cap() {
        let ranked: Vec<RetrievedChunk> = (0..20)
            .map(|i| ranked_chunk(&format!("c{}", i), 1.0 - i as f32 * 0.01, 5))
            .collect();

        let context = ContextAssembler::new(10, 8000).assemble(&ranked);

        assert_eq!(context.len(), 10);
        assert_eq!(context[0].chunk_id, "c0");
    }

    #[test]
    fn test_respects_token_budget() {
        let ranked = vec![
            ranked_chunk("big", 0.9, 60),
            ranked_chunk("medium", 0.8, 30),
            ranked_chunk("small", 0.7, 10),
        ];

        let context = ContextAssembler::new(10, 70).assemble(&ranked);

        let ids: Vec<&str> = context.iter().map(|c| c.chunk_id.as_str()).collect();
        // "medium" would overflow after "big"; "small" still fits.
        assert_eq!(ids, vec!["big", "small"]);
        let total: usize = context.iter().map(|c| approx_token_count(&c.text)).sum();
        assert!(total <= 70);
    }

    #[test]
    fn test_empty_hits_produce_empty_context() {
        let context = ContextAssembler::new(10, 8000).assemble(&[]);

        assert!(context.is_empty());
    }

    #[test]
    fn test_preserves_rank_order() {
        let ranked = vec![
            ranked_chunk("first", 0.9, 5),
            ranked_chunk("second", 0.8, 5),
            ranked_chunk("third", 0.7, 5),
        ];

        let context = ContextAssembler::new(3, 8000).assemble(&ranked);

        let ids: Vec<&str> = context.iter().map(|c| c.chunk_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
