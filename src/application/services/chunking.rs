use regex::Regex;

use crate::application::ports::page_content_source::ExtractedPage;
use crate::domain::entities::{ChunkDraft, RagConfig};
use crate::domain::value_objects::ChunkingStrategy;

/// Whitespace token approximation shared by every chunk budget in the
/// pipeline. Real tokenizers differ per model; counts here only need to be
/// stable and roughly proportional.
pub fn approx_token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone)]
pub struct ChunkingOptions {
    pub strategy: ChunkingStrategy,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl ChunkingOptions {
    pub fn from_config(config: &RagConfig) -> Self {
        Self {
            strategy: config.chunking_strategy(),
            chunk_size: config.chunk_size() as usize,
            chunk_overlap: config.chunk_overlap() as usize,
        }
    }
}

#[derive(Debug, Clone)]
struct Sentence {
    text: String,
    tokens: usize,
}

#[derive(Debug)]
struct Paragraph {
    page_number: i32,
    paragraph_index: i32,
    heading: Option<String>,
    sentences: Vec<Sentence>,
}

impl Paragraph {
    fn token_total(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens).sum()
    }
}

/// Turns extracted page content into ordered chunk drafts. Pure: no I/O,
/// no clock, no ids; identity is assigned later when drafts are persisted.
pub struct ChunkExtractor {
    sentence_boundary: Regex,
    heading_line: Regex,
}

impl ChunkExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            sentence_boundary: Regex::new(r#"[^.!?]+[.!?]+["')\]]*|[^.!?]+$"#)?,
            heading_line: Regex::new(r"^#{1,6}\s+(.+)$")?,
        })
    }

    pub fn extract(&self, pages: &[ExtractedPage], options: &ChunkingOptions) -> Vec<ChunkDraft> {
        let paragraphs = self.collect_paragraphs(pages);
        let mut packer = DraftPacker::new(options);

        match options.strategy {
            ChunkingStrategy::Semantic => packer.pack_semantic(&paragraphs),
            ChunkingStrategy::Hierarchical => packer.pack_hierarchical(&paragraphs),
            ChunkingStrategy::FixedSize => packer.pack_fixed_size(&paragraphs),
            ChunkingStrategy::Structured => packer.pack_structured(&paragraphs),
        }

        packer.into_drafts()
    }

    /// Derive paragraphs (blank-line blocks) with page and heading
    /// provenance. Markdown-style heading lines update the current heading
    /// and are not treated as body text; headings stay current across page
    /// breaks because sections span pages.
    fn collect_paragraphs(&self, pages: &[ExtractedPage]) -> Vec<Paragraph> {
        let mut ordered: Vec<&ExtractedPage> = pages.iter().collect();
        ordered.sort_by_key(|page| page.page_number);

        let mut paragraphs = Vec::new();
        let mut current_heading: Option<String> = None;

        for page in ordered {
            let normalized = page.structured_content.replace("\r\n", "\n");
            let mut paragraph_index = 0;

            for block in normalized.split("\n\n") {
                let mut body = String::new();
                for line in block.lines() {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Some(caps) = self.heading_line.captures(line) {
                        current_heading = Some(caps[1].trim().to_string());
                        continue;
                    }
                    if !body.is_empty() {
                        body.push(' ');
                    }
                    body.push_str(line);
                }

                let sentences = self.split_sentences(&body);
                if sentences.is_empty() {
                    continue;
                }

                paragraphs.push(Paragraph {
                    page_number: page.page_number,
                    paragraph_index,
                    heading: current_heading.clone(),
                    sentences,
                });
                paragraph_index += 1;
            }
        }

        paragraphs
    }

    fn split_sentences(&self, text: &str) -> Vec<Sentence> {
        self.sentence_boundary
            .find_iter(text)
            .filter_map(|found| {
                let trimmed = found.as_str().trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Sentence {
                        text: trimmed.to_string(),
                        tokens: approx_token_count(trimmed),
                    })
                }
            })
            .collect()
    }
}

/// Accumulates drafts, owning the document-wide chunk index and the
/// sentence overlap carried from one chunk into the next.
struct DraftPacker<'a> {
    options: &'a ChunkingOptions,
    drafts: Vec<ChunkDraft>,
    carry: Vec<Sentence>,
}

impl<'a> DraftPacker<'a> {
    fn new(options: &'a ChunkingOptions) -> Self {
        Self {
            options,
            drafts: Vec::new(),
            carry: Vec::new(),
        }
    }

    fn into_drafts(self) -> Vec<ChunkDraft> {
        self.drafts
    }

    /// Every paragraph starts a chunk; a paragraph over the budget falls
    /// back to sentence packing. Overlap is carried across paragraph and
    /// page boundaries alike.
    fn pack_semantic(&mut self, paragraphs: &[Paragraph]) {
        for paragraph in paragraphs {
            if paragraph.token_total() <= self.options.chunk_size {
                self.emit(
                    paragraph.page_number,
                    paragraph.paragraph_index,
                    paragraph.heading.clone(),
                    &paragraph.sentences,
                );
            } else {
                self.pack_sentences(paragraph);
            }
        }
    }

    /// Sentence stream packed to the budget, ignoring paragraph and page
    /// boundaries. Provenance comes from the first non-overlap sentence.
    fn pack_fixed_size(&mut self, paragraphs: &[Paragraph]) {
        let mut pending: Vec<Sentence> = Vec::new();
        let mut pending_tokens = 0usize;
        let mut provenance: Option<(i32, i32, Option<String>)> = None;

        for paragraph in paragraphs {
            for sentence in &paragraph.sentences {
                if !pending.is_empty() && pending_tokens + sentence.tokens > self.options.chunk_size
                {
                    if let Some((page, para, heading)) = provenance.take() {
                        self.emit(page, para, heading, &pending);
                    }
                    pending.clear();
                    pending_tokens = 0;
                }
                if provenance.is_none() {
                    provenance = Some((
                        paragraph.page_number,
                        paragraph.paragraph_index,
                        paragraph.heading.clone(),
                    ));
                }
                pending_tokens += sentence.tokens;
                pending.push(sentence.clone());
            }
        }

        if let Some((page, para, heading)) = provenance {
            if !pending.is_empty() {
                self.emit(page, para, heading, &pending);
            }
        }
    }

    /// Chunks never span a heading boundary. Within one section, small
    /// paragraphs are merged up to the budget; overlap does not leak across
    /// sections.
    fn pack_hierarchical(&mut self, paragraphs: &[Paragraph]) {
        let mut start = 0;
        while start < paragraphs.len() {
            let heading = paragraphs[start].heading.clone();
            let mut end = start + 1;
            while end < paragraphs.len() && paragraphs[end].heading == heading {
                end += 1;
            }
            self.carry.clear();
            self.pack_section(&paragraphs[start..end]);
            start = end;
        }
        self.carry.clear();
    }

    fn pack_section(&mut self, section: &[Paragraph]) {
        let heading = section.first().and_then(|p| p.heading.clone());
        let mut pending: Vec<Sentence> = Vec::new();
        let mut pending_tokens = 0usize;
        let mut provenance: Option<(i32, i32)> = None;

        for paragraph in section {
            let paragraph_tokens = paragraph.token_total();

            if !pending.is_empty() && pending_tokens + paragraph_tokens > self.options.chunk_size {
                if let Some((page, para)) = provenance.take() {
                    self.emit(page, para, heading.clone(), &pending);
                }
                pending.clear();
                pending_tokens = 0;
            }

            if paragraph_tokens > self.options.chunk_size {
                if let Some((page, para)) = provenance.take() {
                    if !pending.is_empty() {
                        self.emit(page, para, heading.clone(), &pending);
                        pending.clear();
                        pending_tokens = 0;
                    }
                }
                self.pack_sentences(paragraph);
                continue;
            }

            if provenance.is_none() {
                provenance = Some((paragraph.page_number, paragraph.paragraph_index));
            }
            pending_tokens += paragraph_tokens;
            pending.extend(paragraph.sentences.iter().cloned());
        }

        if let Some((page, para)) = provenance {
            if !pending.is_empty() {
                self.emit(page, para, heading, &pending);
            }
        }
    }

    /// Exactly one chunk per paragraph (oversized paragraphs split), and
    /// the carry never populates because the strategy declares no overlap.
    fn pack_structured(&mut self, paragraphs: &[Paragraph]) {
        for paragraph in paragraphs {
            if paragraph.token_total() <= self.options.chunk_size {
                self.emit(
                    paragraph.page_number,
                    paragraph.paragraph_index,
                    paragraph.heading.clone(),
                    &paragraph.sentences,
                );
            } else {
                self.pack_sentences(paragraph);
            }
        }
    }

    fn pack_sentences(&mut self, paragraph: &Paragraph) {
        let mut pending: Vec<Sentence> = Vec::new();
        let mut pending_tokens = 0usize;

        for sentence in &paragraph.sentences {
            if !pending.is_empty() && pending_tokens + sentence.tokens > self.options.chunk_size {
                self.emit(
                    paragraph.page_number,
                    paragraph.paragraph_index,
                    paragraph.heading.clone(),
                    &pending,
                );
                pending.clear();
                pending_tokens = 0;
            }
            pending_tokens += sentence.tokens;
            pending.push(sentence.clone());
        }

        if !pending.is_empty() {
            self.emit(
                paragraph.page_number,
                paragraph.paragraph_index,
                paragraph.heading.clone(),
                &pending,
            );
        }
    }

    /// Emit one draft made of the carried overlap plus the new sentences,
    /// then derive the next carry from the new sentences only, so a
    /// sentence appears in at most two consecutive chunks. The overlap
    /// rides on top of the budget; the budget governs new content.
    fn emit(
        &mut self,
        page_number: i32,
        paragraph_index: i32,
        heading: Option<String>,
        new_sentences: &[Sentence],
    ) {
        let overlap = std::mem::take(&mut self.carry);

        let text = overlap
            .iter()
            .chain(new_sentences.iter())
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let token_count = overlap
            .iter()
            .chain(new_sentences.iter())
            .map(|s| s.tokens)
            .sum::<usize>() as i32;

        self.drafts.push(ChunkDraft {
            chunk_index: self.drafts.len() as i32,
            page_number,
            paragraph_index,
            heading,
            text,
            token_count,
            sentence_count: (overlap.len() + new_sentences.len()) as i32,
            has_overlap: !overlap.is_empty(),
            overlap_sentence_count: overlap.len() as i32,
        });

        self.carry = if self.options.strategy.uses_overlap() {
            overlap_tail(new_sentences, self.options.chunk_overlap)
        } else {
            Vec::new()
        };
    }
}

/// Trailing sentences whose cumulative token count fits the overlap budget,
/// in original order.
fn overlap_tail(sentences: &[Sentence], budget: usize) -> Vec<Sentence> {
    if budget == 0 {
        return Vec::new();
    }
    let mut tail: Vec<Sentence> = Vec::new();
    let mut used = 0usize;
    for sentence in sentences.iter().rev() {
        if used + sentence.tokens > budget {
            break;
        }
        used += sentence.tokens;
        tail.push(sentence.clone());
    }
    tail.reverse();
    tail
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ChunkExtractor {
        ChunkExtractor::new().unwrap()
    }

    fn options(strategy: ChunkingStrategy, chunk_size: usize, chunk_overlap: usize) -> ChunkingOptions {
        ChunkingOptions {
            strategy,
            chunk_size,
            chunk_overlap,
        }
    }

    fn page(page_number: i32, structured_content: &str) -> ExtractedPage {
        ExtractedPage {
            page_number,
            structured_content: structured_content.to_string(),
        }
    }

    fn procedure_pages() -> Vec<ExtractedPage> {
        vec![
            page(
                1,
                "Operators must wear cut-resistant gloves. Gloves are inspected before every shift.\n\nDamaged gloves are discarded immediately. Replacements are stocked in cabinet B.",
            ),
            page(
                2,
                "The press is locked out before maintenance. The key is held by the shift lead.\n\nMaintenance is logged in the register. Entries require two signatures.",
            ),
            page(
                3,
                "Calibration runs every Monday morning. Results are recorded within one hour.\n\nOut-of-tolerance readings stop the line. The quality engineer is notified at once.",
            ),
        ]
    }

    #[test]
    fn test_semantic_yields_a_chunk_per_paragraph() {
        let drafts = extractor().extract(
            &procedure_pages(),
            &options(ChunkingStrategy::Semantic, 512, 64),
        );

        assert_eq!(drafts.len(), 6);
        let pages: Vec<i32> = drafts.iter().map(|d| d.page_number).collect();
        assert_eq!(pages, vec![1, 1, 2, 2, 3, 3]);
        let paragraph_indices: Vec<i32> = drafts.iter().map(|d| d.paragraph_index).collect();
        assert_eq!(paragraph_indices, vec![0, 1, 0, 1, 0, 1]);
        for (expected, draft) in drafts.iter().enumerate() {
            assert_eq!(draft.chunk_index, expected as i32);
        }
    }

    #[test]
    fn test_overlap_metadata_is_consistent() {
        let drafts = extractor().extract(
            &procedure_pages(),
            &options(ChunkingStrategy::Semantic, 512, 64),
        );

        for draft in &drafts {
            assert_eq!(draft.has_overlap, draft.overlap_sentence_count > 0);
            assert!(!draft.text.trim().is_empty());
        }
        assert!(!drafts[0].has_overlap);
        // Small paragraphs fit the overlap budget entirely, so every later
        // chunk leads with the previous paragraph's trailing sentences.
        assert!(drafts[1].has_overlap);
        assert!(drafts[1].text.starts_with("Operators must wear"));
    }

    #[test]
    fn test_zero_overlap_budget_disables_carry() {
        let drafts = extractor().extract(
            &procedure_pages(),
            &options(ChunkingStrategy::Semantic, 512, 0),
        );

        assert!(drafts.iter().all(|d| !d.has_overlap));
        assert!(drafts.iter().all(|d| d.overlap_sentence_count == 0));
    }

    #[test]
    fn test_oversized_paragraph_falls_back_to_sentence_packing() {
        let long_paragraph =
            "The first inspection covers the outer casing and every visible weld seam. \
             The second inspection covers the hydraulic lines and both pressure gauges. \
             The third inspection covers the electrical cabinet and the interlock wiring. \
             The fourth inspection covers the conveyor rollers and the emergency stops.";
        let pages = vec![page(1, long_paragraph)];

        let drafts = extractor().extract(&pages, &options(ChunkingStrategy::Semantic, 15, 0));

        assert!(drafts.len() > 1);
        for draft in &drafts {
            assert_eq!(draft.page_number, 1);
            assert_eq!(draft.paragraph_index, 0);
            assert!(draft.token_count <= 15);
        }
    }

    #[test]
    fn test_fixed_size_packs_across_paragraph_boundaries() {
        let pages = vec![page(
            1,
            "Wear gloves at the bench. Inspect them first.\n\nDiscard damaged pairs. Stock is in cabinet B.",
        )];

        let semantic = extractor().extract(&pages, &options(ChunkingStrategy::Semantic, 512, 0));
        let fixed = extractor().extract(&pages, &options(ChunkingStrategy::FixedSize, 512, 0));

        assert_eq!(semantic.len(), 2);
        assert_eq!(fixed.len(), 1);
        assert!(fixed[0].text.contains("Wear gloves"));
        assert!(fixed[0].text.contains("cabinet B"));
        assert_eq!(fixed[0].page_number, 1);
        assert_eq!(fixed[0].paragraph_index, 0);
    }

    #[test]
    fn test_structured_never_carries_overlap() {
        let drafts = extractor().extract(
            &procedure_pages(),
            &options(ChunkingStrategy::Structured, 512, 64),
        );

        assert_eq!(drafts.len(), 6);
        assert!(drafts.iter().all(|d| !d.has_overlap));
    }

    #[test]
    fn test_hierarchical_respects_heading_boundaries() {
        let pages = vec![page(
            1,
            "# Glove policy\n\nWear gloves at the bench. Inspect them first.\n\nDiscard damaged pairs promptly.\n\n# Lockout policy\n\nLock out the press before maintenance. Log the work in the register.",
        )];

        let drafts = extractor().extract(&pages, &options(ChunkingStrategy::Hierarchical, 512, 32));

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].heading.as_deref(), Some("Glove policy"));
        assert_eq!(drafts[1].heading.as_deref(), Some("Lockout policy"));
        assert!(drafts[0].text.contains("Discard damaged pairs"));
        assert!(!drafts[1].text.contains("gloves"));
        // Overlap never crosses a section boundary.
        assert!(!drafts[1].has_overlap);
    }

    #[test]
    fn test_heading_carries_to_following_paragraphs() {
        let pages = vec![
            page(1, "# Safety instructions\n\nKeep the aisle clear at all times."),
            page(2, "Report spills to the supervisor immediately."),
        ];

        let drafts = extractor().extract(&pages, &options(ChunkingStrategy::Semantic, 512, 0));

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].heading.as_deref(), Some("Safety instructions"));
        // Sections span page breaks.
        assert_eq!(drafts[1].heading.as_deref(), Some("Safety instructions"));
    }

    #[test]
    fn test_sentence_counting() {
        let pages = vec![page(1, "Stop the line. Notify the engineer! Resume after sign-off?")];

        let drafts = extractor().extract(&pages, &options(ChunkingStrategy::Semantic, 512, 0));

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].sentence_count, 3);
        assert_eq!(drafts[0].token_count, 9);
    }

    #[test]
    fn test_blank_pages_produce_no_drafts() {
        let pages = vec![page(1, ""), page(2, "   \n\n  \n")];

        let drafts = extractor().extract(&pages, &options(ChunkingStrategy::Semantic, 512, 64));

        assert!(drafts.is_empty());
    }

    #[test]
    fn test_pages_are_processed_in_page_order() {
        let pages = vec![
            page(2, "Second page sentence."),
            page(1, "First page sentence."),
        ];

        let drafts = extractor().extract(&pages, &options(ChunkingStrategy::Semantic, 512, 0));

        assert_eq!(drafts[0].page_number, 1);
        assert_eq!(drafts[1].page_number, 2);
        assert_eq!(drafts[0].chunk_index, 0);
    }
}
