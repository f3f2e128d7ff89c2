use super::*;

/// Everything produced for one source file.
#[derive(Debug)]
pub(crate) struct ParsedAct {
    pub(crate) chunks: Vec<LegalChunk>,
    pub(crate) metadata: ActMetadata,
    pub(crate) source_encoding: &'static str,
}

/// Compiled pattern tables for every stage of the act pipeline. Built once
/// and shared by reference across worker threads.
#[derive(Debug)]
pub(crate) struct LegalParser {
    pub(super) patterns: HierarchyPatterns,
    pub(super) normalizer: TextNormalizer,
    pub(super) metadata: ActMetadataExtractor,
    pub(super) cross_refs: CrossReferenceExtractor,
    page_marker: Regex,
}

impl LegalParser {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            patterns: HierarchyPatterns::new()?,
            normalizer: TextNormalizer::new()?,
            metadata: ActMetadataExtractor::new()?,
            cross_refs: CrossReferenceExtractor::new()?,
            page_marker: Regex::new(r"--- PAGE ([0-9]+) ---")
                .context("failed to compile page marker regex")?,
        })
    }

    pub(crate) fn parse_file(&self, path: &Path) -> Result<ParsedAct> {
        let loaded = load_text(path)?;
        let mut parsed = self.parse_text(path, &loaded.text);
        parsed.source_encoding = loaded.encoding.as_str();
        Ok(parsed)
    }

    /// Parses already decoded text; `path` only supplies the act name.
    pub(super) fn parse_text(&self, path: &Path, raw_text: &str) -> ParsedAct {
        let act = self.metadata.extract(path, raw_text, &self.normalizer);

        let mut machine =
            HierarchyStateMachine::new(&self.patterns, &self.normalizer, &self.cross_refs, &act);
        for (page_no, body) in self.split_pages(raw_text) {
            for line in body.lines() {
                machine.feed_line(line, page_no);
            }
        }
        if machine.state() == ParserState::SeekingAnchor {
            debug!(act = %act.act_name, "no act body anchor found");
        }

        let atomic = machine.finish();
        let mut chunks = atomic.chunks;
        let comprehensive = build_comprehensive_chunks(&chunks, &act);
        chunks.extend(comprehensive);

        let validation_issues = validate_parse_quality(&chunks, &atomic.statistics, raw_text);

        let metadata = ActMetadata {
            act_name: act.act_name,
            act_identifier: act.act_identifier,
            enactment_date: act.enactment_date,
            preamble: act.preamble,
            source_filename: act.source_filename,
            total_chunks: chunks.len(),
            parse_statistics: atomic.statistics,
            definition_sections: atomic.definition_sections,
            cross_reference_map: atomic.cross_reference_map,
            validation_issues,
        };

        ParsedAct {
            chunks,
            metadata,
            source_encoding: SourceEncoding::Utf8.as_str(),
        }
    }

    /// Splits on `--- PAGE <n> ---` markers. Text before the first marker is
    /// not part of any page; without markers the whole text is page 1.
    pub(super) fn split_pages<'t>(&self, raw_text: &'t str) -> Vec<(u32, &'t str)> {
        let markers = self
            .page_marker
            .captures_iter(raw_text)
            .collect::<Vec<regex::Captures<'t>>>();
        if markers.is_empty() {
            return vec![(1, raw_text)];
        }

        let mut pages = Vec::with_capacity(markers.len());
        for (index, captures) in markers.iter().enumerate() {
            let Some(marker) = captures.get(0) else {
                continue;
            };
            let page_no = captures
                .get(1)
                .and_then(|value| value.as_str().parse::<u32>().ok())
                .unwrap_or(index as u32 + 1);
            let body_end = markers
                .get(index + 1)
                .and_then(|next| next.get(0))
                .map(|next| next.start())
                .unwrap_or(raw_text.len());

            pages.push((page_no, &raw_text[marker.end()..body_end]));
        }

        pages
    }
}
