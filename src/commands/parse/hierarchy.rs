use super::*;

pub(super) const PART_LABEL: &str = "भाग";
pub(super) const CHAPTER_LABEL: &str = "परिच्छेद";
pub(super) const DEFAULT_PART: &str = "Main";
pub(super) const DEFAULT_CHAPTER: &str = "General";

const CLAUSE_CONSONANTS: &str = "कखगघङचछजझञटठडढणतथदधनपफबभमयरलवशषसह";

/// Marker patterns, compiled once per parser and shared read-only by every
/// file parse.
#[derive(Debug)]
pub(super) struct HierarchyPatterns {
    part: Regex,
    chapter: Regex,
    section: Regex,
    subsection: Regex,
    clause: Regex,
    section_one: Regex,
}

/// Classification of one non-blank line. The first matching marker wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineKind<'l> {
    Part { number: &'l str, title: &'l str },
    Chapter { number: &'l str, title: &'l str },
    Section { number: &'l str, title: &'l str },
    Subsection { number: &'l str, text: &'l str },
    Clause { label: &'l str, text: &'l str },
    Continuation,
}

impl HierarchyPatterns {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            part: Regex::new(r"^भाग\s*[–\-]?\s*([0-9०-९]+)\s*(.*)$")
                .context("failed to compile part marker regex")?,
            chapter: Regex::new(r"^परिच्छेद\s*[–\-]?\s*([0-9०-९]+)\s*(.*)$")
                .context("failed to compile chapter marker regex")?,
            section: Regex::new(r"^([0-9०-९]+)\.\s*(.*)$")
                .context("failed to compile section marker regex")?,
            subsection: Regex::new(r"^\(([0-9०-९]+)\)\s*(.*)$")
                .context("failed to compile subsection marker regex")?,
            clause: Regex::new(&format!(r"^\(([{CLAUSE_CONSONANTS}]+)\)\s*(.*)$"))
                .context("failed to compile clause marker regex")?,
            section_one: Regex::new(r"^१\.").context("failed to compile section one regex")?,
        })
    }

    /// Lines that end the search for the start of the act body.
    pub(super) fn is_anchor(&self, line: &str) -> bool {
        line.contains(PREAMBLE_MARKER)
            || line.contains(DEFINITION_MARKERS[0])
            || self.section_one.is_match(line)
            || self.section.is_match(line)
    }

    pub(super) fn classify<'l>(&self, line: &'l str) -> LineKind<'l> {
        if let Some((number, title)) = capture_pair(&self.part, line) {
            return LineKind::Part { number, title };
        }
        if let Some((number, title)) = capture_pair(&self.chapter, line) {
            return LineKind::Chapter { number, title };
        }
        if let Some((number, title)) = capture_pair(&self.section, line) {
            return LineKind::Section { number, title };
        }
        if let Some((number, text)) = capture_pair(&self.subsection, line) {
            return LineKind::Subsection { number, text };
        }
        if let Some((label, text)) = capture_pair(&self.clause, line) {
            return LineKind::Clause { label, text };
        }
        LineKind::Continuation
    }
}

fn capture_pair<'l>(pattern: &Regex, line: &'l str) -> Option<(&'l str, &'l str)> {
    let captures = pattern.captures(line)?;
    let first = captures.get(1)?.as_str();
    let second = captures.get(2).map(|m| m.as_str()).unwrap_or("");
    Some((first, second))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParserState {
    SeekingAnchor,
    Parsing,
}

#[derive(Debug)]
struct OpenSection {
    number: String,
    title: String,
    full_text: Vec<String>,
}

#[derive(Debug)]
struct OpenSubsection {
    number: String,
    text: String,
}

/// The unit that continuation lines are appended to.
#[derive(Debug)]
struct OpenChunk {
    chunk: LegalChunk,
    own_text: String,
}

/// Atomic (section, subsection, clause) output of one file's walk.
#[derive(Debug, Default)]
pub(super) struct AtomicParse {
    pub(super) chunks: Vec<LegalChunk>,
    pub(super) statistics: ParseStatistics,
    pub(super) definition_sections: Vec<String>,
    pub(super) cross_reference_map: BTreeMap<String, Vec<String>>,
}

pub(super) struct HierarchyStateMachine<'a> {
    patterns: &'a HierarchyPatterns,
    normalizer: &'a TextNormalizer,
    cross_refs: &'a CrossReferenceExtractor,
    act: &'a ActHeader,
    state: ParserState,
    current_part: String,
    current_chapter: String,
    section: Option<OpenSection>,
    subsection: Option<OpenSubsection>,
    current: Option<OpenChunk>,
    issued_ids: HashMap<String, usize>,
    output: AtomicParse,
}

impl<'a> HierarchyStateMachine<'a> {
    pub(super) fn new(
        patterns: &'a HierarchyPatterns,
        normalizer: &'a TextNormalizer,
        cross_refs: &'a CrossReferenceExtractor,
        act: &'a ActHeader,
    ) -> Self {
        Self {
            patterns,
            normalizer,
            cross_refs,
            act,
            state: ParserState::SeekingAnchor,
            current_part: DEFAULT_PART.to_string(),
            current_chapter: DEFAULT_CHAPTER.to_string(),
            section: None,
            subsection: None,
            current: None,
            issued_ids: HashMap::new(),
            output: AtomicParse::default(),
        }
    }

    pub(super) fn state(&self) -> ParserState {
        self.state
    }

    pub(super) fn feed_line(&mut self, raw_line: &str, page_no: u32) {
        let line = raw_line.trim();
        if line.is_empty() {
            return;
        }

        if self.state == ParserState::SeekingAnchor {
            if !self.patterns.is_anchor(line) {
                return;
            }
            debug!(act = %self.act.act_name, page_no, "found act body anchor");
            self.state = ParserState::Parsing;
        }

        match self.patterns.classify(line) {
            LineKind::Part { number, title } => {
                self.current_part = self.running_label(PART_LABEL, number, title);
            }
            LineKind::Chapter { number, title } => {
                self.current_chapter = self.running_label(CHAPTER_LABEL, number, title);
            }
            LineKind::Section { number, title } => self.open_section(number, title, page_no),
            LineKind::Subsection { number, text } => {
                self.open_subsection(number, text, page_no)
            }
            LineKind::Clause { label, text } => self.open_clause(label, text, page_no),
            LineKind::Continuation => self.continue_unit(line),
        }
    }

    pub(super) fn finish(mut self) -> AtomicParse {
        self.close_current();
        if let Some(section) = self.section.take() {
            log_closed_section(&section);
        }

        self.output.statistics.definitions = self.output.definition_sections.len();
        self.output
    }

    fn running_label(&self, kind: &str, number: &str, raw_title: &str) -> String {
        let title = self.normalizer.clean(raw_title);
        if title.is_empty() {
            format!("{kind} {number}")
        } else {
            format!("{kind} {number}: {title}")
        }
    }

    fn open_section(&mut self, number: &str, raw_title: &str, page_no: u32) {
        self.close_current();

        let title = self.normalizer.clean(raw_title);
        let unit = UnitPath {
            section_no: number,
            section_title: &title,
            subsection: None,
            clause: None,
        };
        self.open_chunk(&unit, page_no);
        self.output.statistics.sections += 1;

        let previous = self.section.replace(OpenSection {
            number: number.to_string(),
            full_text: vec![title.clone()],
            title,
        });
        if let Some(previous) = previous {
            log_closed_section(&previous);
        }
        self.subsection = None;
    }

    fn open_subsection(&mut self, number: &str, raw_text: &str, page_no: u32) {
        let Some(section) = self.section.as_ref() else {
            debug!(act = %self.act.act_name, number, "dropped subsection outside any section");
            return;
        };
        let section_no = section.number.clone();
        let section_title = section.title.clone();

        self.close_current();

        let text = self.normalizer.clean(raw_text);
        let unit = UnitPath {
            section_no: &section_no,
            section_title: &section_title,
            subsection: Some(Marker {
                label: number,
                text: &text,
            }),
            clause: None,
        };
        self.open_chunk(&unit, page_no);
        self.output.statistics.subsections += 1;

        if let Some(section) = self.section.as_mut() {
            section.full_text.push(format!("({number}) {text}"));
        }
        self.subsection = Some(OpenSubsection {
            number: number.to_string(),
            text,
        });
    }

    fn open_clause(&mut self, label: &str, raw_text: &str, page_no: u32) {
        let Some(section) = self.section.as_ref() else {
            debug!(act = %self.act.act_name, label, "dropped clause outside any section");
            return;
        };
        let section_no = section.number.clone();
        let section_title = section.title.clone();
        let subsection = self
            .subsection
            .as_ref()
            .map(|open| (open.number.clone(), open.text.clone()));

        self.close_current();

        let text = self.normalizer.clean(raw_text);
        let unit = UnitPath {
            section_no: &section_no,
            section_title: &section_title,
            subsection: subsection
                .as_ref()
                .map(|(subsection_no, subsection_text)| Marker {
                    label: subsection_no.as_str(),
                    text: subsection_text.as_str(),
                }),
            clause: Some(Marker { label, text: &text }),
        };
        self.open_chunk(&unit, page_no);
        self.output.statistics.clauses += 1;

        if let Some(section) = self.section.as_mut() {
            section.full_text.push(format!("({label}) {text}"));
        }
    }

    fn continue_unit(&mut self, line: &str) {
        if self.current.is_none() {
            debug!(act = %self.act.act_name, "discarded continuation before the first unit");
            return;
        }

        let cleaned = self.normalizer.clean(line);
        if cleaned.is_empty() {
            return;
        }

        if let Some(open) = self.current.as_mut() {
            open.chunk.content.push(' ');
            open.chunk.content.push_str(&cleaned);
            open.chunk.content_with_context.push(' ');
            open.chunk.content_with_context.push_str(&cleaned);
            open.own_text.push(' ');
            open.own_text.push_str(&cleaned);
        }
        if let Some(section) = self.section.as_mut() {
            section.full_text.push(cleaned);
        }
    }

    fn open_chunk(&mut self, unit: &UnitPath, page_no: u32) {
        let chunk_id = self.issue_chunk_id(unit);
        let context = ChunkContext {
            act: self.act,
            part: &self.current_part,
            chapter: &self.current_chapter,
            page_no,
        };
        let chunk = build_chunk(&context, unit, chunk_id);

        self.current = Some(OpenChunk {
            own_text: unit.own_text().to_string(),
            chunk,
        });
    }

    /// Composite id for the unit; a repeat of an already issued id gets an
    /// occurrence suffix.
    fn issue_chunk_id(&mut self, unit: &UnitPath) -> String {
        let base = compose_chunk_id(
            &self.act.act_identifier,
            unit.section_no,
            unit.subsection.map(|marker| marker.label),
            unit.clause.map(|marker| marker.label),
        );

        let occurrence = self.issued_ids.entry(base.clone()).or_insert(0);
        *occurrence += 1;
        if *occurrence == 1 {
            return base;
        }

        let occurrence = *occurrence;
        self.output.statistics.repeated_ids += 1;
        debug!(act = %self.act.act_name, chunk_id = %base, occurrence, "repeated unit identifier");
        format!("{base}#{occurrence}")
    }

    fn close_current(&mut self) {
        let Some(open) = self.current.take() else {
            return;
        };

        let mut chunk = open.chunk;
        let references = self.cross_refs.extract(&open.own_text);
        if !references.is_empty() {
            self.output
                .cross_reference_map
                .insert(chunk.chunk_id.clone(), references.clone());
        }
        chunk.metadata.cross_references = references;

        if chunk.metadata.is_definition == Some(true) {
            self.output.definition_sections.push(chunk.chunk_id.clone());
        }
        self.output.chunks.push(chunk);
    }
}

fn log_closed_section(section: &OpenSection) {
    debug!(
        section = %section.number,
        lines = section.full_text.len(),
        chars = section.full_text.iter().map(|line| line.chars().count()).sum::<usize>(),
        "closed section"
    );
}
