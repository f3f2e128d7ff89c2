use super::*;

pub(super) const SECTION_LABEL: &str = "दफा";
pub(super) const DEFINITION_MARKERS: [&str; 3] = ["परिभाषा", "परिभाषाहरू", "शब्दार्थ"];
pub(super) const SCHEDULE_MARKERS: [&str; 2] = ["अनुसूची", "तफसिल"];

/// Running labels in effect when a unit is recognized.
#[derive(Debug, Clone, Copy)]
pub(super) struct ChunkContext<'a> {
    pub(super) act: &'a ActHeader,
    pub(super) part: &'a str,
    pub(super) chapter: &'a str,
    pub(super) page_no: u32,
}

/// A `(label) text` marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Marker<'a> {
    pub(super) label: &'a str,
    pub(super) text: &'a str,
}

/// Where a recognized unit sits: always under a section, optionally under a
/// subsection, optionally a clause.
#[derive(Debug, Clone, Copy)]
pub(super) struct UnitPath<'a> {
    pub(super) section_no: &'a str,
    pub(super) section_title: &'a str,
    pub(super) subsection: Option<Marker<'a>>,
    pub(super) clause: Option<Marker<'a>>,
}

impl UnitPath<'_> {
    pub(super) fn chunk_type(&self) -> ChunkType {
        match (self.subsection, self.clause) {
            (_, Some(_)) => ChunkType::Clause,
            (Some(_), None) => ChunkType::SubSection,
            (None, None) => ChunkType::Section,
        }
    }

    /// Text belonging to this unit alone, without ancestor headers.
    pub(super) fn own_text(&self) -> &str {
        match (self.subsection, self.clause) {
            (_, Some(clause)) => clause.text,
            (Some(subsection), None) => subsection.text,
            (None, None) => self.section_title,
        }
    }
}

pub(super) fn compose_chunk_id(
    act_identifier: &str,
    section_no: &str,
    subsection_no: Option<&str>,
    clause_label: Option<&str>,
) -> String {
    let mut parts = vec![act_identifier, section_no];
    parts.extend(subsection_no);
    parts.extend(clause_label);
    parts.join("_")
}

pub(super) fn compose_citation(
    act_name: &str,
    section_no: &str,
    subsection_no: Option<&str>,
    clause_label: Option<&str>,
) -> String {
    let mut citation = format!("{act_name}, {SECTION_LABEL} {section_no}");
    if let Some(subsection_no) = subsection_no {
        citation.push_str(&format!("({subsection_no})"));
    }
    if let Some(clause_label) = clause_label {
        citation.push_str(&format!("({clause_label})"));
    }
    citation
}

/// Returns `(content, content_with_context)`.
pub(super) fn compose_content(unit: &UnitPath) -> (String, String) {
    let minimal = match (unit.subsection, unit.clause) {
        (_, Some(clause)) => format!("({}) {}", clause.label, clause.text),
        (Some(subsection), None) => format!("({}) {}", subsection.label, subsection.text),
        (None, None) => format!("{}. {}", unit.section_no, unit.section_title),
    };

    let mut contextual = format!(
        "{SECTION_LABEL} {}: {}\n",
        unit.section_no, unit.section_title
    );
    if let Some(subsection) = unit.subsection {
        contextual.push_str(&format!("({}) {}\n", subsection.label, subsection.text));
    }
    if let Some(clause) = unit.clause {
        contextual.push_str(&format!("({}) {}", clause.label, clause.text));
    }

    (minimal.trim().to_string(), contextual.trim().to_string())
}

pub(super) fn is_definition_title(title: &str) -> bool {
    DEFINITION_MARKERS.iter().any(|marker| title.contains(marker))
}

pub(super) fn is_schedule_title(title: &str) -> bool {
    SCHEDULE_MARKERS.iter().any(|marker| title.contains(marker))
}

/// Builds the chunk for a freshly recognized unit. Cross references are
/// filled in when the unit closes, once its continuation lines are known.
pub(super) fn build_chunk(context: &ChunkContext, unit: &UnitPath, chunk_id: String) -> LegalChunk {
    let chunk_type = unit.chunk_type();
    let subsection_no = unit.subsection.map(|marker| marker.label);
    let clause_label = unit.clause.map(|marker| marker.label);
    let (content, content_with_context) = compose_content(unit);
    let is_section = chunk_type == ChunkType::Section;

    LegalChunk {
        content,
        content_with_context,
        metadata: ChunkMetadata {
            act_name: context.act.act_name.clone(),
            act_identifier: context.act.act_identifier.clone(),
            part: context.part.to_string(),
            chapter: context.chapter.to_string(),
            dapha_no: unit.section_no.to_string(),
            sub_section_no: subsection_no.map(ToOwned::to_owned),
            khanda_label: clause_label.map(ToOwned::to_owned),
            citation: compose_citation(
                &context.act.act_name,
                unit.section_no,
                subsection_no,
                clause_label,
            ),
            page_no: context.page_no,
            chunk_type,
            hierarchy_level: chunk_type.hierarchy_level(),
            cross_references: Vec::new(),
            is_definition: is_section.then(|| is_definition_title(unit.section_title)),
            is_schedule: is_section.then(|| is_schedule_title(unit.section_title)),
            parent_section_title: (!is_section).then(|| unit.section_title.to_string()),
            sub_chunk_count: None,
        },
        chunk_id,
    }
}
