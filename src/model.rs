use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Granularity of a chunk within an act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Section,
    SubSection,
    Clause,
    SectionComprehensive,
}

impl ChunkType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChunkType::Section => "section",
            ChunkType::SubSection => "sub_section",
            ChunkType::Clause => "clause",
            ChunkType::SectionComprehensive => "section_comprehensive",
        }
    }

    /// 0 = comprehensive, 1 = section, 2 = subsection, 3 = clause.
    pub fn hierarchy_level(self) -> u8 {
        match self {
            ChunkType::SectionComprehensive => 0,
            ChunkType::Section => 1,
            ChunkType::SubSection => 2,
            ChunkType::Clause => 3,
        }
    }
}

/// Metadata attached to every chunk. Absent values serialize as `null`
/// rather than being omitted so downstream field access stays stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub act_name: String,
    pub act_identifier: String,
    pub part: String,
    pub chapter: String,
    pub dapha_no: String,
    pub sub_section_no: Option<String>,
    pub khanda_label: Option<String>,
    pub citation: String,
    pub page_no: u32,
    #[serde(rename = "type")]
    pub chunk_type: ChunkType,
    pub hierarchy_level: u8,
    pub cross_references: Vec<String>,
    pub is_definition: Option<bool>,
    pub is_schedule: Option<bool>,
    pub parent_section_title: Option<String>,
    pub sub_chunk_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalChunk {
    pub content: String,
    pub content_with_context: String,
    pub metadata: ChunkMetadata,
    pub chunk_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStatistics {
    pub sections: usize,
    pub subsections: usize,
    pub clauses: usize,
    pub definitions: usize,
    pub repeated_ids: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActMetadata {
    pub act_name: String,
    pub act_identifier: String,
    pub enactment_date: Option<String>,
    pub preamble: Option<String>,
    pub source_filename: String,
    pub total_chunks: usize,
    pub parse_statistics: ParseStatistics,
    pub definition_sections: Vec<String>,
    pub cross_reference_map: BTreeMap<String, Vec<String>>,
    pub validation_issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingReportEntry {
    pub file: String,
    pub decoded_name: String,
    pub status: ParseStatus,
    pub source_sha256: Option<String>,
    pub source_encoding: Option<String>,
    pub chunks: Option<usize>,
    pub statistics: Option<ParseStatistics>,
    pub issues: Option<Vec<String>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRunPaths {
    pub input_dir: String,
    pub output_dir: String,
    pub chunks_path: String,
    pub metadata_path: String,
    pub report_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseRunCounts {
    pub file_count: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub files_with_issues: usize,
    pub acts_total: usize,
    pub chunks_total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub jobs: Option<usize>,
    pub paths: ParseRunPaths,
    pub counts: ParseRunCounts,
    pub warnings: Vec<String>,
}
