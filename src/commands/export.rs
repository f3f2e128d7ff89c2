use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::cli::{ExportArgs, ListFormat};
use crate::model::LegalChunk;
use crate::util::{read_json, write_json_pretty};

const EMPTY_CONTENT: &str = "Empty Content";

/// Document shape handed to the vector-store ingestion step.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct IngestionDocument {
    page_content: String,
    metadata: Map<String, Value>,
    chunk_id: String,
}

pub fn run(args: ExportArgs) -> Result<()> {
    if !args.chunks_path.is_file() {
        bail!("chunks file not found: {}", args.chunks_path.display());
    }

    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| args.chunks_path.with_file_name("ingest_documents.json"));

    let chunks: Vec<LegalChunk> = read_json(&args.chunks_path)?;
    let documents = chunks
        .iter()
        .map(|chunk| to_ingestion_document(chunk, args.list_format))
        .collect::<Result<Vec<IngestionDocument>>>()?;

    write_json_pretty(&output_path, &documents)?;

    info!(
        path = %output_path.display(),
        documents = documents.len(),
        list_format = args.list_format.as_str(),
        "wrote ingestion documents"
    );

    Ok(())
}

fn to_ingestion_document(chunk: &LegalChunk, list_format: ListFormat) -> Result<IngestionDocument> {
    let page_content = [&chunk.content_with_context, &chunk.content]
        .into_iter()
        .find(|text| !text.is_empty())
        .cloned()
        .unwrap_or_else(|| EMPTY_CONTENT.to_string());

    let Value::Object(fields) = serde_json::to_value(&chunk.metadata)
        .with_context(|| format!("failed to serialize metadata of {}", chunk.chunk_id))?
    else {
        bail!("metadata of {} is not a json object", chunk.chunk_id);
    };

    let mut metadata = fields
        .into_iter()
        .map(|(key, value)| (key, flatten_value(value, list_format)))
        .collect::<Map<String, Value>>();
    metadata.insert("chunk_id".to_string(), Value::String(chunk.chunk_id.clone()));

    Ok(IngestionDocument {
        page_content,
        metadata,
        chunk_id: chunk.chunk_id.clone(),
    })
}

/// One rule for every metadata field: null becomes an empty string, lists
/// follow the requested format, scalars pass through.
fn flatten_value(value: Value, list_format: ListFormat) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::Array(items) => match list_format {
            ListFormat::Joined => Value::String(
                items
                    .iter()
                    .map(scalar_text)
                    .collect::<Vec<String>>()
                    .join(", "),
            ),
            ListFormat::List => Value::Array(items),
        },
        other => other,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChunkMetadata, ChunkType};

    fn clause_chunk() -> LegalChunk {
        LegalChunk {
            content: "(क) \"अधिकारी\" भन्नाले तोकिएको अधिकारी सम्झनु पर्छ।".to_string(),
            content_with_context: "दफा १: परिभाषा\n(१) यस ऐनमा\n(क) \"अधिकारी\" भन्नाले तोकिएको अधिकारी सम्झनु पर्छ।".to_string(),
            metadata: ChunkMetadata {
                act_name: "श्रम ऐन".to_string(),
                act_identifier: "ab12cd34".to_string(),
                part: "Main".to_string(),
                chapter: "परिच्छेद १: प्रारम्भिक".to_string(),
                dapha_no: "१".to_string(),
                sub_section_no: Some("१".to_string()),
                khanda_label: Some("क".to_string()),
                citation: "श्रम ऐन, दफा १(१)(क)".to_string(),
                page_no: 2,
                chunk_type: ChunkType::Clause,
                hierarchy_level: 3,
                cross_references: vec!["३".to_string(), "५".to_string()],
                is_definition: None,
                is_schedule: None,
                parent_section_title: Some("परिभाषा".to_string()),
                sub_chunk_count: None,
            },
            chunk_id: "ab12cd34_१_१_क".to_string(),
        }
    }

    #[test]
    fn joined_format_flattens_lists_and_nulls() {
        let document = to_ingestion_document(&clause_chunk(), ListFormat::Joined)
            .expect("document should build");

        assert!(document.page_content.starts_with("दफा १: परिभाषा"));
        assert_eq!(document.metadata["cross_references"], Value::from("३, ५"));
        assert_eq!(document.metadata["is_definition"], Value::from(""));
        assert_eq!(document.metadata["sub_chunk_count"], Value::from(""));
        assert_eq!(document.metadata["type"], Value::from("clause"));
        assert_eq!(document.metadata["hierarchy_level"], Value::from(3));
        assert_eq!(document.metadata["chunk_id"], Value::from("ab12cd34_१_१_क"));
    }

    #[test]
    fn list_format_keeps_arrays() {
        let document = to_ingestion_document(&clause_chunk(), ListFormat::List)
            .expect("document should build");

        assert_eq!(
            document.metadata["cross_references"],
            Value::Array(vec![Value::from("३"), Value::from("५")])
        );
    }

    #[test]
    fn page_content_falls_back_to_minimal_then_placeholder() {
        let mut chunk = clause_chunk();
        chunk.content_with_context.clear();
        let document = to_ingestion_document(&chunk, ListFormat::Joined)
            .expect("document should build");
        assert_eq!(document.page_content, chunk.content);

        chunk.content.clear();
        let document = to_ingestion_document(&chunk, ListFormat::Joined)
            .expect("document should build");
        assert_eq!(document.page_content, EMPTY_CONTENT);
    }
}
