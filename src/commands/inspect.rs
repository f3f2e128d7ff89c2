use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::InspectArgs;
use crate::commands::parse::{LegalParser, ParsedAct};
use crate::model::{ActMetadata, LegalChunk};

#[derive(Debug, Serialize)]
struct InspectResponse<'a> {
    source_encoding: &'a str,
    returned: usize,
    metadata: &'a ActMetadata,
    chunks: &'a [LegalChunk],
}

pub fn run(args: InspectArgs) -> Result<()> {
    if !args.file.is_file() {
        bail!("input file not found: {}", args.file.display());
    }

    let parser = LegalParser::new()?;
    let parsed = parser.parse_file(&args.file)?;
    let limit = args
        .limit
        .unwrap_or(parsed.chunks.len())
        .min(parsed.chunks.len());

    info!(
        act = %parsed.metadata.act_name,
        act_identifier = %parsed.metadata.act_identifier,
        encoding = parsed.source_encoding,
        chunks = parsed.chunks.len(),
        "inspected act"
    );
    for issue in &parsed.metadata.validation_issues {
        warn!(issue = %issue, "parse quality issue");
    }

    if args.json {
        write_json_response(&parsed, limit)
    } else {
        write_text_response(&parsed, limit)
    }
}

fn write_json_response(parsed: &ParsedAct, limit: usize) -> Result<()> {
    let response = InspectResponse {
        source_encoding: parsed.source_encoding,
        returned: limit,
        metadata: &parsed.metadata,
        chunks: &parsed.chunks[..limit],
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &response)
        .context("failed to serialize inspect json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(parsed: &ParsedAct, limit: usize) -> Result<()> {
    let metadata = &parsed.metadata;
    let statistics = &metadata.parse_statistics;
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Act: {} [{}]",
        metadata.act_name, metadata.act_identifier
    )?;
    writeln!(
        output,
        "Enacted: {}",
        metadata.enactment_date.as_deref().unwrap_or("unknown")
    )?;
    writeln!(
        output,
        "Statistics: sections={} subsections={} clauses={} definitions={} repeated_ids={}",
        statistics.sections,
        statistics.subsections,
        statistics.clauses,
        statistics.definitions,
        statistics.repeated_ids,
    )?;
    writeln!(output, "Chunks: {} of {}", limit, parsed.chunks.len())?;

    for chunk in &parsed.chunks[..limit] {
        writeln!(
            output,
            "{}\t{}\tpage {}\t{}",
            chunk.chunk_id,
            chunk.metadata.chunk_type.as_str(),
            chunk.metadata.page_no,
            chunk.metadata.citation
        )?;
    }

    for issue in &metadata.validation_issues {
        writeln!(output, "Issue: {issue}")?;
    }

    output.flush()?;
    Ok(())
}
