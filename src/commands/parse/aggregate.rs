use super::*;

const COMPREHENSIVE_ID_SUFFIX: &str = "full";
const COMPREHENSIVE_CITATION_TAG: &str = "(पूर्ण)";

/// One `section_comprehensive` chunk per section number that produced more
/// than one atomic chunk, in order of the section's first appearance.
pub(super) fn build_comprehensive_chunks(chunks: &[LegalChunk], act: &ActHeader) -> Vec<LegalChunk> {
    let mut order = Vec::<&str>::new();
    let mut groups = HashMap::<&str, Vec<&LegalChunk>>::new();

    for chunk in chunks.iter().filter(|chunk| {
        matches!(
            chunk.metadata.chunk_type,
            ChunkType::Section | ChunkType::SubSection | ChunkType::Clause
        )
    }) {
        let section_no = chunk.metadata.dapha_no.as_str();
        groups
            .entry(section_no)
            .or_insert_with(|| {
                order.push(section_no);
                Vec::new()
            })
            .push(chunk);
    }

    order
        .into_iter()
        .filter_map(|section_no| {
            let members = groups.get(section_no)?;
            (members.len() > 1).then(|| comprehensive_chunk(section_no, members, act))
        })
        .collect()
}

fn comprehensive_chunk(section_no: &str, members: &[&LegalChunk], act: &ActHeader) -> LegalChunk {
    let first = &members[0].metadata;
    let content = members
        .iter()
        .map(|chunk| chunk.content.as_str())
        .collect::<Vec<&str>>()
        .join("\n");
    let cross_references = members
        .iter()
        .flat_map(|chunk| chunk.metadata.cross_references.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    LegalChunk {
        content_with_context: content.clone(),
        content,
        metadata: ChunkMetadata {
            act_name: act.act_name.clone(),
            act_identifier: act.act_identifier.clone(),
            part: first.part.clone(),
            chapter: first.chapter.clone(),
            dapha_no: section_no.to_string(),
            sub_section_no: None,
            khanda_label: None,
            citation: format!(
                "{}, {SECTION_LABEL} {section_no} {COMPREHENSIVE_CITATION_TAG}",
                act.act_name
            ),
            page_no: first.page_no,
            chunk_type: ChunkType::SectionComprehensive,
            hierarchy_level: ChunkType::SectionComprehensive.hierarchy_level(),
            cross_references,
            is_definition: None,
            is_schedule: None,
            parent_section_title: None,
            sub_chunk_count: Some(members.len()),
        },
        chunk_id: format!(
            "{}_{section_no}_{COMPREHENSIVE_ID_SUFFIX}",
            act.act_identifier
        ),
    }
}
