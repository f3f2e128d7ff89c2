use super::*;

pub(super) const PREAMBLE_MARKER: &str = "प्रस्तावना";
const DATE_SCAN_CHARS: usize = 500;
const PREAMBLE_MARKER_SCAN_CHARS: usize = 1000;
const PREAMBLE_SEARCH_CHARS: usize = 2000;
const PREAMBLE_MAX_CHARS: usize = 500;

/// File-level facts derived before the hierarchy walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ActHeader {
    pub(super) act_name: String,
    pub(super) act_identifier: String,
    pub(super) enactment_date: Option<String>,
    pub(super) preamble: Option<String>,
    pub(super) source_filename: String,
}

#[derive(Debug)]
pub(super) struct ActMetadataExtractor {
    enactment_date: Regex,
    preamble: Regex,
}

impl ActMetadataExtractor {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            enactment_date: Regex::new(r"२०[0-9०-९]+")
                .context("failed to compile enactment date regex")?,
            preamble: Regex::new(r"(?s)प्रस्तावना[:\s]+(.*?)(?:भाग|परिच्छेद|१\.)")
                .context("failed to compile preamble regex")?,
        })
    }

    pub(super) fn extract(
        &self,
        path: &Path,
        raw_text: &str,
        normalizer: &TextNormalizer,
    ) -> ActHeader {
        let source_filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let act_name = derive_act_name(&source_filename);
        let act_identifier = act_identifier(&act_name);

        let enactment_date = self
            .enactment_date
            .find(char_prefix(raw_text, DATE_SCAN_CHARS))
            .map(|found| found.as_str().to_string());

        ActHeader {
            preamble: self.extract_preamble(raw_text, normalizer),
            act_name,
            act_identifier,
            enactment_date,
            source_filename,
        }
    }

    fn extract_preamble(&self, raw_text: &str, normalizer: &TextNormalizer) -> Option<String> {
        if !char_prefix(raw_text, PREAMBLE_MARKER_SCAN_CHARS).contains(PREAMBLE_MARKER) {
            return None;
        }

        let captures = self
            .preamble
            .captures(char_prefix(raw_text, PREAMBLE_SEARCH_CHARS))?;
        let cleaned = normalizer.clean(captures.get(1)?.as_str());
        if cleaned.is_empty() {
            return None;
        }

        Some(char_prefix(&cleaned, PREAMBLE_MAX_CHARS).to_string())
    }
}

/// Act name from a source filename: percent-decoded, extension stripped,
/// underscores turned into spaces.
pub(super) fn derive_act_name(filename: &str) -> String {
    let decoded = percent_decode(filename).unwrap_or_else(|| filename.to_string());
    strip_extension(&decoded).replace('_', " ").trim().to_string()
}

/// First 8 hex characters of the MD5 digest of the act name. Every chunk id
/// of the act is prefixed with this value.
pub(super) fn act_identifier(act_name: &str) -> String {
    let digest = format!("{:x}", md5::compute(act_name.as_bytes()));
    digest[..8].to_string()
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) if index > 0 && !name[..index].chars().all(|ch| ch == '.') => &name[..index],
        _ => name,
    }
}

pub(super) fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
