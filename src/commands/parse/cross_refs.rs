use super::*;

/// Finds section, subsection and chapter numbers referenced from a unit's text.
#[derive(Debug)]
pub(super) struct CrossReferenceExtractor {
    patterns: Vec<Regex>,
}

impl CrossReferenceExtractor {
    pub(super) fn new() -> Result<Self> {
        let sources = [
            ("section reference", r"दफा\s*([0-9०-९]+)"),
            ("subsection reference", r"उपदफा\s*\(([0-9०-९]+)\)"),
            ("chapter reference", r"परिच्छेद\s*([0-9०-९]+)"),
        ];

        let mut patterns = Vec::with_capacity(sources.len());
        for (name, source) in sources {
            patterns.push(
                Regex::new(source).with_context(|| format!("failed to compile {name} regex"))?,
            );
        }

        Ok(Self { patterns })
    }

    /// Deduplicated numbers in sorted order.
    pub(super) fn extract(&self, text: &str) -> Vec<String> {
        let mut references = BTreeSet::<String>::new();
        for pattern in &self.patterns {
            for captures in pattern.captures_iter(text) {
                if let Some(number) = captures.get(1) {
                    references.insert(number.as_str().to_string());
                }
            }
        }

        references.into_iter().collect()
    }
}
