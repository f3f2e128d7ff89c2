use super::*;

const DECORATIVE_GLYPHS: &str = r"[□▪▫●○◆◇■•]";
const WATERMARK: &str = r"(?i)www\.lawcommission\.gov\.np";
const GAZETTE_HEADER: &str = r"(?s)नेपाल\s+राजपत्र.*?भाग";
const PAGE_NUMBER_LINE: &str = r"(?m)^\s*[0-9०-९]+\s*$";

#[derive(Debug)]
pub(super) struct TextNormalizer {
    decorative_glyphs: Regex,
    watermark: Regex,
    gazette_header: Regex,
    page_number_line: Regex,
    whitespace_run: Regex,
    terminator_spacing: Regex,
}

impl TextNormalizer {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            decorative_glyphs: Regex::new(DECORATIVE_GLYPHS)
                .context("failed to compile decorative glyph regex")?,
            watermark: Regex::new(WATERMARK).context("failed to compile watermark regex")?,
            gazette_header: Regex::new(GAZETTE_HEADER)
                .context("failed to compile gazette header regex")?,
            page_number_line: Regex::new(PAGE_NUMBER_LINE)
                .context("failed to compile page number line regex")?,
            whitespace_run: Regex::new(r"\s+").context("failed to compile whitespace regex")?,
            terminator_spacing: Regex::new(r"\s*([।॥,])\s*")
                .context("failed to compile terminator spacing regex")?,
        })
    }

    /// Strips layout noise and normalizes spacing. `clean(clean(x)) == clean(x)`.
    pub(super) fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        // A removal can splice together a new match, so repeat until stable.
        let mut current = text.to_string();
        loop {
            let next = self.strip_layout_noise(&current);
            if next == current {
                break;
            }
            current = next;
        }

        let collapsed = self.whitespace_run.replace_all(&current, " ");
        let spaced = self.terminator_spacing.replace_all(&collapsed, "$1 ");
        spaced.trim().to_string()
    }

    fn strip_layout_noise(&self, text: &str) -> String {
        let text = self.decorative_glyphs.replace_all(text, "");
        let text = self.watermark.replace_all(&text, "");
        let text = self.gazette_header.replace_all(&text, "");
        self.page_number_line.replace_all(&text, "").into_owned()
    }
}
