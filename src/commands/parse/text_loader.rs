use super::*;

/// Decoder that produced the text of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SourceEncoding {
    Utf8,
    Utf8Bom,
    SingleByte,
}

impl SourceEncoding {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Utf8Bom => "utf-8-sig",
            SourceEncoding::SingleByte => "windows-1252",
        }
    }
}

#[derive(Debug)]
pub(super) struct LoadedText {
    pub(super) text: String,
    pub(super) encoding: SourceEncoding,
}

pub(super) fn load_text(path: &Path) -> Result<LoadedText> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode_text(&bytes).with_context(|| format!("failed to decode {}", path.display()))
}

/// UTF-8 first, then UTF-8 with the signature stripped, then a permissive
/// single-byte decoding.
pub(super) fn decode_text(bytes: &[u8]) -> Result<LoadedText> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        if !text.starts_with('\u{feff}') {
            return Ok(LoadedText {
                text: text.into_owned(),
                encoding: SourceEncoding::Utf8,
            });
        }
    }

    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        if encoding == UTF_8 {
            if let Some(text) =
                UTF_8.decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
            {
                return Ok(LoadedText {
                    text: text.into_owned(),
                    encoding: SourceEncoding::Utf8Bom,
                });
            }
        }
    }

    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        bail!("input is not decodable as utf-8, utf-8-sig or windows-1252");
    }

    Ok(LoadedText {
        text: text.into_owned(),
        encoding: SourceEncoding::SingleByte,
    })
}
