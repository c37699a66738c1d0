use std::io::{self, Write};
use std::ops::Range;

/// Byte span in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slice the source text covered by this span.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// A single replacement of a byte span with new text.
#[derive(Debug, Clone)]
pub struct Patch {
    pub span: Span,
    pub new_text: String,
}

/// Replacements applied to the original source in a single forward pass.
///
/// Bytes outside the patched spans are copied verbatim, which is what keeps
/// comments, whitespace, quoting style and attribute order intact.
#[derive(Debug, Default)]
pub struct PatchSet {
    patches: Vec<Patch>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, span: Span, new_text: String) {
        self.patches.push(Patch { span, new_text });
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Write the patched source to a writer.
    ///
    /// Every attribute value owns a disjoint span, so overlapping patches or
    /// spans past the end of the source mean the set was built against a
    /// different document. That is reported as `InvalidInput`.
    pub fn write_to<W: Write>(&self, source: &str, mut writer: W) -> io::Result<()> {
        let bytes = source.as_bytes();
        let mut ordered: Vec<&Patch> = self.patches.iter().collect();
        ordered.sort_by_key(|p| p.span.start);

        let mut cursor = 0;
        for patch in ordered {
            let Span { start, end } = patch.span;
            if start < cursor {
                return Err(invalid_span(
                    patch.span,
                    format!("overlaps a patch ending at byte {cursor}"),
                ));
            }
            if end < start || end > bytes.len() {
                return Err(invalid_span(
                    patch.span,
                    format!("is outside the {}-byte source", bytes.len()),
                ));
            }
            writer.write_all(&bytes[cursor..start])?;
            writer.write_all(patch.new_text.as_bytes())?;
            cursor = end;
        }

        writer.write_all(&bytes[cursor..])
    }
}

fn invalid_span(span: Span, reason: String) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("patch {}..{} {reason}", span.start, span.end),
    )
}
