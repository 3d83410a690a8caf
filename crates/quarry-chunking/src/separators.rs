//! Separator levels, coarse to fine, below the paragraph boundary.
//!
//! Every split keeps the separator attached to the preceding segment, so
//! concatenating the segments of a level reproduces its input exactly.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Line,
    Sentence,
    Word,
}

impl Separator {
    /// Levels in the order they are tried.
    pub const LEVELS: [Separator; 3] = [Separator::Line, Separator::Sentence, Separator::Word];

    /// The next finer level, or `None` once only fixed-stride slicing is left.
    pub fn finer(self) -> Option<Separator> {
        match self {
            Self::Line => Some(Self::Sentence),
            Self::Sentence => Some(Self::Word),
            Self::Word => None,
        }
    }

    pub fn split(self, text: &str) -> Vec<&str> {
        match self {
            Self::Line => text.split_inclusive('\n').collect(),
            Self::Sentence => split_sentences(text),
            Self::Word => text.split_inclusive(char::is_whitespace).collect(),
        }
    }
}

/// Split into paragraphs on blank lines, LF or CRLF. Whitespace-only
/// paragraphs are dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let end = offset + line.len();
        // A line holding only its terminator. The first line of the text
        // has no preceding newline and so never starts a break.
        if offset > 0 && line.trim_end_matches(['\r', '\n']).is_empty() && line.ends_with('\n') {
            out.push(&text[start..offset]);
            start = end;
        }
        offset = end;
    }
    out.push(&text[start..]);

    out.retain(|p| !p.trim().is_empty());
    out
}

/// Sentence terminator followed by whitespace ends a sentence; the whitespace
/// character stays with the sentence it follows.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;

    for (i, c) in text.char_indices() {
        if prev_terminal && c.is_whitespace() {
            let end = i + c.len_utf8();
            out.push(&text[start..end]);
            start = end;
        }
        prev_terminal = matches!(c, '.' | '!' | '?');
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}
