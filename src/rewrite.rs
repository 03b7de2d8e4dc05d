use anyhow::{Context, Result};
use lol_html::html_content::{ContentType, TextChunk, UserData};
use lol_html::{element, text, HtmlRewriter, Settings};
use once_cell::sync::Lazy;
use regex::Regex;

/// Class carried by every inserted styling element.
///
/// Accompanying stylesheets target `.typename`, so this value is part of the
/// output contract and must not change.
pub const TYPENAME_CLASS: &str = "typename";

/// Whole-word primitive integer/size type names.
///
/// The list is fixed: other spellings such as `i128`, `isize` or `f32` are
/// deliberately not recognized. Word-boundary anchors keep `myu32var` from
/// matching while still matching punctuation-adjacent occurrences like
/// `(u32)`.
static TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:u8|u16|u32|u64|i8|i16|i32|i64|usize)\b")
        .expect("type name pattern is valid")
});

/// Outcome of rewriting a single document.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// The rewritten document. Byte-identical to the input when
    /// `spans_inserted` is zero.
    pub html: String,
    /// Number of `div.highlight pre` code blocks seen.
    pub blocks_scanned: usize,
    /// Number of `span.typename` elements inserted.
    pub spans_inserted: usize,
}

/// Marker set on text chunks that already live inside an inserted span, so a
/// second pass over the same document cannot wrap them again.
struct AlreadyWrapped;

/// Rewrites one HTML document, wrapping type name tokens inside
/// `div.highlight pre` code blocks in `<span class="typename">` elements.
///
/// The streaming rewriter tolerates malformed or partial HTML and passes
/// everything outside the selected code blocks through untouched. Each text
/// run inside a code block is buffered to completion before its replacement
/// is emitted, so the match scan always sees the full run at once.
pub fn rewrite_document(html: &str) -> Result<RewriteOutcome> {
    let mut output = Vec::with_capacity(html.len());
    let mut blocks_scanned = 0usize;
    let mut spans_inserted = 0usize;
    let mut pending = String::new();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("div.highlight pre", |_el| {
                    blocks_scanned += 1;
                    Ok(())
                }),
                // Runs before the code-block handler for the same chunk and
                // flags text that is already wrapped.
                text!(
                    "div.highlight pre span.typename",
                    |chunk: &mut TextChunk| {
                        chunk.set_user_data(AlreadyWrapped);
                        Ok(())
                    }
                ),
                text!("div.highlight pre", |chunk: &mut TextChunk| {
                    if chunk.user_data().is::<AlreadyWrapped>() {
                        return Ok(());
                    }

                    // Chunk boundaries are arbitrary; accumulate until the
                    // rewriter signals the end of the text run.
                    pending.push_str(chunk.as_str());
                    if !chunk.last_in_text_node() {
                        chunk.remove();
                        return Ok(());
                    }

                    let run = std::mem::take(&mut pending);
                    match highlight_text_run(&run) {
                        Some((markup, spans)) => {
                            spans_inserted += spans;
                            chunk.replace(&markup, ContentType::Html);
                        }
                        // No match: re-emit the buffered run verbatim. The
                        // buffer holds raw document text (entities are not
                        // decoded), so this keeps the output byte-identical.
                        None => chunk.replace(&run, ContentType::Html),
                    }
                    Ok(())
                }),
            ],
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter.write(html.as_bytes())?;
    rewriter.end()?;

    let html = String::from_utf8(output).context("rewriter produced non-UTF-8 output")?;

    Ok(RewriteOutcome {
        html,
        blocks_scanned,
        spans_inserted,
    })
}

/// Splices one text run into alternating plain text and styled spans.
///
/// Returns `None` when the run contains no token, so callers can skip
/// untouched runs entirely. Matches are processed left to right with a
/// cursor; zero-length gaps before a leading match or after a trailing match
/// produce no empty text segment. The concatenated text content of the
/// result always equals the input run exactly.
fn highlight_text_run(text: &str) -> Option<(String, usize)> {
    let mut cursor = 0;
    let mut spans = 0;
    let mut out = String::with_capacity(text.len());

    for m in TYPE_RE.find_iter(text) {
        if m.start() > cursor {
            out.push_str(&text[cursor..m.start()]);
        }

        out.push_str("<span class=\"");
        out.push_str(TYPENAME_CLASS);
        out.push_str("\">");
        out.push_str(m.as_str());
        out.push_str("</span>");

        cursor = m.end();
        spans += 1;
    }

    if spans == 0 {
        return None;
    }

    if cursor < text.len() {
        out.push_str(&text[cursor..]);
    }

    Some((out, spans))
}
