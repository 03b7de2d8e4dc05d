use crate::hook::{BuildContext, PostWriteHook};
use crate::rewrite::rewrite_document;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Report for one file the highlighter looked at.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// Number of `div.highlight pre` code blocks in the file.
    pub blocks_scanned: usize,
    /// Number of `span.typename` elements inserted.
    pub spans_inserted: usize,
    /// Whether the file was overwritten. False when nothing matched.
    pub rewritten: bool,
}

/// Post-write hook that highlights primitive integer type names inside
/// generated code blocks.
///
/// # Overview
///
/// For each written `.html` file, the hook scans text inside
/// `div.highlight pre` subtrees (the markup shape syntax highlighters emit
/// for code blocks) and wraps every whole-word occurrence of
/// `u8, u16, u32, u64, i8, i16, i32, i64, usize` in
/// `<span class="typename">…</span>`, then overwrites the file in place.
/// Files with any other extension are ignored without being read.
///
/// # Idempotency
///
/// Tokens that already sit inside a `span.typename` element are recognized
/// and skipped, so running the hook twice over the same output tree leaves
/// it unchanged.
pub struct TypenameHighlighter;

impl TypenameHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Processes one output file in place.
    ///
    /// Returns `None` for non-HTML paths (silent no-op, the file is not
    /// read) and a [`FileReport`] otherwise. The file is only overwritten
    /// when at least one span was inserted; untouched files stay
    /// byte-identical.
    ///
    /// # Errors
    ///
    /// Read and write failures propagate with the file path attached;
    /// malformed HTML does not fail, the rewriter degrades gracefully.
    pub fn process_file(&self, path: &Path) -> Result<Option<FileReport>> {
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            return Ok(None);
        }

        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // Cheap substring probe before parsing; most pages carry no
        // highlighted code block at all.
        if !html.contains("highlight") {
            return Ok(Some(FileReport {
                path: path.to_path_buf(),
                blocks_scanned: 0,
                spans_inserted: 0,
                rewritten: false,
            }));
        }

        let outcome = rewrite_document(&html)
            .with_context(|| format!("Failed to rewrite {}", path.display()))?;

        let rewritten = outcome.spans_inserted > 0;
        if rewritten {
            fs::write(path, &outcome.html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        log::debug!(
            "{}: {} code block(s), {} span(s) inserted",
            path.display(),
            outcome.blocks_scanned,
            outcome.spans_inserted
        );

        Ok(Some(FileReport {
            path: path.to_path_buf(),
            blocks_scanned: outcome.blocks_scanned,
            spans_inserted: outcome.spans_inserted,
            rewritten,
        }))
    }
}

impl Default for TypenameHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl PostWriteHook for TypenameHighlighter {
    fn name(&self) -> &str {
        "highlight-types"
    }

    fn process(&self, path: &Path, _ctx: &BuildContext) -> Result<()> {
        self.process_file(path).map(|_| ())
    }
}
