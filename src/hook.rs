use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Opaque generation context the site builder hands to every post-write
/// hook.
///
/// Hooks are free to ignore it; the fields exist so builders can pass
/// through whatever they know about the run. Unrecognized fields are kept in
/// `extra` rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildContext {
    /// Name of the invoking site builder, if it identifies itself.
    pub builder: Option<String>,
    /// Root of the generated output tree.
    pub output_root: Option<PathBuf>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A post-processing callback the site builder invokes once per written
/// output file.
///
/// The builder owns the hook list and calls each hook with
/// `(path, context)` after the file is fully written — plain dependency
/// injection, no process-wide signal registry. Hooks are invoked
/// sequentially per file and must not assume they will see the same file
/// twice.
pub trait PostWriteHook {
    /// Hook name used in logs and error context.
    fn name(&self) -> &str;

    /// Processes one written output file in place.
    fn process(&self, path: &Path, ctx: &BuildContext) -> Result<()>;
}

/// One hook invocation as piped by a builder over stdin.
///
/// ```json
/// {"path": "docs/posts/ints.html", "context": {"builder": "pelican"}}
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct HookInput {
    /// Path of the file the builder just wrote.
    pub path: PathBuf,
    /// Opaque generation context, forwarded to the hooks as-is.
    #[serde(default)]
    pub context: BuildContext,
}

impl HookInput {
    /// Parses a hook invocation payload from a reader (typically stdin).
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).context("Failed to parse hook invocation payload")
    }
}

/// Invokes every hook, in order, with the same `(path, context)` pair.
///
/// # Errors
///
/// The first failing hook aborts the run; the error carries the hook name
/// and file path.
pub fn run_post_write_hooks(
    hooks: &[Box<dyn PostWriteHook>],
    path: &Path,
    ctx: &BuildContext,
) -> Result<()> {
    for hook in hooks {
        log::debug!(
            "Running post-write hook '{}' on {}",
            hook.name(),
            path.display()
        );
        hook.process(path, ctx).with_context(|| {
            format!(
                "Post-write hook '{}' failed for {}",
                hook.name(),
                path.display()
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_input_parses_minimal_payload() {
        let input = HookInput::from_reader(r#"{"path": "out/index.html"}"#.as_bytes()).unwrap();
        assert_eq!(input.path, PathBuf::from("out/index.html"));
        assert!(input.context.builder.is_none());
    }

    #[test]
    fn test_hook_input_keeps_unknown_context_fields() {
        let payload = r#"{
            "path": "out/post.html",
            "context": {"builder": "pelican", "commit": "abc1234"}
        }"#;
        let input = HookInput::from_reader(payload.as_bytes()).unwrap();
        assert_eq!(input.context.builder.as_deref(), Some("pelican"));
        assert_eq!(
            input.context.extra.get("commit").and_then(|v| v.as_str()),
            Some("abc1234")
        );
    }

    #[test]
    fn test_hook_input_rejects_missing_path() {
        assert!(HookInput::from_reader(r#"{"context": {}}"#.as_bytes()).is_err());
    }

    #[test]
    fn test_failing_hook_carries_name_in_error() {
        struct Failing;
        impl PostWriteHook for Failing {
            fn name(&self) -> &str {
                "failing"
            }
            fn process(&self, _path: &Path, _ctx: &BuildContext) -> Result<()> {
                anyhow::bail!("boom")
            }
        }

        let hooks: Vec<Box<dyn PostWriteHook>> = vec![Box::new(Failing)];
        let err = run_post_write_hooks(&hooks, Path::new("out/a.html"), &BuildContext::default())
            .unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("failing"));
        assert!(msg.contains("a.html"));
    }
}
