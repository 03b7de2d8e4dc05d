use anyhow::Result;
use clap::Parser;
use highlight_types::{
    print_summary, report_error, run_post_write_hooks, HookInput, PostWriteHook,
    TypenameHighlighter,
};
use std::io;
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;
use walkdir::WalkDir;

/// Highlight primitive integer type names in generated HTML code blocks.
#[derive(Parser)]
#[command(name = "highlight-types", version, about)]
struct Cli {
    /// Generated-output directory; every .html file under it is processed
    /// in place
    #[arg(value_name = "OUTPUT_DIR", required_unless_present = "hook")]
    output_dir: Option<PathBuf>,

    /// Read one {"path": ..., "context": ...} invocation from stdin instead
    /// of walking a directory (for use as a builder post-write hook)
    #[arg(long)]
    hook: bool,
}

pub fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        report_error(&format!("{:#}", e));
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let highlighter = TypenameHighlighter::new();

    if cli.hook {
        let input = HookInput::from_reader(io::stdin())?;
        let hooks: Vec<Box<dyn PostWriteHook>> = vec![Box::new(highlighter)];
        return run_post_write_hooks(&hooks, &input.path, &input.context);
    }

    let Some(output_dir) = cli.output_dir else {
        anyhow::bail!("OUTPUT_DIR is required unless --hook is given");
    };

    let start = Instant::now();
    let mut reports = Vec::new();

    // Files are visited sequentially; the hook itself skips anything that
    // is not .html.
    for entry in WalkDir::new(&output_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        if let Some(report) = highlighter.process_file(entry.path())? {
            reports.push(report);
        }
    }

    print_summary(&reports, start.elapsed());
    Ok(())
}
