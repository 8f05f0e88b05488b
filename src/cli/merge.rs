/// Merging a samples tree into Markdown
///
/// Every `.md`, `.java`, `.kts`, `.groovy` and `.xml` file below the root becomes
/// one block: a `# relative/path` header followed by the file itself. Markdown is
/// inlined as-is; code goes into a fenced block tagged with its language. Blocks
/// go through the MarkdownWriter, which never splits a block, so a fence always
/// opens and closes in the same output file.
use crate::cli::markdown::MarkdownWriter;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

/// Extensions picked up by a merge, lowercase and without the dot
pub const MERGE_EXTENSIONS: &[&str] = &["md", "java", "kts", "groovy", "xml"];

/// Totals of a merge run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub merged: usize,
    pub failed: usize,
    pub output_files: Vec<PathBuf>,
}

/// Fence tag for a code extension; empty for unknown ones
pub fn code_fence_language(extension: &str) -> &'static str {
    match extension {
        "java" => "java",
        "kts" => "kotlin",
        "groovy" => "groovy",
        "xml" => "xml",
        _ => "",
    }
}

fn merge_extension(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    MERGE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Files to merge below `directory`, sorted by path
pub fn discover_merge_files(directory: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| merge_extension(entry.path()).is_some())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Path relative to `root` with `/` separators on every platform
pub fn relative_display(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Render one file as a merge block
pub fn render_merged_file(relative_path: &str, extension: &str, content: &str) -> String {
    let mut block = format!("\n# {}\n", relative_path);

    if extension == "md" {
        block.push_str(content);
        block.push('\n');
        return block;
    }

    // Longer fence when the file itself contains backtick runs
    let fence = "`".repeat(longest_backtick_run(content).max(2) + 1);
    block.push_str(&format!("{}{}\n", fence, code_fence_language(extension)));
    block.push_str(content);
    block.push_str(&format!("\n{}\n", fence));
    block
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// Merge every matching file below `source_dir` through `writer`.
///
/// Unreadable files are logged and counted, the merge continues.
pub fn merge_tree(source_dir: &Path, mut writer: MarkdownWriter) -> Result<MergeSummary> {
    let files = discover_merge_files(source_dir);
    info!("Found {} files to merge", files.len());

    let mut summary = MergeSummary::default();
    for path in files {
        let Some(extension) = merge_extension(&path) else {
            continue;
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                summary.failed += 1;
                continue;
            }
        };

        let relative = relative_display(&path, source_dir);
        writer.write(&render_merged_file(&relative, &extension, &content))?;
        summary.merged += 1;
    }

    summary.output_files = writer.close()?;
    info!("Merge complete: {} files ({} failed)", summary.merged, summary.failed);
    Ok(summary)
}
