/// Markdown rendering for class outlines
///
/// Each source file becomes one block (`## class.path` followed by a table per
/// member section). Blocks are appended to `<base>-N.md` files that rotate once
/// the next block would push the current file past its line budget.
use crate::error::{ClassmapError, Result};
use crate::extractors::base::{ClassInfo, Member};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Render one file's outline as a Markdown block
pub fn render_class_info(class_path: &str, classes: &[ClassInfo]) -> String {
    let mut content = format!("\n## {}\n\n", class_path);

    for class_data in classes {
        content.push_str(&format!("### Class: {}\n\n", class_data.name));

        if let Some(comment) = &class_data.comment {
            content.push_str(&format!("> {}\n\n", single_line(comment)));
        }

        render_table(&mut content, "Constant", &class_data.constants);
        render_table(&mut content, "Method", &class_data.methods);
        render_table(&mut content, "Property", &class_data.properties);
        render_table(&mut content, "Companion Object", &class_data.companion_objects);
        render_table(&mut content, "Enum Value", &class_data.enum_values);
    }

    content
}

fn render_table(content: &mut String, title: &str, members: &[Member]) {
    if members.is_empty() {
        return;
    }

    content.push_str(&format!("| {} | Comment |\n", title));
    content.push_str(&format!("|{}|---------|\n", "-".repeat(title.len() + 2)));
    for member in members {
        content.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&member.name),
            escape_cell(member.comment_or_placeholder())
        ));
    }
    content.push('\n');
}

fn single_line(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

fn count_lines(text: &str) -> usize {
    text.matches('\n').count()
}

/// Size-bounded Markdown file writer
pub struct MarkdownWriter {
    output_dir: PathBuf,
    base_name: String,
    max_lines: usize,
    intro: String,
    current_file: Option<BufWriter<File>>,
    current_path: PathBuf,
    current_lines: usize,
    intro_lines: usize,
    file_counter: usize,
    written_files: Vec<PathBuf>,
}

impl MarkdownWriter {
    /// Create the output directory and open `<base_name>-1.md`
    ///
    /// A zero line budget is rejected.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
        max_lines: usize,
        intro: impl Into<String>,
    ) -> Result<Self> {
        if max_lines == 0 {
            return Err(ClassmapError::InvalidConfig(
                "max_lines must be greater than zero".to_string(),
            ));
        }
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        let mut intro: String = intro.into();
        if !intro.is_empty() {
            intro.push_str("\n\n");
        }
        let intro_lines = count_lines(&intro);

        let mut writer = Self {
            output_dir,
            base_name: base_name.into(),
            max_lines,
            intro,
            current_file: None,
            current_path: PathBuf::new(),
            current_lines: 0,
            intro_lines,
            file_counter: 1,
            written_files: Vec::new(),
        };
        writer.open_new_file()?;
        Ok(writer)
    }

    /// Render and append the outline of one source file
    pub fn write_class_info(&mut self, class_path: &str, classes: &[ClassInfo]) -> Result<()> {
        self.write(&render_class_info(class_path, classes))
    }

    /// Append a block, rotating first if it would overflow the current file.
    ///
    /// Blocks are never split; a block larger than the budget gets a file of its own.
    pub fn write(&mut self, content: &str) -> Result<()> {
        let block_lines = count_lines(content);
        let has_content = self.current_lines > self.intro_lines;

        if has_content && self.current_lines + block_lines >= self.max_lines {
            self.open_new_file()?;
        }

        if let Some(file) = self.current_file.as_mut() {
            file.write_all(content.as_bytes())?;
        }
        self.current_lines += block_lines;
        Ok(())
    }

    /// Path of the file currently being written
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Flush the last file and return every file written, in order
    pub fn close(mut self) -> Result<Vec<PathBuf>> {
        self.finish_current_file()?;
        Ok(std::mem::take(&mut self.written_files))
    }

    fn open_new_file(&mut self) -> Result<()> {
        self.finish_current_file()?;

        let filename = format!("{}-{}.md", self.base_name, self.file_counter);
        let filepath = self.output_dir.join(filename);
        let mut file = BufWriter::new(File::create(&filepath)?);

        // Write introduction in each file
        file.write_all(self.intro.as_bytes())?;

        self.current_file = Some(file);
        self.current_path = filepath.clone();
        self.current_lines = self.intro_lines;
        self.file_counter += 1;
        self.written_files.push(filepath);
        Ok(())
    }

    fn finish_current_file(&mut self) -> Result<()> {
        if let Some(mut file) = self.current_file.take() {
            file.flush()?;
            info!(
                "Completed writing {} with {} lines",
                self.current_path.display(),
                self.current_lines
            );
        }
        Ok(())
    }
}
