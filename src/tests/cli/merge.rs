/// Tests for merging a samples tree into fenced Markdown
use crate::cli::markdown::MarkdownWriter;
use crate::cli::merge::{
    code_fence_language, discover_merge_files, merge_tree, relative_display, render_merged_file,
};
use crate::tests::helpers::{unique_temp_dir, write_source};
use std::fs;
use std::path::Path;

#[test]
fn test_fence_languages() {
    assert_eq!(code_fence_language("java"), "java");
    assert_eq!(code_fence_language("kts"), "kotlin");
    assert_eq!(code_fence_language("groovy"), "groovy");
    assert_eq!(code_fence_language("xml"), "xml");
    assert_eq!(code_fence_language("txt"), "");
}

#[test]
fn test_render_code_and_markdown_blocks() {
    assert_eq!(
        render_merged_file("src/Main.java", "java", "class Main {}"),
        "\n# src/Main.java\n```java\nclass Main {}\n```\n"
    );
    assert_eq!(
        render_merged_file("README.md", "md", "# Sample\nText"),
        "\n# README.md\n# Sample\nText\n"
    );
}

#[test]
fn test_render_widens_fence_around_backticks() {
    let block = render_merged_file("build.gradle.kts", "kts", "val s = \"```\"");
    assert!(block.contains("\n````kotlin\nval s = \"```\"\n````\n"));
}

#[test]
fn test_discover_filters_extensions_case_insensitively() {
    let dir = unique_temp_dir("merge_discover");
    write_source(dir.path(), "a/README.MD", "# a");
    write_source(dir.path(), "a/Action.java", "class Action {}");
    write_source(dir.path(), "build.gradle.kts", "plugins {}");
    write_source(dir.path(), "a/plugin.xml", "<idea-plugin/>");
    write_source(dir.path(), "a/Other.kt", "class Other");
    write_source(dir.path(), "a/image.png", "png");

    let files: Vec<String> = discover_merge_files(dir.path())
        .iter()
        .map(|f| relative_display(f, dir.path()))
        .collect();
    assert_eq!(
        files,
        vec!["a/Action.java", "a/README.MD", "a/plugin.xml", "build.gradle.kts"]
    );
}

#[test]
fn test_relative_display_uses_forward_slashes() {
    let root = Path::new("/samples");
    assert_eq!(
        relative_display(&root.join("tree").join("Tool.groovy"), root),
        "tree/Tool.groovy"
    );
}

#[test]
fn test_merge_tree_writes_every_file_and_skips_unreadable() {
    let source = unique_temp_dir("merge_source");
    let output = unique_temp_dir("merge_output");
    write_source(source.path(), "docs/intro.md", "Read me");
    write_source(source.path(), "src/Action.java", "class Action {}");
    fs::write(source.path().join("broken.xml"), [0xff, 0xfe, 0xfd]).unwrap();

    let writer = MarkdownWriter::new(output.path(), "samples", 1000, "").unwrap();
    let summary = merge_tree(source.path(), writer).unwrap();

    assert_eq!(summary.merged, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.output_files, vec![output.path().join("samples-1.md")]);
    assert_eq!(
        fs::read_to_string(&summary.output_files[0]).unwrap(),
        "\n# docs/intro.md\nRead me\n\n# src/Action.java\n```java\nclass Action {}\n```\n"
    );
}

#[test]
fn test_merge_rotation_keeps_fences_whole() {
    let source = unique_temp_dir("merge_rotation_source");
    let output = unique_temp_dir("merge_rotation_output");
    for i in 0..4 {
        write_source(
            source.path(),
            &format!("Sample{}.java", i),
            &format!("class Sample{} {{\n    void run() {{}}\n}}", i),
        );
    }

    // Each block is 7 lines, so two blocks never share a 10 line file
    let writer = MarkdownWriter::new(output.path(), "samples", 10, "").unwrap();
    let summary = merge_tree(source.path(), writer).unwrap();

    assert_eq!(summary.output_files.len(), 4);
    for file in &summary.output_files {
        let text = fs::read_to_string(file).unwrap();
        assert_eq!(text.matches("```").count(), 2, "unbalanced fence in {}", text);
    }
}
