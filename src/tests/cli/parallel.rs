/// Tests for directory discovery and the parallel processing run
use crate::cli::parallel::{DirectoryProcessor, discover_source_files, format_class_path, parse_file};
use crate::config::ProcessorConfig;
use crate::extractors::ExtractorManager;
use crate::tests::helpers::{unique_temp_dir, write_source};
use std::fs;
use std::path::{Path, PathBuf};

const JAVA_SOURCE: &str = r#"
package com.example;

// Greets people
public class Greeter {
    // Says hello
    public String greet(String name) { return "Hello " + name; }
}
"#;

const KOTLIN_SOURCE: &str = r#"
package com.example

/** Holds user data */
data class User(val id: Int, val name: String)
"#;

fn config_for(source: &Path, output: &Path, max_lines: usize) -> ProcessorConfig {
    ProcessorConfig {
        source_dir: source.to_path_buf(),
        base_name: "outline".to_string(),
        output_dir: output.to_path_buf(),
        max_lines,
        workers: 2,
        intro: "Intro".to_string(),
        ..Default::default()
    }
}

fn read_all(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|f| fs::read_to_string(f).unwrap())
        .collect::<Vec<_>>()
        .join("")
}

#[test]
fn test_discover_only_java_and_kotlin() {
    let dir = unique_temp_dir("discover");
    write_source(dir.path(), "src/A.java", "class A {}");
    write_source(dir.path(), "src/b/B.kt", "class B");
    write_source(dir.path(), "src/notes.md", "# notes");
    write_source(dir.path(), "build.gradle.kts", "plugins {}");

    let files = discover_source_files(dir.path());
    assert_eq!(
        files,
        vec![dir.path().join("src/A.java"), dir.path().join("src/b/B.kt")]
    );
}

#[test]
fn test_format_class_path_joins_components() {
    let root = Path::new("/work/src");
    assert_eq!(
        format_class_path(&root.join("com/foo/Bar.java"), root),
        "com.foo.Bar.java"
    );
    assert_eq!(format_class_path(&root.join("Top.kt"), root), "Top.kt");
}

#[test]
fn test_parse_file_captures_failures() {
    let dir = unique_temp_dir("parse_failure");
    let bad = dir.path().join("Broken.java");
    fs::write(&bad, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let mut manager = ExtractorManager::new();
    let outcome = parse_file(&mut manager, &bad, dir.path());

    assert_eq!(outcome.class_path, "Broken.java");
    assert!(outcome.result.is_err());
}

#[test]
fn test_run_writes_outline_for_every_class() {
    let source = unique_temp_dir("run_source");
    let output = unique_temp_dir("run_output");
    write_source(source.path(), "com/example/Greeter.java", JAVA_SOURCE);
    write_source(source.path(), "com/example/User.kt", KOTLIN_SOURCE);
    write_source(source.path(), "com/example/Empty.java", "package com.example;\n");

    let processor = DirectoryProcessor::new(config_for(source.path(), output.path(), 1000));
    let summary = processor.run().unwrap();

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.classes, 2);
    assert_eq!(summary.output_files, vec![output.path().join("outline-1.md")]);

    let markdown = read_all(&summary.output_files);
    assert!(markdown.starts_with("Intro\n\n"));
    assert!(markdown.contains("## com.example.Greeter.java"));
    assert!(markdown.contains("> Greets people"));
    assert!(markdown.contains("| greet | Says hello |"));
    assert!(markdown.contains("## com.example.User.kt"));
    assert!(markdown.contains("| name | No Comment |"));
    // Files without classes are skipped
    assert!(!markdown.contains("Empty.java"));
}

#[test]
fn test_run_counts_failures_and_keeps_going() {
    let source = unique_temp_dir("run_failure_source");
    let output = unique_temp_dir("run_failure_output");
    write_source(source.path(), "Greeter.java", JAVA_SOURCE);
    fs::write(source.path().join("Broken.kt"), [0xc3, 0x28, 0xff]).unwrap();

    let summary = DirectoryProcessor::new(config_for(source.path(), output.path(), 1000))
        .run()
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.classes, 1);
}

#[test]
fn test_run_rotates_output_files() {
    let source = unique_temp_dir("run_rotation_source");
    let output = unique_temp_dir("run_rotation_output");
    for i in 0..6 {
        write_source(
            source.path(),
            &format!("pkg/Class{}.java", i),
            &format!("class Class{} {{ void run() {{}} }}\n", i),
        );
    }

    // Each block is 9 lines; a 20 line budget fits one block per file
    let summary = DirectoryProcessor::new(config_for(source.path(), output.path(), 20))
        .run()
        .unwrap();

    assert_eq!(summary.classes, 6);
    assert_eq!(summary.output_files.len(), 6);
    let markdown = read_all(&summary.output_files);
    for i in 0..6 {
        assert!(markdown.contains(&format!("## pkg.Class{}.java", i)));
    }
}

#[test]
fn test_empty_directory_produces_intro_only_file() {
    let source = unique_temp_dir("run_empty_source");
    let output = unique_temp_dir("run_empty_output");

    let summary = DirectoryProcessor::new(config_for(source.path(), output.path(), 1000))
        .run()
        .unwrap();

    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.output_files.len(), 1);
    assert_eq!(
        fs::read_to_string(&summary.output_files[0]).unwrap(),
        "Intro\n\n"
    );
}

#[test]
fn test_run_rejects_zero_workers() {
    let source = unique_temp_dir("run_zero_workers_source");
    let output = unique_temp_dir("run_zero_workers_output");
    let config = ProcessorConfig {
        workers: 0,
        ..config_for(source.path(), output.path(), 1000)
    };

    let err = DirectoryProcessor::new(config).run().unwrap_err();
    assert!(matches!(err, crate::error::ClassmapError::InvalidConfig(_)));
}
