// Output format tests
//
// Single-file output in both formats, written to a temp file so the
// rendered text can be checked.

use crate::cli::output::{OutputFormat, OutputWriter};
use crate::extractors::base::{ClassInfo, Member};
use crate::tests::helpers::unique_temp_dir;
use std::fs;

fn sample_classes() -> Vec<ClassInfo> {
    let mut class = ClassInfo::new("Greeter", Some("Says hello".to_string()));
    class.methods.push(Member::new("greet", None));
    vec![class]
}

#[test]
fn test_json_output() {
    let dir = unique_temp_dir("output_json");
    let path = dir.path().join("out.json");

    let file = fs::File::create(&path).unwrap();
    let mut writer = OutputWriter::with_writer(OutputFormat::Json, Box::new(file));
    writer.write_outline("Greeter.java", &sample_classes()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let parsed: Vec<ClassInfo> = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, sample_classes());
}

#[test]
fn test_markdown_output_matches_rendered_block() {
    let dir = unique_temp_dir("output_markdown");
    let path = dir.path().join("out.md");

    let file = fs::File::create(&path).unwrap();
    let mut writer = OutputWriter::with_writer(OutputFormat::Markdown, Box::new(file));
    writer.write_outline("Greeter.java", &sample_classes()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("\n## Greeter.java\n\n### Class: Greeter\n\n"));
    assert!(written.contains("| greet | No Comment |"));
}
