// Classmap's Test Infrastructure
//
// Extractor tests run on inline sources and on the files under fixtures/;
// CLI tests cover Markdown rendering, output formats and directory runs.



// ============================================================================
// CLI TESTS - Markdown writer, output formats, directory processing
// ============================================================================
pub mod cli {
    pub mod markdown; // Rendering and file rotation
    pub mod merge; // Samples tree merge into fenced Markdown
    pub mod output; // JSON and Markdown single-file output
    pub mod parallel; // Discovery and the parallel run
    pub mod progress; // Milestone reporting
}
