/// Progress reporter tests
///
/// Milestones advance per tenth of a percent and each is reported once.
use crate::cli::ProgressReporter;

#[test]
fn test_progress_reports_each_milestone_once() {
    let mut reporter = ProgressReporter::new(2000);

    assert!(reporter.report(1));
    assert!(!reporter.report(1));
    assert!(reporter.report(2));
    // 3/2000 is still the 0.1% milestone
    assert!(!reporter.report(3));
    assert!(reporter.report(2000));
    assert!(!reporter.report(2000));
}

#[test]
fn test_progress_milestones() {
    let reporter = ProgressReporter::new(400);

    assert_eq!(reporter.milestone(0), 0);
    assert_eq!(reporter.milestone(1), 2);
    assert_eq!(reporter.milestone(200), 500);
    // Overshoot is clamped to completion
    assert_eq!(reporter.milestone(500), 1000);
}

#[test]
fn test_progress_with_no_files() {
    let mut reporter = ProgressReporter::new(0);
    assert_eq!(reporter.milestone(0), 1000);
    assert!(reporter.report(0));
    reporter.complete(0, 0);
}
