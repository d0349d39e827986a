//! Run summary formatting

use crate::services::RunSummary;

/// Format the end-of-run summary
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut output = format!("Statement {}:\n", summary.partition);

    output.push_str(&format!("  Export transactions:   {}\n", summary.parsed));
    output.push_str(&format!("  Already recorded:      {}\n", summary.skipped));
    output.push_str(&format!("  Allocated and written: {}\n", summary.allocated));
    if summary.abandoned > 0 {
        output.push_str(&format!("  Left unallocated:      {}\n", summary.abandoned));
    }
    output.push_str(&format!("  Cells updated:         {}\n", summary.cells_written));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let summary = RunSummary {
            partition: "20241126".into(),
            parsed: 5,
            recorded: 2,
            skipped: 2,
            allocated: 2,
            abandoned: 1,
            cells_written: 18,
        };

        let output = format_run_summary(&summary);
        assert!(output.starts_with("Statement 20241126:"));
        assert!(output.contains("Allocated and written: 2"));
        assert!(output.contains("Left unallocated:      1"));
        assert!(output.contains("Cells updated:         18"));
    }

    #[test]
    fn test_complete_run_omits_unallocated() {
        let output = format_run_summary(&RunSummary::default());
        assert!(!output.contains("Left unallocated"));
    }
}
