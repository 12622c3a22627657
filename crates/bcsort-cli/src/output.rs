//! Output formatting module

use bcsort_app::app::{ClassificationSummary, DemoResult};

pub fn print_summary(summary: &ClassificationSummary) {
    println!("\nClassification Summary");
    println!("======================");
    println!("Records:         {}", summary.records);
    if summary.rejected_records > 0 {
        println!("Rejected:        {}", summary.rejected_records);
    }
    println!("Already known:   {}", summary.known_records);
    println!("Auto minibus:    {}", summary.minibus_records);
    println!(
        "Judged:          {} of {} plates{}",
        summary.judged,
        summary.queued_plates,
        if summary.cancelled { " (stopped early)" } else { "" }
    );
    if let Some(stored) = summary.stored {
        println!("Store updated:   {} entries", stored);
    }
    println!("Output:          {}", summary.output_path.display());
}

pub fn print_demo_result(result: &DemoResult) {
    println!();
    for (plate, code) in result {
        println!("{}: {}", plate, code);
    }
}
