//! Built-in plate list for trying the classifier without an input file

use bcsort_domain::service::PlateQueue;

/// Input argument that selects the demo instead of a file
pub const DEMO_INPUT: &str = "TEST";

pub const DEMO_PLATES: [&str; 18] = [
    "SK07CAA", "SK07CAE", "SK07CAO", "SK07CAU", "SK07CAV", "SK07CAX", "SK07CBF", "SK07CBU",
    "SK07CBV", "SK07CBX", "SK07CBY", "SK07CCA", "SK07CAA", "SK07CAE", "SK07CAO", "SK07CAU",
    "SK07CAA", "SK07CAE",
];

pub fn is_demo_input(input: &str) -> bool {
    input == DEMO_INPUT
}

/// Queue of the demo plates, repeats folded into occurrence counts
pub fn demo_queue() -> PlateQueue {
    PlateQueue::from_plates(DEMO_PLATES)
}
