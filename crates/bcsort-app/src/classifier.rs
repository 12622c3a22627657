//! Human-in-the-loop classification of queued plates

use std::io::Write;

use bcsort_domain::model::DecisionMap;
use bcsort_domain::service::{PlateQueue, QueuedPlate};
use bcsort_types::{BcCode, Result};

use crate::browser::{search_url, Browser};
use crate::keys::{KeyPress, KeySource};

const PROMPT: &str = "Bus(B), Coach (C), Minibus(M), Other(O) or Unknown(U)? ";
const EXIT_HINT: &str = "Use 'X' to exit programme.";
const EXIT_KEY: char = 'X';

/// Result of one pass over the queue
#[derive(Debug, Clone, Default)]
pub struct ClassifierOutcome {
    /// Every queued plate; plates not reached stay `Unjudged`
    pub decisions: DecisionMap,
    /// Plates the operator decided
    pub judged: usize,
    /// The operator stopped before the end of the queue
    pub cancelled: bool,
}

/// Where the loop stands for the current plate
enum Step {
    AwaitingInput { details_shown: bool },
    Decided(BcCode),
    Cancelled,
}

pub struct Classifier<'a> {
    keys: &'a mut dyn KeySource,
    browser: &'a mut dyn Browser,
    out: &'a mut dyn Write,
    search_url: String,
    help_interval: usize,
    show_details: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(
        keys: &'a mut dyn KeySource,
        browser: &'a mut dyn Browser,
        out: &'a mut dyn Write,
        search_url: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            browser,
            out,
            search_url: search_url.into(),
            help_interval: 10,
            show_details: false,
        }
    }

    /// Print the exit hint every `interval` plates (0 = never)
    pub fn with_help_interval(mut self, interval: usize) -> Self {
        self.help_interval = interval;
        self
    }

    /// Offer vehicle details when the operator answers Unknown
    pub fn with_details(mut self, show_details: bool) -> Self {
        self.show_details = show_details;
        self
    }

    /// Ask the operator about each plate in `queue`, in order
    pub fn run(&mut self, queue: &PlateQueue) -> Result<ClassifierOutcome> {
        let mut outcome = ClassifierOutcome {
            decisions: queue
                .plates()
                .map(|plate| (plate.to_string(), BcCode::Unjudged))
                .collect(),
            ..Default::default()
        };
        let total = queue.len();

        for (position, entry) in queue.entries().iter().enumerate() {
            if self.help_interval > 0 && position % self.help_interval == 0 {
                writeln!(self.out, "{}", EXIT_HINT)?;
            }

            let url = search_url(&self.search_url, &entry.plate);
            if let Err(e) = self.browser.show(&url) {
                tracing::warn!(plate = %entry.plate, "{}", e);
                writeln!(self.out, "Could not open browser, search manually: {}", url)?;
            }

            match self.judge(position, total, entry)? {
                Some(code) => {
                    writeln!(self.out, "{}", code.label())?;
                    outcome.decisions.insert(entry.plate.clone(), code);
                    outcome.judged += 1;
                }
                None => {
                    writeln!(self.out, "Cancelled")?;
                    outcome.cancelled = true;
                    break;
                }
            }
        }

        tracing::debug!(
            judged = outcome.judged,
            cancelled = outcome.cancelled,
            "classification pass finished"
        );
        Ok(outcome)
    }

    /// Prompt until the plate is decided. `None` means the operator exited.
    fn judge(&mut self, position: usize, total: usize, entry: &QueuedPlate) -> Result<Option<BcCode>> {
        let mut step = Step::AwaitingInput { details_shown: false };

        while let Step::AwaitingInput { details_shown } = step {
            write!(
                self.out,
                "{} of {} - {:>8} ({} occurrences): {}",
                position + 1,
                total,
                entry.plate,
                entry.occurrences,
                PROMPT
            )?;
            self.out.flush()?;

            step = match self.keys.read_key()? {
                KeyPress::Exit => Step::Cancelled,
                KeyPress::Char(c) if c.eq_ignore_ascii_case(&EXIT_KEY) => Step::Cancelled,
                KeyPress::Char(c) => match BcCode::from_key(c) {
                    Some(BcCode::Unknown) if self.show_details && !details_shown => {
                        writeln!(self.out, "Unknown")?;
                        writeln!(self.out, "Further Information:")?;
                        for line in entry.details.lines() {
                            writeln!(self.out, "{}", line)?;
                        }
                        Step::AwaitingInput { details_shown: true }
                    }
                    Some(code) => Step::Decided(code),
                    None => {
                        writeln!(self.out)?;
                        writeln!(self.out, "Input {} not understood.", c.to_ascii_uppercase())?;
                        Step::AwaitingInput { details_shown: false }
                    }
                },
            };
        }

        Ok(match step {
            Step::Decided(code) => Some(code),
            _ => None,
        })
    }
}
