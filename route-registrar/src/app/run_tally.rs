/// why the submission loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// every extracted record was attempted.
    Exhausted,
    /// `max_routes_to_create` successful creations were reached.
    LimitReached,
    /// a token could not be obtained; the remaining records were not attempted.
    TokenUnavailable,
}

/// counters for one registration run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunTally {
    /// records extracted from the CSV.
    pub available: usize,
    /// records that entered the submission stage.
    pub attempted: usize,
    pub created: usize,
    pub stop_reason: StopReason,
}

impl RunTally {
    pub fn empty() -> Self {
        Self {
            available: 0,
            attempted: 0,
            created: 0,
            stop_reason: StopReason::Exhausted,
        }
    }

    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!(
                "Total entries processed: {} (out of {} available).",
                self.attempted, self.available
            ),
            format!("Total routes successfully created: {}.", self.created),
        ]
    }
}
