//! Per-step and per-run simulation metrics.

/// Counters and timing collected during a single step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the step, in microseconds.
    pub total_us: u64,
    /// Particles in `Removing` state erased this step.
    pub erased: usize,
    /// Active particles that wrapped this step.
    pub wrapped: usize,
    /// Migrated copies spliced back in at the end of the step.
    pub reinserted: usize,
    /// Whether the pool was compacted at the end of the step.
    pub compacted: bool,
    /// Tombstoned slots reclaimed by that compaction.
    pub slots_reclaimed: usize,
    /// Live elements in the pool after the step.
    pub live: usize,
    /// Chunks held by the pool after the step.
    pub chunk_count: usize,
}

/// Totals across a [`Simulation::run`](crate::Simulation::run).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Steps performed.
    pub steps: u64,
    /// Wall-clock time for the run, in microseconds.
    pub total_us: u64,
    /// Sum of [`StepMetrics::erased`].
    pub erased: u64,
    /// Sum of [`StepMetrics::wrapped`].
    pub wrapped: u64,
    /// Number of compacted steps.
    pub compactions: u64,
    /// Largest chunk count seen after any step.
    pub peak_chunks: usize,
    /// Live elements after the final step.
    pub final_live: usize,
}

impl RunMetrics {
    /// Fold one step into the totals.
    pub fn record(&mut self, step: &StepMetrics) {
        self.steps += 1;
        self.erased += step.erased as u64;
        self.wrapped += step.wrapped as u64;
        if step.compacted {
            self.compactions += 1;
        }
        self.peak_chunks = self.peak_chunks.max(step.chunk_count);
        self.final_live = step.live;
    }

    /// Run time in whole milliseconds.
    pub fn runtime_ms(&self) -> u64 {
        self.total_us / 1_000
    }
}
