use std::sync::atomic::{AtomicUsize, Ordering};

/// Sequential ID source for one design run.
///
/// Produces `H-1, H-2, …` for heads, `Z-…` for zones and `P-…` for pipes.
/// A fresh generator is created per run, so IDs restart at 1 and are only
/// meaningful inside the design that produced them.
#[derive(Debug, Default)]
pub struct IdGenerator {
    heads: AtomicUsize,
    zones: AtomicUsize,
    pipes: AtomicUsize,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(counter: &AtomicUsize, prefix: &str) -> String {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", prefix, n)
    }

    pub fn next_head_id(&self) -> String {
        Self::next(&self.heads, "H")
    }

    pub fn next_zone_id(&self) -> String {
        Self::next(&self.zones, "Z")
    }

    pub fn next_pipe_id(&self) -> String {
        Self::next(&self.pipes, "P")
    }
}
