//! Progress reporting and cooperative cancellation.

/// Trait for hosts that want incremental progress out of a batch run.
/// Returning true from `report` requests cancellation; the pipeline checks
/// once per clip and still runs its persistence step after an early exit.
pub trait ProgressSink {
    fn report(&mut self, stage: &str, detail: &str, fraction: f32) -> bool;
}

/// Sink that ignores progress and never cancels.
#[derive(Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _stage: &str, _detail: &str, _fraction: f32) -> bool {
        false
    }
}
