/// Receives progress and status updates from long-running work.
///
/// Returning `ProgressSignal::Cancel` asks the caller to stop; `Failed` is
/// logged and otherwise ignored.
pub trait ProgressReporter {
    fn report(&mut self, percent: f32, message: &str) -> Result<(), ProgressSignal>;
}

impl<F> ProgressReporter for F
where
    F: FnMut(f32, &str) -> Result<(), ProgressSignal>,
{
    fn report(&mut self, percent: f32, message: &str) -> Result<(), ProgressSignal> {
        self(percent, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressSignal {
    #[error("cancelled by progress callback")]
    Cancel,
    #[error("progress callback failed: {0}")]
    Failed(String),
}
