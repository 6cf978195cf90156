/// ProgressReporter port for user feedback during a run
///
/// All diagnostics go through this port (to stderr in the CLI) so that
/// stdout only ever carries the formatted review.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);

    /// Marks the start of a long-running task (e.g. a network fetch)
    fn begin_task(&self, _message: &str) {}

    /// Marks the end of the task started with `begin_task`
    fn end_task(&self) {}
}
