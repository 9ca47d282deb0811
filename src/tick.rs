/// A timer that interrupts once per second while armed.
///
/// The interrupt handler calls [`TickSource::acknowledge`] first so that the next period is
/// measured from the previous deadline rather than from when the handler happened to run.
pub trait TickSource {
    /// Start ticking, with the first tick one full period from now
    fn arm(&mut self);

    /// Stop ticking and discard any pending tick
    fn disarm(&mut self);

    /// Clear the current tick and schedule the next one
    fn acknowledge(&mut self);
}
