use core::{future::Future, time::Duration};

/// Abstracts over how an async caller waits for the clock to advance.
///
/// This allows async generation to be generic over runtimes.
pub trait SleepProvider {
    /// Returned future must be `Send` so the generating task can move across
    /// threads.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
