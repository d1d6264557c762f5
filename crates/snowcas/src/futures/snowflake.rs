use core::{future::Future, time::Duration};

use super::SleepProvider;
use crate::{
    generator::{IdGenStatus, SnowflakeGenerator},
    time::TimeSource,
};

/// Extension trait for generating Snowflake IDs without blocking a thread.
///
/// Where [`SnowflakeGenerator::next_id`] spins while the sequence is
/// exhausted, the future returned here sleeps through the provider for the
/// time reported by [`SnowflakeGenerator::poll_id`]. Lost compare-and-swap
/// races are retried without sleeping.
pub trait SnowflakeGeneratorAsyncExt {
    /// Returns a future that resolves to the next available ID.
    fn next_id_async<S>(&self) -> impl Future<Output = i64> + Send
    where
        S: SleepProvider;
}

impl<T> SnowflakeGeneratorAsyncExt for SnowflakeGenerator<T>
where
    T: TimeSource + Sync,
{
    fn next_id_async<S>(&self) -> impl Future<Output = i64> + Send
    where
        S: SleepProvider,
    {
        async {
            loop {
                match self.poll_id() {
                    IdGenStatus::Ready { id } => return id,
                    IdGenStatus::Pending { yield_for: 0 } => {}
                    IdGenStatus::Pending { yield_for } => {
                        let millis = u64::try_from(yield_for).unwrap_or(1);
                        S::sleep_for(Duration::from_millis(millis)).await;
                    }
                }
            }
        }
    }
}
