use core::{future::Future, time::Duration};

use crate::futures::SleepProvider;

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(dur)
    }
}

/// An implementation of [`SleepProvider`] using Tokio's yield.
///
/// Yields to the scheduler instead of arming a timer. More responsive at low
/// concurrency, but polls the clock far more often under load than
/// [`TokioSleep`].
pub struct TokioYield;
impl SleepProvider for TokioYield {
    fn sleep_for(_dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use futures::future::join_all;

    use super::*;
    use crate::{
        ManualClock, MonotonicClock, SnowflakeGenerator, TimeSource,
        futures::SnowflakeGeneratorAsyncExt,
    };

    const TASKS: usize = 8;
    const IDS_PER_TASK: usize = 4096 * 2;

    async fn many_unique_ids<S, T>(generator: Arc<SnowflakeGenerator<T>>)
    where
        S: SleepProvider + 'static,
        T: TimeSource + Send + Sync + 'static,
    {
        let tasks = (0..TASKS).map(|_| {
            let generator = Arc::clone(&generator);
            tokio::spawn(async move {
                let mut ids = Vec::with_capacity(IDS_PER_TASK);
                for _ in 0..IDS_PER_TASK {
                    ids.push(generator.next_id_async::<S>().await);
                }
                ids
            })
        });

        let mut seen = HashSet::with_capacity(TASKS * IDS_PER_TASK);
        for ids in join_all(tasks).await {
            for id in ids.unwrap() {
                assert_eq!(generator.extract_node_id(id), generator.node_id());
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), TASKS * IDS_PER_TASK);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn generates_many_unique_ids_sleep() {
        let generator = SnowflakeGenerator::with_node_id(3, 0, MonotonicClock::new()).unwrap();
        many_unique_ids::<TokioSleep, _>(Arc::new(generator)).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn generates_many_unique_ids_yield() {
        let generator = SnowflakeGenerator::with_node_id(4, 0, MonotonicClock::new()).unwrap();
        many_unique_ids::<TokioYield, _>(Arc::new(generator)).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn sleeps_until_clock_advances() {
        let clock = ManualClock::new(100);
        let generator = Arc::new(SnowflakeGenerator::new(0, 1, 0, 0, clock.clone()).unwrap());

        assert_eq!(generator.next_id_async::<TokioSleep>().await, 100 << 1);
        assert_eq!(generator.next_id_async::<TokioSleep>().await, (100 << 1) | 1);

        let waiter = {
            let generator = Arc::clone(&generator);
            tokio::spawn(async move { generator.next_id_async::<TokioSleep>().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        clock.advance(1);
        let id = waiter.await.unwrap();
        assert_eq!(generator.extract_timestamp(id), 101);
        assert_eq!(generator.extract_sequence(id), 0);
    }
}
