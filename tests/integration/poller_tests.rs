//! Pull-based polling against a scripted queue

#[cfg(test)]
mod tests {
    use crate::common::{
        FakeBilling, FakeDirectory, FakeQueue, FakeStore, FakeWorld, MessageFactory, fast_settings,
    };
    use customer_onboarding::core::pipeline::{OnboardingPipeline, PollOptions, PollStats, poll};
    use std::time::Duration;

    fn options(max_polls: usize) -> PollOptions {
        PollOptions {
            max_messages: 10,
            wait: Duration::from_millis(1),
            max_polls: Some(max_polls),
        }
    }

    #[tokio::test]
    async fn test_poll_processes_each_batch() {
        let inbox = vec![MessageFactory::batch(3), Vec::new(), vec![MessageFactory::customer(4)]];
        let world = FakeWorld::new(
            FakeBilling::default(),
            FakeStore::default(),
            FakeDirectory::default(),
            FakeQueue::with_inbox(inbox),
        );
        let pipeline = OnboardingPipeline::new(world.clients(), fast_settings());

        let stats = poll(&pipeline, world.queue.as_ref(), &options(4)).await.unwrap();

        assert_eq!(
            stats,
            PollStats {
                polls: 4,
                batches: 2,
                messages: 4,
                aborted_runs: 0,
            }
        );
        assert_eq!(
            world.queue.acknowledged_ids(),
            vec!["msg-1", "msg-2", "msg-3", "msg-4"]
        );
    }

    #[tokio::test]
    async fn test_aborted_run_does_not_stop_polling() {
        let inbox = vec![
            vec![MessageFactory::malformed(1)],
            vec![MessageFactory::customer(2)],
        ];
        let world = FakeWorld::new(
            FakeBilling::default(),
            FakeStore::default(),
            FakeDirectory::default(),
            FakeQueue::with_inbox(inbox),
        );
        let pipeline = OnboardingPipeline::new(world.clients(), fast_settings());

        let stats = poll(&pipeline, world.queue.as_ref(), &options(2)).await.unwrap();

        assert_eq!(stats.aborted_runs, 1);
        assert_eq!(stats.batches, 2);
        assert_eq!(world.queue.acknowledged_ids(), vec!["msg-2"]);
    }

    #[tokio::test]
    async fn test_receive_size_is_capped() {
        let world = FakeWorld::new(
            FakeBilling::default(),
            FakeStore::default(),
            FakeDirectory::default(),
            FakeQueue::with_inbox(vec![MessageFactory::batch(15)]),
        );
        let pipeline = OnboardingPipeline::new(world.clients(), fast_settings());
        let options = PollOptions {
            max_messages: 50,
            ..options(1)
        };

        let stats = poll(&pipeline, world.queue.as_ref(), &options).await.unwrap();

        assert_eq!(stats.messages, 10);
    }
}
