use dioxus::core::Task;
use dioxus::prelude::*;
use std::future::Future;
use std::time::Duration;

/// Handle of the most recent job. Ids tell a finishing job whether the
/// slot still belongs to it.
#[derive(Debug)]
struct LatestSlot<T> {
    next_id: u64,
    current: Option<(u64, T)>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            current: None,
        }
    }
}

impl<T> LatestSlot<T> {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn set(&mut self, id: u64, handle: T) {
        self.current = Some((id, handle));
    }

    fn take(&mut self) -> Option<T> {
        self.current.take().map(|(_, handle)| handle)
    }

    /// Clear the slot if job `id` still owns it.
    fn finish(&mut self, id: u64) -> bool {
        match self.current {
            Some((current, _)) if current == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

/// Runs only the most recently scheduled job, once `delay` has passed
/// without another one being scheduled.
#[derive(Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
    pending: CopyValue<LatestSlot<Task>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: CopyValue::new(LatestSlot::default()),
        }
    }

    pub fn schedule(&self, job: impl Future<Output = ()> + 'static) {
        self.cancel();

        let delay = self.delay;
        let mut pending = self.pending;
        let id = pending.write().next_id();
        let task = spawn(async move {
            gloo_timers::future::sleep(delay).await;
            job.await;
            pending.write().finish(id);
        });
        pending.write().set(id, task);
    }

    /// Drop the pending job, including one already past its delay and still running.
    pub fn cancel(&self) {
        let mut pending = self.pending;
        let task = pending.write().take();
        if let Some(task) = task {
            task.cancel();
        }
    }
}

pub fn use_debouncer(delay: Duration) -> Debouncer {
    use_hook(|| Debouncer::new(delay))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_job_stays_cancellable() {
        let mut slot = LatestSlot::default();
        let id = slot.next_id();
        slot.set(id, "lookup re");

        // Past its delay and awaiting its fetch, the job is still held
        assert_eq!(slot.take(), Some("lookup re"));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_superseded_job_does_not_clear_newer_one() {
        let mut slot = LatestSlot::default();
        let first = slot.next_id();
        slot.set(first, "lookup re");

        let second = slot.next_id();
        assert_ne!(first, second);
        slot.set(second, "lookup rea");

        assert!(!slot.finish(first));
        assert!(slot.finish(second));
        assert_eq!(slot.take(), None);
    }
}
