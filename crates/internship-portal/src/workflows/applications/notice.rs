use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Read side of the transient "application submitted" flag.
#[derive(Debug, Clone, Default)]
pub struct NoticeFlag(Arc<AtomicBool>);

impl NoticeFlag {
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, raised: bool) {
        self.0.store(raised, Ordering::Release);
    }
}

/// Pending task that lowers the flag after a delay. Aborted when dropped.
#[derive(Debug)]
pub struct ScheduledClear {
    task: JoinHandle<()>,
}

impl ScheduledClear {
    pub fn cancel(self) {
        // Drop aborts.
    }
}

impl Drop for ScheduledClear {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Success notice raised on submission and lowered again after `ttl`.
///
/// The pending clear lives as long as the notice, so dropping the owning form session
/// cancels it. Without a tokio runtime the flag stays raised until [`clear`] is called.
///
/// [`clear`]: SubmissionNotice::clear
#[derive(Debug)]
pub struct SubmissionNotice {
    flag: NoticeFlag,
    ttl: Duration,
    pending: Option<ScheduledClear>,
}

impl SubmissionNotice {
    pub fn new(ttl: Duration) -> Self {
        Self {
            flag: NoticeFlag::default(),
            ttl,
            pending: None,
        }
    }

    pub fn flag(&self) -> NoticeFlag {
        self.flag.clone()
    }

    pub fn is_raised(&self) -> bool {
        self.flag.is_raised()
    }

    pub fn raise(&mut self) {
        self.flag.set(true);
        self.pending = None;

        match Handle::try_current() {
            Ok(handle) => {
                let flag = self.flag.clone();
                let ttl = self.ttl;
                let task = handle.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    flag.set(false);
                    debug!("submission notice cleared");
                });
                self.pending = Some(ScheduledClear { task });
            }
            Err(_) => debug!("no runtime available; submission notice stays raised"),
        }
    }

    pub fn clear(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.flag.set(false);
    }

    /// Stop the pending clear without touching the flag.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn raised_notice_clears_after_ttl() {
        let mut notice = SubmissionNotice::new(Duration::from_secs(5));
        let observer = notice.flag();
        notice.raise();
        assert!(observer.is_raised());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(observer.is_raised());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!observer.is_raised());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_clear_leaves_flag_alone() {
        let mut notice = SubmissionNotice::new(Duration::from_secs(5));
        notice.raise();
        assert!(notice.cancel_pending());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(notice.is_raised());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_notice_aborts_the_timer() {
        let mut notice = SubmissionNotice::new(Duration::from_secs(5));
        let observer = notice.flag();
        notice.raise();
        drop(notice);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(observer.is_raised());
    }

    #[test]
    fn without_runtime_flag_waits_for_manual_clear() {
        let mut notice = SubmissionNotice::new(Duration::from_millis(1));
        notice.raise();
        assert!(notice.is_raised());
        notice.clear();
        assert!(!notice.is_raised());
    }
}
