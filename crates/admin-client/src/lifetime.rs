use std::future::Future;
use std::sync::Arc;

use futures::future::{self, Either};
use tokio::sync::watch;

/// Cancellation handle tied to the lifetime of a view.
///
/// Work started through [`ViewLifetime::run`] yields `None` once the view has
/// ended, so a late response never reaches a view that is gone.
#[derive(Clone, Debug)]
pub struct ViewLifetime {
    ended: Arc<watch::Sender<bool>>,
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLifetime {
    pub fn new() -> Self {
        let (ended, _) = watch::channel(false);
        Self {
            ended: Arc::new(ended),
        }
    }

    pub fn end(&self) {
        self.ended.send_replace(true);
    }

    pub fn is_alive(&self) -> bool {
        !*self.ended.borrow()
    }

    /// Drives `work` until it completes or the lifetime ends, whichever is first.
    pub async fn run<F: Future>(&self, work: F) -> Option<F::Output> {
        if !self.is_alive() {
            return None;
        }

        let mut endedRx = self.ended.subscribe();
        let ended = Box::pin(async move {
            let _ = endedRx.wait_for(|ended| *ended).await;
        });

        match future::select(Box::pin(work), ended).await {
            Either::Left((output, _)) if self.is_alive() => Some(output),
            _ => None,
        }
    }
}
