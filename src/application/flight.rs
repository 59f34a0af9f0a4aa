// Pending-request map: concurrent misses for one key share a single computation
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

#[derive(Default)]
pub struct InFlight {
    pending: DashMap<String, Arc<OnceCell<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `compute` for `key` unless another caller is already running it,
    /// in which case wait for and share that caller's result.
    ///
    /// Errors are not shared: if the running caller fails or is dropped, one of
    /// the waiters takes over with its own `compute`.
    pub async fn run<F, Fut, E>(&self, key: &str, compute: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let cell = self
            .pending
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let result = cell.get_or_try_init(compute).await.cloned();

        // A later caller may already have installed a fresh cell for this key
        self.pending
            .remove_if(key, |_, current| Arc::ptr_eq(current, &cell));
        result
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
