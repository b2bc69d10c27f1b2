use alloc::sync::Arc;
use core::fmt;

/// The sink that invariant failures are sent to before they are escalated.
/// Each `TreeMap` owns its own `Reporter`, so tests can capture messages
/// without any global state.
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use bulk_tree::{Reporter, TreeMap};
///
/// let log = Arc::new(Mutex::new(Vec::<String>::new()));
/// let sink = log.clone();
/// let mut map: TreeMap<u32, u32> = TreeMap::new();
/// map.set_reporter(Reporter::new(move |s| sink.lock().unwrap().push(s.to_owned())));
/// map.insert(1, 1);
/// assert!(map.check_invariants().is_ok());
/// assert!(log.lock().unwrap().is_empty());
/// ```
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn Fn(&str) + Send + Sync>,
}

impl Reporter {
    pub fn new<F: Fn(&str) + Send + Sync + 'static>(sink: F) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Sends `msg` to the sink
    pub fn report(&self, msg: &str) {
        (self.sink)(msg)
    }
}

/// Forwards to `log::error!`
impl Default for Reporter {
    fn default() -> Self {
        Self::new(|msg| log::error!("invariant error: {msg}"))
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reporter")
    }
}
