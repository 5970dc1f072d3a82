use std::{collections::HashMap, time::Duration};

use tokio::sync::Mutex;

/// Latest-call-wins gate for keyed requests.
///
/// Each call to [`Debouncer::settle`] waits the window and reports whether it
/// is still the most recent call for its key.
pub struct Debouncer {
    window: Duration,
    generations: Mutex<HashMap<String, u64>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generations: Mutex::new(HashMap::new()),
        }
    }

    pub async fn settle(&self, key: &str) -> bool {
        let generation = {
            let mut generations = self.generations.lock().await;
            let entry = generations.entry(key.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        if !self.window.is_zero() {
            tokio::time::sleep(self.window).await;
        }

        let mut generations = self.generations.lock().await;
        let latest = generations.get(key) == Some(&generation);
        if latest {
            generations.remove(key);
        }
        latest
    }
}
