//! Keyed, tagged registry of host output channels.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use extkit_api::{OutputChannel, Window};
use std::sync::Arc;

struct TaggedOutputChannel {
    channel: Arc<dyn OutputChannel>,
    tags: Vec<String>,
}

pub struct OutputManager {
    window: Arc<dyn Window>,
    outputs: DashMap<String, TaggedOutputChannel>,
}

impl OutputManager {
    pub fn new(window: Arc<dyn Window>) -> Self {
        Self {
            window,
            outputs: DashMap::new(),
        }
    }

    /// Returns the channel for `key`, creating it on first use.
    ///
    /// `tags` only apply when the channel is created.
    pub async fn get_output(&self, key: &str, tags: &[&str]) -> Arc<dyn OutputChannel> {
        if let Some(existing) = self.outputs.get(key) {
            return existing.channel.clone();
        }

        let channel = self.window.create_output_channel(key).await;
        // Another task may have created the same key while we awaited the host
        let (kept, lost) = match self.outputs.entry(key.to_string()) {
            Entry::Occupied(existing) => (existing.get().channel.clone(), Some(channel)),
            Entry::Vacant(slot) => {
                slot.insert(TaggedOutputChannel {
                    channel: channel.clone(),
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                });
                (channel, None)
            }
        };

        if let Some(lost) = lost {
            lost.dispose().await;
        }
        kept
    }

    /// Replaces the channel's text and reveals it.
    pub async fn set_text(&self, key: &str, text: &str, tags: &[&str]) {
        let output = self.get_output(key, tags).await;
        output.clear().await;
        output.append(text).await;
        output.show().await;
    }

    /// Appends without clearing or revealing.
    pub async fn append_text(&self, key: &str, text: &str, tags: &[&str]) {
        let output = self.get_output(key, tags).await;
        output.append(text).await;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.outputs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Disposes every channel and forgets all keys.
    pub async fn dispose_all(&self) {
        let keys: Vec<String> = self.outputs.iter().map(|e| e.key().clone()).collect();
        self.dispose_keys(keys).await;
    }

    /// Disposes channels carrying any of `tags`.
    pub async fn dispose_tagged(&self, tags: &[&str]) {
        let keys: Vec<String> = self
            .outputs
            .iter()
            .filter(|e| e.value().tags.iter().any(|t| tags.contains(&t.as_str())))
            .map(|e| e.key().clone())
            .collect();
        self.dispose_keys(keys).await;
    }

    async fn dispose_keys(&self, keys: Vec<String>) {
        for key in keys {
            if let Some((_, tagged)) = self.outputs.remove(&key) {
                tagged.channel.dispose().await;
            }
        }
    }
}
