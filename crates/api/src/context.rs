use crate::ApiResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A resource the host hands back on registration and that must be released on shutdown.
pub trait Disposable: Send + Sync {
    fn dispose(&self);
}

/// Wraps a closure as a [`Disposable`]. The closure runs at most once.
pub struct DisposeFn {
    action: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl DisposeFn {
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            action: Mutex::new(Some(Box::new(action))),
        }
    }
}

impl Disposable for DisposeFn {
    fn dispose(&self) {
        let action = self
            .action
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(action) = action {
            action();
        }
    }
}

/// Persistent key/value state shared across sessions (non-sensitive).
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> ApiResult<Option<Value>>;

    /// Stores `value`, or removes the key when `value` is `None`.
    async fn update(&self, key: &str, value: Option<Value>) -> ApiResult<()>;
}

/// Per-extension state handed out by the host at activation.
pub struct ExtensionContext {
    subscriptions: Mutex<Vec<Box<dyn Disposable>>>,
    global_state: Arc<dyn StateStore>,
}

impl ExtensionContext {
    pub fn new(global_state: Arc<dyn StateStore>) -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
            global_state,
        }
    }

    pub fn global_state(&self) -> &Arc<dyn StateStore> {
        &self.global_state
    }

    pub fn subscribe(&self, disposable: Box<dyn Disposable>) {
        self.subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(disposable);
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Disposes subscriptions in reverse registration order.
    pub fn dispose(&self) {
        let drained: Vec<_> = self
            .subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .drain(..)
            .collect();
        for disposable in drained.into_iter().rev() {
            disposable.dispose();
        }
    }
}
