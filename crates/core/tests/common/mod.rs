#![allow(dead_code)]

use async_trait::async_trait;
use extkit_api::{
    ApiResult, Disposable, DisposeFn, OutputChannel, StatusBarAlignment, StatusBarItem,
    TextDocumentContentProvider, Window,
};
use extkit_core::env::{
    DiscoveryError, PathProbe, PlatformDiscovery, ProcessOutput, ProcessRunner,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

// ---------------------------------------------------------------------------
// Locator capabilities
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakePaths {
    existing: Mutex<HashSet<PathBuf>>,
}

impl FakePaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: impl Into<PathBuf>) -> Self {
        self.existing.lock().expect("lock poisoned").insert(path.into());
        self
    }

    /// A JDK root with `bin/javac`.
    pub fn with_jdk(self, home: &str) -> Self {
        let home = PathBuf::from(home);
        self.with(home.clone()).with(home.join("bin").join("javac"))
    }
}

impl PathProbe for FakePaths {
    fn exists(&self, path: &Path) -> bool {
        self.existing.lock().expect("lock poisoned").contains(path)
    }
}

pub struct FakeRunner {
    stderr: String,
    delay: Option<Duration>,
    fail: bool,
    pub calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeRunner {
    pub fn banner(stderr: &str) -> Self {
        Self {
            stderr: stderr.to_string(),
            delay: None,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn java(version: &str) -> Self {
        Self::banner(&format!(
            "openjdk version \"{version}\" 2023-01-17\nOpenJDK Runtime Environment\n"
        ))
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::banner("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn programs(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, program: &Path, args: &[&str]) -> std::io::Result<ProcessOutput> {
        self.calls.lock().expect("lock poisoned").push((
            program.to_path_buf(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            ));
        }
        Ok(ProcessOutput {
            success: true,
            stdout: String::new(),
            stderr: self.stderr.clone(),
        })
    }
}

pub struct FakeDiscovery {
    result: Option<PathBuf>,
    pub calls: AtomicUsize,
}

impl FakeDiscovery {
    pub fn found(home: &str) -> Self {
        Self {
            result: Some(PathBuf::from(home)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn none() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformDiscovery for FakeDiscovery {
    async fn find(&self) -> Result<PathBuf, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().ok_or(DiscoveryError::NotFound)
    }
}

// ---------------------------------------------------------------------------
// Host window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Information(String),
    StatusBarMessage(String, Duration),
    OutputCreated(String),
    Output(String, OutputOp),
    StatusItemCreated(StatusBarAlignment, i32),
    StatusItem(usize, StatusOp),
    ProviderRegistered(String),
    ProviderDisposed(String),
    ShowDocument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOp {
    Append(String),
    Clear,
    Show,
    Dispose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOp {
    Text(String),
    Command(Option<String>),
    Show,
}

#[derive(Default)]
pub struct RecordingWindow {
    events: Arc<Mutex<Vec<WindowEvent>>>,
    status_items: AtomicUsize,
    pub providers: Mutex<Vec<(String, Arc<dyn TextDocumentContentProvider>)>>,
    output_gate: Option<Arc<tokio::sync::Barrier>>,
}

impl RecordingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds every output channel creation until `parties` callers are waiting.
    pub fn with_output_gate(mut self, parties: usize) -> Self {
        self.output_gate = Some(Arc::new(tokio::sync::Barrier::new(parties)));
        self
    }

    pub fn events(&self) -> Vec<WindowEvent> {
        self.events.lock().expect("lock poisoned").clone()
    }

    fn record(&self, event: WindowEvent) {
        self.events.lock().expect("lock poisoned").push(event);
    }
}

struct RecordingOutput {
    name: String,
    events: Arc<Mutex<Vec<WindowEvent>>>,
}

impl RecordingOutput {
    fn record(&self, op: OutputOp) {
        self.events
            .lock()
            .expect("lock poisoned")
            .push(WindowEvent::Output(self.name.clone(), op));
    }
}

#[async_trait]
impl OutputChannel for RecordingOutput {
    fn name(&self) -> &str {
        &self.name
    }
    async fn append(&self, text: &str) {
        self.record(OutputOp::Append(text.to_string()));
    }
    async fn clear(&self) {
        self.record(OutputOp::Clear);
    }
    async fn show(&self) {
        self.record(OutputOp::Show);
    }
    async fn dispose(&self) {
        self.record(OutputOp::Dispose);
    }
}

struct RecordingStatusItem {
    index: usize,
    events: Arc<Mutex<Vec<WindowEvent>>>,
}

impl RecordingStatusItem {
    fn record(&self, op: StatusOp) {
        self.events
            .lock()
            .expect("lock poisoned")
            .push(WindowEvent::StatusItem(self.index, op));
    }
}

#[async_trait]
impl StatusBarItem for RecordingStatusItem {
    async fn set_text(&self, text: &str) {
        self.record(StatusOp::Text(text.to_string()));
    }
    async fn set_command(&self, command: Option<&str>) {
        self.record(StatusOp::Command(command.map(str::to_string)));
    }
    async fn show(&self) {
        self.record(StatusOp::Show);
    }
}

#[async_trait]
impl Window for RecordingWindow {
    async fn show_information_message(&self, text: &str) {
        self.record(WindowEvent::Information(text.to_string()));
    }

    async fn set_status_bar_message(&self, text: &str, hide_after: Duration) {
        self.record(WindowEvent::StatusBarMessage(text.to_string(), hide_after));
    }

    async fn create_output_channel(&self, name: &str) -> Arc<dyn OutputChannel> {
        if let Some(gate) = &self.output_gate {
            gate.wait().await;
        }
        self.record(WindowEvent::OutputCreated(name.to_string()));
        Arc::new(RecordingOutput {
            name: name.to_string(),
            events: self.events.clone(),
        })
    }

    async fn create_status_bar_item(
        &self,
        alignment: StatusBarAlignment,
        priority: i32,
    ) -> Arc<dyn StatusBarItem> {
        self.record(WindowEvent::StatusItemCreated(alignment, priority));
        Arc::new(RecordingStatusItem {
            index: self.status_items.fetch_add(1, Ordering::SeqCst),
            events: self.events.clone(),
        })
    }

    async fn register_text_document_content_provider(
        &self,
        scheme: &str,
        provider: Arc<dyn TextDocumentContentProvider>,
    ) -> Box<dyn Disposable> {
        self.record(WindowEvent::ProviderRegistered(scheme.to_string()));
        self.providers
            .lock()
            .expect("lock poisoned")
            .push((scheme.to_string(), provider));
        let events = self.events.clone();
        let scheme = scheme.to_string();
        Box::new(DisposeFn::new(move || {
            events
                .lock()
                .expect("lock poisoned")
                .push(WindowEvent::ProviderDisposed(scheme));
        }))
    }

    async fn show_text_document(&self, uri: &Url) -> ApiResult<()> {
        self.record(WindowEvent::ShowDocument(uri.to_string()));
        Ok(())
    }
}
