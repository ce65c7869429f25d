#![allow(dead_code)]

use async_trait::async_trait;
use quotebook_core::storage::StorageResult;
use quotebook_core::{
    KeyValueStore, MemoryKeyValueStore, PostPayload, PostReceipt, QuoteService, RemoteError,
    RemoteItem, RemoteSource, StatusNotifier, StorageError, SyncOutcome, SyncService,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn remote_item(id: u64, title: &str) -> RemoteItem {
    RemoteItem {
        id,
        title: title.to_string(),
        body: Some(format!("body {id}")),
    }
}

pub enum FetchScript {
    Items(Vec<RemoteItem>),
    Status(u16),
    Malformed,
}

/// Lets a test hold a fetch in flight until it releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

pub struct FakeRemote {
    script: Mutex<FetchScript>,
    gate: Option<Arc<Gate>>,
    fetch_calls: AtomicUsize,
    posts: Mutex<Vec<PostPayload>>,
    post_status: Option<u16>,
}

impl FakeRemote {
    pub fn returning(items: Vec<RemoteItem>) -> Self {
        Self::scripted(FetchScript::Items(items))
    }

    pub fn scripted(script: FetchScript) -> Self {
        Self {
            script: Mutex::new(script),
            gate: None,
            fetch_calls: AtomicUsize::new(0),
            posts: Mutex::new(Vec::new()),
            post_status: None,
        }
    }

    pub fn gated(mut self) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn failing_posts(mut self, status: u16) -> Self {
        self.post_status = Some(status);
        self
    }

    pub fn set_script(&self, script: FetchScript) {
        *self.script.lock().unwrap() = script;
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<PostPayload> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn fetch_list(&self, limit: u32) -> Result<Vec<RemoteItem>, RemoteError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let script = self.script.lock().unwrap();
        match &*script {
            FetchScript::Items(items) => Ok(items.iter().take(limit as usize).cloned().collect()),
            FetchScript::Status(status) => Err(RemoteError::Status {
                status: *status,
                message: "unavailable".to_string(),
            }),
            FetchScript::Malformed => Err(RemoteError::Decode("expected array".to_string())),
        }
    }

    async fn post_item(&self, payload: &PostPayload) -> Result<PostReceipt, RemoteError> {
        if let Some(status) = self.post_status {
            return Err(RemoteError::Status {
                status,
                message: "rejected".to_string(),
            });
        }
        let mut posts = self.posts.lock().unwrap();
        posts.push(payload.clone());
        Ok(PostReceipt {
            id: Some(100 + posts.len() as u64),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    labels: Mutex<Vec<&'static str>>,
}

impl RecordingNotifier {
    pub fn labels(&self) -> Vec<&'static str> {
        self.labels.lock().unwrap().clone()
    }
}

impl StatusNotifier for RecordingNotifier {
    fn notify(&self, outcome: &SyncOutcome) {
        self.labels.lock().unwrap().push(outcome.label());
    }
}

/// In-memory durable store whose writes can be switched off.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Poisoned("write disabled by test"));
        }
        self.inner.set(key, value)
    }
}

pub fn open_service(durable: Arc<dyn KeyValueStore>) -> QuoteService {
    QuoteService::open(durable, Arc::new(MemoryKeyValueStore::new())).unwrap()
}

pub struct SyncHarness {
    pub remote: Arc<FakeRemote>,
    pub notifier: Arc<RecordingNotifier>,
    pub durable: Arc<FlakyStore>,
    pub sync: SyncService,
}

impl SyncHarness {
    pub fn new(remote: FakeRemote) -> Self {
        let remote = Arc::new(remote);
        let notifier = Arc::new(RecordingNotifier::default());
        let durable = Arc::new(FlakyStore::default());
        let service = open_service(durable.clone());
        let sync = SyncService::new(
            remote.clone(),
            Arc::new(tokio::sync::Mutex::new(service)),
            notifier.clone(),
            10,
        );
        Self {
            remote,
            notifier,
            durable,
            sync,
        }
    }

    pub fn stored_quotes(&self) -> Option<String> {
        self.durable.get(quotebook_core::storage::QUOTES_KEY).unwrap()
    }

    pub async fn quote_count(&self) -> usize {
        self.sync.quotes().lock().await.store().len()
    }

    pub async fn has_text(&self, text: &str) -> bool {
        self.sync
            .quotes()
            .lock()
            .await
            .store()
            .as_slice()
            .iter()
            .any(|quote| quote.text == text)
    }
}
