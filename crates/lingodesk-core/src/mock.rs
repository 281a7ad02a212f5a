//! In-memory gateway used by controller and UI tests.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::ResourceGateway;
use crate::kind::ResourceKind;
use crate::page::{ListQuery, Page};
use crate::record::{Draft, Record, ResourceId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Remove,
}

#[derive(Default)]
struct Store {
    records: BTreeMap<ResourceId, Record>,
    next_id: i64,
    failures: HashMap<Operation, VecDeque<GatewayError>>,
}

pub struct InMemoryGateway {
    kind: ResourceKind,
    store: Mutex<Store>,
    calls: [AtomicUsize; 4],
}

impl InMemoryGateway {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind, store: Mutex::new(Store { next_id: 1, ..Store::default() }), calls: Default::default() }
    }

    /// Seeds records from JSON objects shaped like API responses.
    pub fn with_records(kind: ResourceKind, items: Vec<Value>) -> Self {
        let gateway = Self::new(kind);
        {
            let mut store = gateway.lock();
            for item in items {
                if let Ok(record) = Record::from_json(item, kind.schema()) {
                    store.next_id = store.next_id.max(record.id.0 + 1);
                    store.records.insert(record.id, record);
                }
            }
        }
        gateway
    }

    /// Queues an error returned by the next call of `op`.
    pub fn fail_next(&self, op: Operation, error: GatewayError) {
        self.lock().failures.entry(op).or_default().push_back(error);
    }

    pub fn calls(&self, op: Operation) -> usize {
        self.calls[op as usize].load(Ordering::SeqCst)
    }

    pub fn ids(&self) -> Vec<ResourceId> {
        self.lock().records.keys().copied().collect()
    }

    pub fn get(&self, id: ResourceId) -> Option<Record> {
        self.lock().records.get(&id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, op: Operation) -> Result<std::sync::MutexGuard<'_, Store>, GatewayError> {
        self.calls[op as usize].fetch_add(1, Ordering::SeqCst);
        let mut store = self.lock();
        let failure = store.failures.get_mut(&op).and_then(VecDeque::pop_front);
        match failure {
            Some(error) => Err(error),
            None => Ok(store),
        }
    }

    /// Full-document replace: fields missing from the draft are cleared.
    fn replace(&self, record: &mut Record, draft: &Draft) -> Result<(), GatewayError> {
        let mut body = draft.clone();
        body.insert("id".into(), Value::from(record.id.0));
        let updated = Record::from_json(Value::Object(body), self.kind.schema()).map_err(GatewayError::Format)?;
        record.fields = updated.fields;
        record.category = updated.category;
        Ok(())
    }
}

#[async_trait]
impl ResourceGateway for InMemoryGateway {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn list(&self, query: &ListQuery) -> Result<Page, GatewayError> {
        let store = self.begin(Operation::List)?;
        let matching: Vec<&Record> = store
            .records
            .values()
            .filter(|r| query.category_id.map_or(true, |c| r.category_id() == Some(c)))
            .collect();

        let size = query.page_size.max(1) as usize;
        let total_pages = matching.len().div_ceil(size).max(1) as u32;
        let start = (query.page.max(1) as usize - 1) * size;
        let items = matching.iter().skip(start).take(size).map(|r| (*r).clone()).collect();

        Ok(Page { items, page_number: query.page.max(1), total_pages, total_items: Some(matching.len() as u64) })
    }

    async fn create(&self, draft: &Draft) -> Result<Record, GatewayError> {
        let mut store = self.begin(Operation::Create)?;
        let id = ResourceId(store.next_id);
        store.next_id += 1;

        let mut body = draft.clone();
        body.insert("id".into(), Value::from(id.0));
        let record = Record::from_json(Value::Object(body), self.kind.schema()).map_err(GatewayError::Format)?;
        store.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: ResourceId, patch: &Draft) -> Result<Record, GatewayError> {
        let mut store = self.begin(Operation::Update)?;
        let record = store.records.get_mut(&id).ok_or(GatewayError::NotFound { id })?;
        self.replace(record, patch)?;
        Ok(record.clone())
    }

    async fn remove(&self, id: ResourceId) -> Result<(), GatewayError> {
        let mut store = self.begin(Operation::Remove)?;
        store.records.remove(&id).map(|_| ()).ok_or(GatewayError::NotFound { id })
    }
}
