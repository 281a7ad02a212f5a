use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{ControllerError, GatewayError};
use crate::gateway::ResourceGateway;
use crate::kind::ResourceKind;
use crate::page::{ListQuery, Page};
use crate::record::{Draft, EditBuffer, Record, ResourceId};
use crate::schema::ResourceSchema;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    Ready,
    ErrorShown(String),
    Editing(ResourceId),
    Creating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTarget {
    Existing(ResourceId),
    New,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug)]
struct EditSession {
    target: EditTarget,
    buffer: EditBuffer,
    /// Sent with the draft, since an update replaces the whole document.
    category: Option<ResourceId>,
}

#[derive(Debug, PartialEq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh was started after this one; the result was dropped.
    Stale,
    Failed(GatewayError),
}

/// A started list fetch. Only the most recently issued ticket is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    seq: u64,
    query: ListQuery,
}

impl RefreshTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub async fn run(&self, gateway: &dyn ResourceGateway) -> Result<Page, GatewayError> {
        gateway.list(&self.query).await
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaveTicket {
    target: EditTarget,
    draft: Draft,
}

impl SaveTicket {
    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub async fn run(&self, gateway: &dyn ResourceGateway) -> Result<Record, GatewayError> {
        match self.target {
            EditTarget::Existing(id) => gateway.update(id, &self.draft).await,
            EditTarget::New => gateway.create(&self.draft).await,
        }
    }
}

/// A delete awaiting confirmation. Only [`ResourceListController::request_delete`] builds one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    id: ResourceId,
    message: String,
}

impl PendingDelete {
    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub async fn run(&self, gateway: &dyn ResourceGateway) -> Result<(), GatewayError> {
        gateway.remove(self.id).await
    }
}

/// List, page, filter and edit state for one resource kind.
///
/// Every network operation is split into a synchronous `begin_*` that updates state and returns a
/// ticket, and a `finish_*` that applies the gateway result. The async methods chain both halves;
/// the TUI runs the gateway call on a spawned task instead.
pub struct ResourceListController {
    gateway: Arc<dyn ResourceGateway>,
    schema: &'static ResourceSchema,
    page_size: u32,
    sort: Option<String>,
    category: Option<ResourceId>,
    items: Vec<Record>,
    page: u32,
    total_pages: u32,
    total_items: Option<u64>,
    filter: String,
    phase: Phase,
    edit: Option<EditSession>,
    last_error: Option<String>,
    seq: u64,
}

impl ResourceListController {
    pub fn new(gateway: Arc<dyn ResourceGateway>, page_size: u32) -> Self {
        let schema = gateway.kind().schema();
        Self {
            gateway,
            schema,
            page_size: page_size.max(1),
            sort: None,
            category: None,
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            total_items: None,
            filter: String::new(),
            phase: Phase::Idle,
            edit: None,
            last_error: None,
            seq: 0,
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        let sort = sort.into();
        self.sort = (!sort.trim().is_empty()).then_some(sort);
        self
    }

    pub fn with_category(mut self, category: Option<ResourceId>) -> Self {
        self.category = category;
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    pub fn gateway(&self) -> Arc<dyn ResourceGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn state(&self) -> ControllerState {
        if let Some(session) = &self.edit {
            return match session.target {
                EditTarget::Existing(id) => ControllerState::Editing(id),
                EditTarget::New => ControllerState::Creating,
            };
        }
        match &self.phase {
            Phase::Idle => ControllerState::Idle,
            Phase::Loading => ControllerState::Loading,
            Phase::Ready => ControllerState::Ready,
            Phase::Failed(msg) => ControllerState::ErrorShown(msg.clone()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Items on the current page whose label contains the filter text, ignoring case.
    pub fn visible(&self) -> Vec<&Record> {
        if self.filter.is_empty() {
            return self.items.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        self.items.iter().filter(|r| self.schema.label(r).to_lowercase().contains(&needle)).collect()
    }

    pub fn find(&self, id: ResourceId) -> Option<&Record> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn label(&self, record: &Record) -> String {
        self.schema.label(record)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn category(&self) -> Option<ResourceId> {
        self.category
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn edit_target(&self) -> Option<EditTarget> {
        self.edit.as_ref().map(|s| s.target)
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref().map(|s| &s.buffer)
    }

    pub fn begin_refresh(&mut self, page: u32) -> RefreshTicket {
        self.seq += 1;
        self.phase = Phase::Loading;
        let query =
            ListQuery::new(page, self.page_size).with_sort(self.sort.clone()).with_category(self.category);
        debug!(kind = %self.kind(), seq = self.seq, page = query.page, "refresh started");
        RefreshTicket { seq: self.seq, query }
    }

    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.seq == self.seq
    }

    pub fn finish_refresh(&mut self, ticket: &RefreshTicket, result: Result<Page, GatewayError>) -> RefreshOutcome {
        if !self.is_current(ticket) {
            debug!(kind = %self.kind(), seq = ticket.seq, latest = self.seq, "dropping stale page");
            return RefreshOutcome::Stale;
        }
        match result {
            Ok(page) => {
                self.page = page.page_number.max(1);
                self.total_pages = page.total_pages.max(self.page);
                self.total_items = page.total_items;
                self.items = page.items;
                self.phase = Phase::Ready;
                self.last_error = None;
                RefreshOutcome::Applied
            }
            Err(e) => {
                let msg = e.user_message();
                warn!(kind = %self.kind(), error = %e, "refresh failed");
                self.phase = Phase::Failed(msg.clone());
                self.last_error = Some(msg);
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Clamps `n` into `[1, total_pages]` and starts fetching that page.
    pub fn set_page(&mut self, n: u32) -> RefreshTicket {
        let n = n.clamp(1, self.total_pages.max(1));
        self.begin_refresh(n)
    }

    pub fn next_page(&mut self) -> Option<RefreshTicket> {
        if self.page >= self.total_pages {
            return None;
        }
        Some(self.set_page(self.page + 1))
    }

    pub fn prev_page(&mut self) -> Option<RefreshTicket> {
        if self.page <= 1 {
            return None;
        }
        Some(self.set_page(self.page - 1))
    }

    /// Restricts the list to one category (or clears it) and returns to the first page.
    pub fn set_category(&mut self, category: Option<ResourceId>) -> RefreshTicket {
        self.category = category;
        self.page = 1;
        self.total_pages = 1;
        self.begin_refresh(1)
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn start_edit(&mut self, id: ResourceId) -> Result<(), ControllerError> {
        let record = self.find(id).ok_or(ControllerError::NotListed(id))?;
        let buffer = record.edit_buffer(self.schema);
        let category = record.category_id();
        self.edit = Some(EditSession { target: EditTarget::Existing(id), buffer, category });
        Ok(())
    }

    pub fn start_create(&mut self) {
        let buffer = EditBuffer::blank(self.schema);
        self.edit = Some(EditSession { target: EditTarget::New, buffer, category: self.category });
    }

    pub fn update_edit_buffer(&mut self, field: &str, value: impl Into<String>) -> Result<(), ControllerError> {
        let session = self.edit.as_mut().ok_or(ControllerError::NoEditSession)?;
        if session.buffer.set(field, value.into()) {
            Ok(())
        } else {
            Err(ControllerError::UnknownField(field.to_string()))
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn begin_save(&mut self) -> Result<SaveTicket, ControllerError> {
        let session = self.edit.as_ref().ok_or(ControllerError::NoEditSession)?;
        let (target, category) = (session.target, session.category);
        let mut draft = match session.buffer.to_draft(self.schema) {
            Ok(draft) => draft,
            Err(e) => {
                self.last_error = Some(e.user_message());
                return Err(e);
            }
        };
        if self.schema.has_category {
            if let Some(category) = category {
                draft.entry("categoryId").or_insert(category.0.into());
            }
        }
        Ok(SaveTicket { target, draft })
    }

    /// Applies a save result. On success the edit session ends and the stored row is replaced;
    /// on failure the session and the list are left as they were.
    pub fn finish_save(&mut self, ticket: &SaveTicket, result: Result<Record, GatewayError>) -> Result<Record, ControllerError> {
        match result {
            Ok(record) => {
                if self.edit.as_ref().is_some_and(|s| s.target == ticket.target) {
                    self.edit = None;
                }
                if let Some(slot) = self.items.iter_mut().find(|r| r.id == record.id) {
                    *slot = record.clone();
                }
                self.last_error = None;
                info!(kind = %self.kind(), id = %record.id, "saved");
                Ok(record)
            }
            Err(e) => {
                warn!(kind = %self.kind(), error = %e, "save failed");
                self.last_error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Builds the confirmation for deleting `id`. The row does not have to be on the current page.
    pub fn request_delete(&self, id: ResourceId) -> PendingDelete {
        let what = self.kind().singular();
        let message = match self.find(id).map(|r| self.label(r)).filter(|l| !l.is_empty()) {
            Some(label) => format!("Delete {what} \"{label}\" (#{id})?"),
            None => format!("Delete {what} #{id}?"),
        };
        PendingDelete { id, message }
    }

    pub fn finish_delete(&mut self, pending: &PendingDelete, result: Result<(), GatewayError>) -> Result<(), ControllerError> {
        match result {
            Ok(()) => {
                self.items.retain(|r| r.id != pending.id);
                if self.edit_target() == Some(EditTarget::Existing(pending.id)) {
                    self.edit = None;
                }
                self.last_error = None;
                info!(kind = %self.kind(), id = %pending.id, "deleted");
                Ok(())
            }
            Err(e) => {
                warn!(kind = %self.kind(), id = %pending.id, error = %e, "delete failed");
                self.last_error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    pub async fn refresh(&mut self, page: u32) -> RefreshOutcome {
        let ticket = self.begin_refresh(page);
        let result = ticket.run(self.gateway.as_ref()).await;
        self.finish_refresh(&ticket, result)
    }

    pub async fn go_to_page(&mut self, n: u32) -> RefreshOutcome {
        let ticket = self.set_page(n);
        let result = ticket.run(self.gateway.as_ref()).await;
        self.finish_refresh(&ticket, result)
    }

    pub async fn change_category(&mut self, category: Option<ResourceId>) -> RefreshOutcome {
        let ticket = self.set_category(category);
        let result = ticket.run(self.gateway.as_ref()).await;
        self.finish_refresh(&ticket, result)
    }

    /// Saves the open edit or create form, then reloads the current page.
    pub async fn save_edit(&mut self) -> Result<Record, ControllerError> {
        let ticket = self.begin_save()?;
        let result = ticket.run(self.gateway.as_ref()).await;
        let record = self.finish_save(&ticket, result)?;
        self.refresh(self.page).await;
        Ok(record)
    }

    /// Deletes the confirmed resource and reloads. A failed delete leaves the list as shown.
    pub async fn confirm_delete(&mut self, pending: PendingDelete) -> Result<(), ControllerError> {
        let result = pending.run(self.gateway.as_ref()).await;
        self.finish_delete(&pending, result)?;
        self.refresh(self.page).await;
        Ok(())
    }
}
