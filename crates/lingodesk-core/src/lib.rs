pub mod auth;
pub mod client;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod kind;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod page;
pub mod record;
pub mod schema;

pub use auth::AuthContext;
pub use client::ApiClient;
pub use controller::{ControllerState, EditTarget, PendingDelete, RefreshOutcome, RefreshTicket, ResourceListController, SaveTicket};
pub use error::{ControllerError, GatewayError};
pub use gateway::{HttpGateway, ResourceGateway};
pub use kind::ResourceKind;
pub use page::{ListQuery, Page};
pub use record::{CategoryRef, Draft, EditBuffer, Record, ResourceId};
pub use schema::{FieldKind, FieldSpec, ResourceSchema};
