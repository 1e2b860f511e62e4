//! List store access through Microsoft Graph

mod dto;
mod list_client;
pub mod odata;
mod record_store;

pub use list_client::GraphListClient;
pub use record_store::GraphRecordStore;
