pub mod calendar;
pub mod cli;
pub mod config;
pub mod form;
pub mod list;
pub mod model;
pub mod store;

pub use config::{AppConfig, ConfigLoader, ConfigPaths};
pub use form::{FormContext, FormMode, FormSession};
pub use list::ListSyncAdapter;
pub use model::{Event, EventFields, EventId};
pub use store::{EventStore, MemoryStore};
