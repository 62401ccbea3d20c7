//! Backend gateway, session and page controllers for LedgerDesk.
//!
//! Everything here talks to the outside world: the REST backend through
//! [`gateway::LedgerApi`], the durable session file through
//! [`session::SessionStorage`], and the download directory. The rules these
//! calls obey live in `ledgerdesk-core`.
//!
//! # Modules
//!
//! - `gateway` - Backend REST API trait and its HTTP implementation
//! - `session` - Session store and per-session context
//! - `pages` - One controller per screen
//! - `download` - Writing attachments to disk

pub mod download;
pub mod gateway;
pub mod pages;
pub mod session;

pub use download::{AttachmentExt, download};
pub use gateway::{HttpGateway, LedgerApi};
pub use session::{FileStorage, MemoryStorage, SessionContext, SessionStorage, SessionStore};
