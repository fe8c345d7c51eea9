//! REST client for the LMS backend.

mod academics;
mod auth;
mod client;
mod epoch;
mod institutes;
mod organizations;
pub mod storage;
mod token;

pub use academics::{ClassRef, StudentScope};
pub use client::ApiClient;
pub use epoch::{RequestEpoch, Ticket};
pub use token::{MemoryToken, StoredToken, TokenStore, TOKEN_KEY};
