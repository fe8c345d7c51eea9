pub mod error;

// Session, roles and navigation
pub mod models;
pub mod navigator;
pub mod org_nav;
pub mod page;
pub mod role;
pub mod selection;

// Feature domain types
pub mod academics;
pub mod common;
pub mod config;
pub mod organization;

pub use error::*;
pub use models::*;
pub use navigator::{NavEvent, NavState, Navigator, Screen};
pub use org_nav::*;
pub use page::*;
pub use role::*;
pub use selection::*;

pub use academics::*;
pub use common::*;
pub use config::*;
pub use organization::*;
