//! Notice domain module

mod entity;
mod store;

pub use entity::{Notice, SessionId, Severity};
pub use store::NoticeStore;
