//! Notice infrastructure - server-side flash notice storage and delivery

mod in_memory;
mod manager;

pub use in_memory::{InMemoryNoticeStore, NoticeStoreConfig};
pub use manager::{render_notice, NoticeManager};
