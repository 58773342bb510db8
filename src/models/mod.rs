pub mod bookmark;
pub mod seed;
pub mod storage;

pub use bookmark::{Bookmark, BookmarkFields, parse_tags, readable};
pub use seed::seed_bookmarks;
pub use storage::{Backend, FileBackend, MemoryBackend};
