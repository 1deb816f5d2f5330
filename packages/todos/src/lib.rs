// ABOUTME: Todo management for Tickoff
// ABOUTME: Provides the Todo types and the transactional SQLite storage behind the API

pub mod storage;
pub mod timestamp;
pub mod types;

// Re-export main types
pub use storage::TodoStorage;
pub use types::{
    Todo, TodoCreateInput, TodoFilter, TodoStats, TodoUpdateInput, DEFAULT_LIMIT, MAX_LIMIT,
};
