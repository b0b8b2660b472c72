//! To-do list widget.
//!
//! The task list is owned in memory ([`state`]), mirrored into key/value
//! storage after every change ([`bridge`], [`storage`]) and seeded once from
//! a placeholder feed when storage is empty ([`seed`]). [`app::TodoApp`]
//! ties these together behind the user intents add, toggle, delete and
//! filter, and [`view`] projects the result for display.

pub mod app;
pub mod bridge;
pub mod error;
pub mod id;
pub mod seed;
pub mod state;
pub mod storage;
pub mod task;
pub mod view;

pub use app::TodoApp;
pub use bridge::{PersistenceBridge, STORAGE_KEY};
pub use error::{SeedError, StorageError, WidgetError};
pub use id::{ClockIdGenerator, IdGenerator, SequentialIdGenerator};
pub use seed::{PlaceholderSeedSource, SeedSource, StaticSeedSource};
pub use state::{Action, Filter, TaskList};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use task::{Task, TaskId};
pub use view::{TaskListView, TaskRow, render_text};
