#![allow(dead_code)]

use std::path::Path;

use todo_widget::{
    FileStorage, KeyValueStorage, MemoryStorage, PersistenceBridge, STORAGE_KEY,
    SequentialIdGenerator, StaticSeedSource, Task, TaskId, TaskList, TodoApp,
};

pub fn seed_feed(count: i64) -> StaticSeedSource {
    StaticSeedSource::new(
        (1..=count)
            .map(|id| {
                let mut task = Task::new(TaskId::new(id), format!("seed {id}"));
                task.user_id = Some(1);
                task.completed = id % 2 == 0;
                task
            })
            .collect(),
    )
}

pub fn memory_app() -> TodoApp {
    TodoApp::new(
        TaskList::new(),
        PersistenceBridge::new(Box::new(MemoryStorage::new())),
        Box::new(SequentialIdGenerator::starting_at(1_000)),
    )
}

pub async fn file_app(path: &Path, first_id: i64) -> TodoApp {
    TodoApp::start(
        PersistenceBridge::new(Box::new(FileStorage::new(path))),
        &seed_feed(8),
        5,
        Box::new(SequentialIdGenerator::starting_at(first_id)),
    )
    .await
    .unwrap()
}

/// Decodes what the bridge last wrote.
pub fn persisted(app: &TodoApp) -> Vec<Task> {
    let raw = app.bridge().storage().get(STORAGE_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}
