use crate::bridge::PersistenceBridge;
use crate::error::WidgetError;
use crate::id::IdGenerator;
use crate::seed::SeedSource;
use crate::state::{Action, Filter, TaskList};
use crate::task::TaskId;
use crate::view::TaskListView;

/// The widget: task list, its storage mirror, the pending input text and the
/// selected filter.
///
/// When a write to storage fails the in-memory list keeps the change and the
/// error is returned.
pub struct TodoApp {
    list: TaskList,
    bridge: PersistenceBridge,
    ids: Box<dyn IdGenerator>,
    input: String,
    filter: Filter,
}

impl TodoApp {
    #[must_use]
    pub fn new(list: TaskList, bridge: PersistenceBridge, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            list,
            bridge,
            ids,
            input: String::new(),
            filter: Filter::default(),
        }
    }

    /// Loads (or seeds) the list through `bridge` and builds the widget.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Storage`] when storage is unreadable.
    pub async fn start(
        mut bridge: PersistenceBridge,
        seed: &dyn SeedSource,
        seed_limit: usize,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, WidgetError> {
        let list = bridge.initialize(seed, seed_limit).await?;
        Ok(Self::new(list, bridge, ids))
    }

    fn dispatch(&mut self, action: Action) -> Result<bool, WidgetError> {
        if !self.list.apply(action) {
            return Ok(false);
        }

        if let Err(error) = self.bridge.persist(&self.list) {
            tracing::error!(%error, version = self.list.version(), "Failed to persist tasks");
            return Err(error.into());
        }
        Ok(true)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Adds the pending input as a task and clears it.
    ///
    /// Blank input adds nothing and is kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Storage`] when the new list cannot be persisted.
    pub fn submit(&mut self) -> Result<Option<TaskId>, WidgetError> {
        if self.input.trim().is_empty() {
            return Ok(None);
        }

        let id = self.ids.next_id();
        let title = std::mem::take(&mut self.input);
        self.dispatch(Action::Add { id, title })?;
        Ok(Some(id))
    }

    /// Sets the input to `title` and submits it.
    ///
    /// # Errors
    ///
    /// See [`TodoApp::submit`].
    pub fn add(&mut self, title: impl Into<String>) -> Result<Option<TaskId>, WidgetError> {
        self.set_input(title);
        self.submit()
    }

    /// Flips completion of `id`; returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Storage`] when the new list cannot be persisted.
    pub fn toggle(&mut self, id: TaskId) -> Result<bool, WidgetError> {
        self.dispatch(Action::Toggle(id))
    }

    /// Removes `id`; returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Storage`] when the new list cannot be persisted.
    pub fn delete(&mut self, id: TaskId) -> Result<bool, WidgetError> {
        self.dispatch(Action::Delete(id))
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    #[must_use]
    pub const fn list(&self) -> &TaskList {
        &self.list
    }

    #[must_use]
    pub const fn bridge(&self) -> &PersistenceBridge {
        &self.bridge
    }

    #[must_use]
    pub fn view(&self) -> TaskListView {
        TaskListView::project(&self.list, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::id::SequentialIdGenerator;
    use crate::storage::{KeyValueStorage, MemoryStorage};
    use rstest::{fixture, rstest};

    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[fixture]
    fn app() -> TodoApp {
        TodoApp::new(
            TaskList::new(),
            PersistenceBridge::new(Box::new(MemoryStorage::new())),
            Box::new(SequentialIdGenerator::default()),
        )
    }

    #[rstest]
    fn submit_adds_and_clears_input(mut app: TodoApp) {
        app.set_input("Buy milk");

        let id = app.submit().unwrap();

        assert_eq!(id, Some(TaskId::new(1)));
        assert_eq!(app.input(), "");
        assert_eq!(app.list().tasks()[0].title, "Buy milk");
    }

    #[rstest]
    fn blank_submit_keeps_input(mut app: TodoApp) {
        app.set_input("   ");

        assert_eq!(app.submit().unwrap(), None);
        assert_eq!(app.input(), "   ");
        assert!(app.list().is_empty());
        assert_eq!(app.bridge().load().unwrap(), None);
    }

    #[rstest]
    fn pending_completed_scenario(mut app: TodoApp) {
        let id = app.add("Buy milk").unwrap().unwrap();

        app.set_filter(Filter::Pending);
        assert!(app.view().rows.iter().any(|row| row.id == id));

        assert!(app.toggle(id).unwrap());
        assert!(app.view().rows.iter().all(|row| row.id != id));

        app.set_filter(Filter::Completed);
        assert!(app.view().rows.iter().any(|row| row.id == id));
    }

    #[rstest]
    fn mutations_are_persisted(mut app: TodoApp) {
        let first = app.add("one").unwrap().unwrap();
        app.add("two").unwrap();
        app.toggle(first).unwrap();
        app.delete(first).unwrap();

        assert_eq!(app.bridge().load().unwrap().unwrap(), app.list().tasks());
    }

    #[rstest]
    fn unknown_ids_report_false(mut app: TodoApp) {
        assert!(!app.toggle(TaskId::new(5)).unwrap());
        assert!(!app.delete(TaskId::new(5)).unwrap());
    }

    #[rstest]
    fn storage_failure_is_returned_but_state_kept() {
        let mut app = TodoApp::new(
            TaskList::new(),
            PersistenceBridge::new(Box::new(ReadOnlyStorage)),
            Box::new(SequentialIdGenerator::default()),
        );

        let error = app.add("unsaved").unwrap_err();

        assert!(matches!(error, WidgetError::Storage(StorageError::Io(_))));
        assert_eq!(app.list().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn start_seeds_from_feed() {
        use crate::seed::StaticSeedSource;
        use crate::task::Task;

        let seed = StaticSeedSource::new(vec![Task::new(TaskId::new(1), "from feed")]);

        let app = TodoApp::start(
            PersistenceBridge::new(Box::new(MemoryStorage::new())),
            &seed,
            5,
            Box::new(SequentialIdGenerator::starting_at(100)),
        )
        .await
        .unwrap();

        assert_eq!(app.list().len(), 1);
        assert_eq!(app.view().rows[0].title, "from feed");
    }
}
