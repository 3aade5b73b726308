//! Task store collaborator
//!
//! The persistent store is external; the orchestrator writes through
//! [`TaskStore`] at record creation and at the terminal transition. The
//! in-memory implementation backs tests and single-process deployments.

use crate::error::StoreError;
use crate::task::{TaskId, TaskRecord, TaskStatus};
use async_trait::async_trait;
use dashmap::DashMap;

/// Listing filter
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    /// Restrict to one status
    pub status: Option<TaskStatus>,
}

/// Listing page, 1-based
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// Page number starting at 1
    pub number: usize,
    /// Records per page
    pub size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: 10,
        }
    }
}

/// Task persistence interface
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new record
    async fn create(&self, task: TaskRecord) -> Result<(), StoreError>;

    /// Overwrite an existing record
    async fn update(&self, task: TaskRecord) -> Result<(), StoreError>;

    /// Fetch one record
    async fn get(&self, task_id: TaskId) -> Result<Option<TaskRecord>, StoreError>;

    /// List records newest-first with filtering and pagination
    async fn list(
        &self,
        filter: TaskFilter,
        page: Page,
    ) -> Result<(Vec<TaskRecord>, usize), StoreError>;
}

/// In-memory task store
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: DashMap<TaskId, TaskRecord>,
}

impl MemoryTaskStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, task: TaskRecord) -> Result<(), StoreError> {
        if self.tasks.contains_key(&task.task_id) {
            return Err(StoreError::AlreadyExists(task.task_id));
        }
        self.tasks.insert(task.task_id, task);
        Ok(())
    }

    async fn update(&self, task: TaskRecord) -> Result<(), StoreError> {
        if !self.tasks.contains_key(&task.task_id) {
            return Err(StoreError::NotFound(task.task_id));
        }
        self.tasks.insert(task.task_id, task);
        Ok(())
    }

    async fn get(&self, task_id: TaskId) -> Result<Option<TaskRecord>, StoreError> {
        Ok(self.tasks.get(&task_id).map(|r| r.value().clone()))
    }

    async fn list(
        &self,
        filter: TaskFilter,
        page: Page,
    ) -> Result<(Vec<TaskRecord>, usize), StoreError> {
        let mut records: Vec<TaskRecord> = self
            .tasks
            .iter()
            .filter(|r| filter.status.map_or(true, |s| r.value().status == s))
            .map(|r| r.value().clone())
            .collect();

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = records.len();

        let size = page.size.max(1);
        let start = page.number.saturating_sub(1) * size;
        let records = records.into_iter().skip(start).take(size).collect();

        Ok((records, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskType;

    fn record(status: TaskStatus) -> TaskRecord {
        let mut record = TaskRecord::new(TaskId::new(), TaskType::NewsInsight);
        if status != TaskStatus::Pending {
            record.begin_processing().unwrap();
        }
        match status {
            TaskStatus::Completed => record.complete().unwrap(),
            TaskStatus::Failed => record.fail("boom").unwrap(),
            _ => {}
        }
        record
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryTaskStore::new();
        let task = record(TaskStatus::Processing);
        let id = task.task_id;

        store.create(task).await.unwrap();
        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.status, TaskStatus::Processing);
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let store = MemoryTaskStore::new();
        let task = record(TaskStatus::Processing);

        store.create(task.clone()).await.unwrap();
        let err = store.create(task).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn update_requires_existing_record() {
        let store = MemoryTaskStore::new();
        let err = store.update(record(TaskStatus::Completed)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_filters_by_status_and_paginates() {
        let store = MemoryTaskStore::new();
        for _ in 0..3 {
            store.create(record(TaskStatus::Completed)).await.unwrap();
        }
        store.create(record(TaskStatus::Failed)).await.unwrap();

        let (completed, total) = store
            .list(
                TaskFilter {
                    status: Some(TaskStatus::Completed),
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(completed.len(), 3);

        let (first_page, total) = store
            .list(TaskFilter::default(), Page { number: 1, size: 2 })
            .await
            .unwrap();
        assert_eq!(total, 4);
        assert_eq!(first_page.len(), 2);

        let (second_page, _) = store
            .list(TaskFilter::default(), Page { number: 2, size: 2 })
            .await
            .unwrap();
        assert_eq!(second_page.len(), 2);
    }
}
