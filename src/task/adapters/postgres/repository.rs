//! `PostgreSQL` repository implementation for local tasks.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::identity::domain::UserId;
use crate::persistence::{PersistenceFailure, PgPool, run_blocking};
use crate::task::{
    domain::{PersistedTaskData, Priority, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl PersistenceFailure for TaskRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task);

        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((
                    tasks::title.eq(row.title),
                    tasks::priority.eq(row.priority),
                    tasks::schedule_hint.eq(row.schedule_hint),
                    tasks::completed.eq(row.completed),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .order(tasks::seq.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner().into_inner(),
        title: task.title().to_owned(),
        priority: task.priority().as_str().to_owned(),
        schedule_hint: task.schedule_hint().to_owned(),
        completed: task.is_completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let priority =
        Priority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        title: row.title,
        priority,
        schedule_hint: row.schedule_hint,
        completed: row.completed,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn stored_task() -> Task {
        Task::new(
            UserId::new(),
            "Write release notes",
            Priority::High,
            "Friday",
            &DefaultClock,
        )
        .expect("valid task")
    }

    fn as_row(row: NewTaskRow) -> TaskRow {
        TaskRow {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            priority: row.priority,
            schedule_hint: row.schedule_hint,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    #[rstest]
    fn row_mapping_preserves_task() {
        let task = stored_task();
        let restored = row_to_task(as_row(to_new_row(&task))).expect("valid row");
        assert_eq!(restored, task);
    }

    #[rstest]
    fn unknown_priority_is_a_persistence_error() {
        let mut row = as_row(to_new_row(&stored_task()));
        row.priority = "urgent".to_owned();
        assert!(matches!(
            row_to_task(row),
            Err(TaskRepositoryError::Persistence(_))
        ));
    }
}
