//! PostgreSQL-backed `UserStore` implementation using Diesel ORM.
//!
//! Rows are converted through the validated domain constructors, so a row
//! that no longer satisfies the domain rules surfaces as a query error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CreateUserOutcome, UserStore, UserStoreError};
use crate::domain::{ExerciseEntry, ExerciseEntryDraft, ExerciseUser, UserId, UserLog};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EntryRow, NewEntryRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{exercise_entries, exercise_users};

/// Diesel-backed implementation of the user store port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<ExerciseUser, UserStoreError> {
    ExerciseUser::try_from_strings(row.id, row.username)
        .map_err(|err| UserStoreError::query(format!("invalid stored user: {err}")))
}

fn row_to_entry(row: EntryRow) -> Result<ExerciseEntry, UserStoreError> {
    ExerciseEntry::new(ExerciseEntryDraft {
        description: row.description,
        duration: row.duration,
        date: row.performed_on,
    })
    .map_err(|err| UserStoreError::query(format!("invalid stored entry: {err}")))
}

async fn load_user(
    conn: &mut AsyncPgConnection,
    id: &UserId,
) -> Result<Option<ExerciseUser>, UserStoreError> {
    let row = exercise_users::table
        .find(id.as_ref())
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    row.map(row_to_user).transpose()
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn create_user(
        &self,
        user: &ExerciseUser,
    ) -> Result<CreateUserOutcome, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
        };

        // ON CONFLICT DO NOTHING yields no row when the username is held.
        let inserted = diesel::insert_into(exercise_users::table)
            .values(&new_row)
            .on_conflict(exercise_users::username)
            .do_nothing()
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match inserted {
            Some(row) => Ok(CreateUserOutcome::Created(row_to_user(row)?)),
            None => Ok(CreateUserOutcome::UsernameTaken),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserLog>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(user) = load_user(&mut conn, id).await? else {
            return Ok(None);
        };

        let rows: Vec<EntryRow> = exercise_entries::table
            .filter(exercise_entries::user_id.eq(id.as_ref()))
            .order(exercise_entries::id.asc())
            .select(EntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let entries = rows
            .into_iter()
            .map(row_to_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(UserLog::new(user, entries)))
    }

    async fn append_entry(
        &self,
        id: &UserId,
        entry: &ExerciseEntry,
    ) -> Result<Option<ExerciseUser>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(user) = load_user(&mut conn, id).await? else {
            return Ok(None);
        };

        let new_row = NewEntryRow {
            user_id: id.as_ref(),
            description: entry.description(),
            duration: entry.duration().value(),
            performed_on: entry.date(),
        };
        diesel::insert_into(exercise_entries::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(user))
    }
}
