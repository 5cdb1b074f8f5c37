use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::CreateMemberRequest;
use crate::error::{Result, StorageError};
use crate::models::Member;

const MEMBER_COLUMNS: &str = "id, computing_id, name, email, is_exec, total_points, \
     spring_2025_total, fall_2025_total, password, created_at, updated_at";

pub struct MemberRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MemberRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all members, ordered by display name.
    pub async fn list(&self) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    /// Case-insensitive substring search over name, computing id, and email.
    pub async fn search(&self, query: &str) -> Result<Vec<Member>> {
        let pattern = format!("%{}%", query.to_lowercase());
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members \
             WHERE LOWER(name) LIKE ?1 OR computing_id LIKE ?1 OR LOWER(email) LIKE ?1 \
             ORDER BY name"
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Member> {
        sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_computing_id(&self, computing_id: &str) -> Result<Member> {
        sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE computing_id = ?1"
        ))
        .bind(computing_id.to_lowercase())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Administrative add. Fails with `Conflict` when the computing id is
    /// already taken.
    pub async fn create(&self, req: &CreateMemberRequest) -> Result<Member> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "INSERT INTO members (id, computing_id, name, email, is_exec, password) \
             VALUES (?1, ?2, ?3, ?4, 0, ?5) \
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.computing_id.trim().to_lowercase())
        .bind(req.name.trim())
        .bind(req.email.trim().to_lowercase())
        .bind(req.password.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).into_conflict("A member with this computing ID already exists")
        })?;

        Ok(member)
    }

    /// Insert-or-get keyed on the computing id, as one conflict-guarded
    /// insert. Two concurrent imports of the same row cannot both create;
    /// the loser of the insert race falls through to the lookup.
    ///
    /// Returns the member and whether this call created it.
    pub async fn get_or_create(&self, name: &str, computing_id: &str) -> Result<(Member, bool)> {
        let computing_id = computing_id.to_lowercase();
        let email = format!("{computing_id}@virginia.edu");

        let inserted = sqlx::query_as::<_, Member>(&format!(
            "INSERT INTO members (id, computing_id, name, email, is_exec) \
             VALUES (?1, ?2, ?3, ?4, 0) \
             ON CONFLICT (computing_id) DO NOTHING \
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&computing_id)
        .bind(name)
        .bind(&email)
        .fetch_optional(self.pool)
        .await?;

        match inserted {
            Some(member) => Ok((member, true)),
            None => Ok((self.find_by_computing_id(&computing_id).await?, false)),
        }
    }

    pub async fn set_password(&self, computing_id: &str, password: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE members SET password = ?1, updated_at = datetime('now') \
             WHERE computing_id = ?2",
        )
        .bind(password)
        .bind(computing_id.to_lowercase())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
