//! Login and password changes. The credential is an opaque string compared
//! as-is; members without a stored password use the deployment default
//! until they set one.

use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::Member;
use crate::repository::MemberRepository;

pub const DEFAULT_PASSWORD: &str = "rampoints12!";
pub const MIN_PASSWORD_LEN: usize = 8;

/// Looks the member up by (case-folded) computing id and checks the
/// password. `NotFound` covers both an unknown id and a wrong password so
/// callers can answer uniformly.
pub async fn authenticate(
    pool: &SqlitePool,
    computing_id: &str,
    password: &str,
) -> Result<Member> {
    let member = MemberRepository::new(pool)
        .find_by_computing_id(computing_id)
        .await?;

    let expected = member.password.as_deref().unwrap_or(DEFAULT_PASSWORD);
    if password != expected {
        return Err(StorageError::NotFound);
    }

    Ok(member)
}

pub async fn update_password(
    pool: &SqlitePool,
    computing_id: &str,
    new_password: &str,
) -> Result<()> {
    if new_password.len() < MIN_PASSWORD_LEN {
        return Err(StorageError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    MemberRepository::new(pool)
        .set_password(computing_id, new_password)
        .await
}

/// Whether this member still authenticates with the default password and
/// should be prompted to set one.
pub fn needs_password_setup(member: &Member) -> bool {
    member.password.is_none()
}
