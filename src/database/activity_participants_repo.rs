use sqlx::{SqliteConnection, SqlitePool};

use crate::models::ActivityParticipantsRow;

const SQL_LIST_PARTICIPANTS: &str = r#"
SELECT
  id,
  activity_name,
  email
FROM activity_participants
ORDER BY id ASC
"#;

pub async fn list_participants(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityParticipantsRow>> {
    sqlx::query_as::<_, ActivityParticipantsRow>(SQL_LIST_PARTICIPANTS)
        .fetch_all(pool)
        .await
}

const SQL_COUNT_PARTICIPANTS: &str = r#"
SELECT COUNT(*) FROM activity_participants WHERE activity_name = ?
"#;

pub async fn count_participants(
    conn: &mut SqliteConnection,
    activity_name: &str,
) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(SQL_COUNT_PARTICIPANTS)
        .bind(activity_name)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

const SQL_IS_SIGNED_UP: &str = r#"
SELECT EXISTS (
  SELECT 1 FROM activity_participants WHERE activity_name = ? AND email = ?
)
"#;

pub async fn is_signed_up(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<bool> {
    let (exists,): (i64,) = sqlx::query_as(SQL_IS_SIGNED_UP)
        .bind(activity_name)
        .bind(email)
        .fetch_one(conn)
        .await?;
    Ok(exists == 1)
}

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO activity_participants (activity_name, email) VALUES (?, ?)
"#;

pub async fn insert_participant(
    conn: &mut SqliteConnection,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

// First registration in listing order, matching how the board is rendered.
const SQL_FIND_FIRST_REGISTRATION: &str = r#"
SELECT
  p.id,
  p.activity_name,
  p.email
FROM activity_participants p
JOIN activities a ON a.name = p.activity_name
WHERE p.email = ?
ORDER BY a.position ASC
LIMIT 1
"#;

pub async fn find_first_registration(
    conn: &mut SqliteConnection,
    email: &str,
) -> sqlx::Result<Option<ActivityParticipantsRow>> {
    sqlx::query_as::<_, ActivityParticipantsRow>(SQL_FIND_FIRST_REGISTRATION)
        .bind(email)
        .fetch_optional(conn)
        .await
}

const SQL_DELETE_PARTICIPANT: &str = r#"
DELETE FROM activity_participants WHERE id = ?
"#;

pub async fn delete_participant(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_PARTICIPANT)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
