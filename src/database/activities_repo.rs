use sqlx::{SqliteConnection, SqlitePool};

use crate::models::ActivitiesRow;

const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  name,
  description,
  schedule,
  max_participants,
  position
FROM activities
ORDER BY position ASC
"#;

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_ACTIVITY_BY_NAME: &str = r#"
SELECT
  name,
  description,
  schedule,
  max_participants,
  position
FROM activities
WHERE name = ?
"#;

pub async fn load_activity_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> sqlx::Result<Option<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_LOAD_ACTIVITY_BY_NAME)
        .bind(name)
        .fetch_optional(conn)
        .await
}
