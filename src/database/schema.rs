use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

const SQL_CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  name TEXT PRIMARY KEY,
  description TEXT NOT NULL,
  schedule TEXT NOT NULL,
  max_participants INTEGER NOT NULL,
  position INTEGER NOT NULL
)
"#;

const SQL_CREATE_ACTIVITY_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS activity_participants (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  activity_name TEXT NOT NULL REFERENCES activities(name),
  email TEXT NOT NULL,
  UNIQUE (activity_name, email)
)
"#;

const SQL_SEED_ACTIVITY: &str = r#"
INSERT OR IGNORE INTO activities (
  name,
  description,
  schedule,
  max_participants,
  position
) VALUES (?, ?, ?, ?, ?)
"#;

const SQL_SEED_PARTICIPANT: &str = r#"
INSERT OR IGNORE INTO activity_participants (activity_name, email) VALUES (?, ?)
"#;

struct SeedActivity {
    name: &'static str,
    description: &'static str,
    schedule: &'static str,
    max_participants: i64,
    participants: &'static [&'static str],
}

const SEED_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    SeedActivity {
        name: "Basketball Team",
        description: "Competitive basketball training and games",
        schedule: "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        max_participants: 15,
        participants: &["alex@mergington.edu"],
    },
    SeedActivity {
        name: "Tennis Club",
        description: "Tennis lessons and friendly matches",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:00 PM",
        max_participants: 12,
        participants: &["james@mergington.edu", "lisa@mergington.edu"],
    },
    SeedActivity {
        name: "Art Studio",
        description: "Painting, drawing, and visual arts creation",
        schedule: "Wednesdays, 3:30 PM - 5:00 PM",
        max_participants: 18,
        participants: &["nina@mergington.edu"],
    },
    SeedActivity {
        name: "Music Ensemble",
        description: "Band and orchestra rehearsals",
        schedule: "Fridays, 4:00 PM - 5:30 PM",
        max_participants: 25,
        participants: &["lucas@mergington.edu", "anna@mergington.edu"],
    },
    SeedActivity {
        name: "Debate Club",
        description: "Develop argumentation and public speaking skills",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        max_participants: 16,
        participants: &["grace@mergington.edu"],
    },
    SeedActivity {
        name: "Science Club",
        description: "Explore scientific experiments and research",
        schedule: "Mondays, 4:00 PM - 5:00 PM",
        max_participants: 20,
        participants: &["benjamin@mergington.edu", "charlotte@mergington.edu"],
    },
];

/// Opens the pool. Every connection to `sqlite::memory:` is its own database,
/// so in-memory pools are pinned to one connection that is never recycled.
pub async fn connect(database_url: &str) -> sqlx::Result<SqlitePool> {
    if database_url.contains(":memory:") {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(database_url)
            .await;
    }
    SqlitePoolOptions::new().connect(database_url).await
}

pub async fn migrate(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_ACTIVITIES).execute(pool).await?;
    sqlx::query(SQL_CREATE_ACTIVITY_PARTICIPANTS)
        .execute(pool)
        .await?;
    Ok(())
}

/// Inserts the default activities. Participants are only seeded for activities
/// that did not exist yet, so restarting against a file database keeps edits.
pub async fn seed(pool: &SqlitePool) -> sqlx::Result<u64> {
    let mut inserted = 0;
    for (position, activity) in SEED_ACTIVITIES.iter().enumerate() {
        let res = sqlx::query(SQL_SEED_ACTIVITY)
            .bind(activity.name)
            .bind(activity.description)
            .bind(activity.schedule)
            .bind(activity.max_participants)
            .bind(position as i64)
            .execute(pool)
            .await?;
        if res.rows_affected() == 0 {
            continue;
        }
        inserted += 1;
        for email in activity.participants {
            sqlx::query(SQL_SEED_PARTICIPANT)
                .bind(activity.name)
                .bind(*email)
                .execute(pool)
                .await?;
        }
    }
    if inserted > 0 {
        info!(inserted, "seeded default activities");
    }
    Ok(inserted)
}

pub async fn connect_and_prepare(database_url: &str) -> sqlx::Result<SqlitePool> {
    let pool = connect(database_url).await?;
    migrate(&pool).await?;
    seed(&pool).await?;
    Ok(pool)
}
