use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::{activities_repo, activity_participants_repo};
use crate::models::{ActivitiesRow, ActivityParticipantsRow};

/// Activity as served by `GET /activities`, keyed by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

/// Listing order is the activity position, so `serde_json` must keep insertion order.
pub type ActivitiesListing = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Invalid email address format")]
    InvalidEmail,
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student already signed up for this activity")]
    AlreadySignedUp,
    #[error("Activity is full")]
    ActivityFull,
    #[error("Participant not found in any activity")]
    ParticipantNotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct ActivityCardView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<String>,
}

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub async fn list_activities(
    pool: &SqlitePool,
) -> sqlx::Result<Vec<(String, ActivityDetails)>> {
    let rows = activities_repo::list_activities(pool).await?;
    let participants = activity_participants_repo::list_participants(pool).await?;
    Ok(group_participants(rows, participants))
}

pub async fn load_activities_listing(pool: &SqlitePool) -> sqlx::Result<ActivitiesListing> {
    let mut listing = ActivitiesListing::new();
    for (name, details) in list_activities(pool).await? {
        listing.insert(name, serde_json::json!(details));
    }
    Ok(listing)
}

pub async fn load_activity_cards(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityCardView>> {
    let cards = list_activities(pool)
        .await?
        .into_iter()
        .map(|(name, details)| ActivityCardView {
            spots_left: (details.max_participants - details.participants.len() as i64).max(0),
            name,
            description: details.description,
            schedule: details.schedule,
            participants: details.participants,
        })
        .collect();
    Ok(cards)
}

fn group_participants(
    rows: Vec<ActivitiesRow>,
    participants: Vec<ActivityParticipantsRow>,
) -> Vec<(String, ActivityDetails)> {
    let mut out: Vec<(String, ActivityDetails)> = rows
        .into_iter()
        .map(|row| {
            (
                row.name,
                ActivityDetails {
                    description: row.description,
                    schedule: row.schedule,
                    max_participants: row.max_participants,
                    participants: Vec::new(),
                },
            )
        })
        .collect();

    for p in participants {
        if let Some((_, details)) = out.iter_mut().find(|(name, _)| *name == p.activity_name) {
            details.participants.push(p.email);
        }
    }
    out
}

pub async fn signup_for_activity(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> Result<String, ActivityError> {
    if !validate_email(email) {
        return Err(ActivityError::InvalidEmail);
    }

    let mut tx = pool.begin().await?;
    let Some(activity) = activities_repo::load_activity_by_name(&mut tx, activity_name).await?
    else {
        return Err(ActivityError::ActivityNotFound);
    };
    if activity_participants_repo::is_signed_up(&mut tx, &activity.name, email).await? {
        return Err(ActivityError::AlreadySignedUp);
    }
    let count = activity_participants_repo::count_participants(&mut tx, &activity.name).await?;
    if count >= activity.max_participants {
        return Err(ActivityError::ActivityFull);
    }
    activity_participants_repo::insert_participant(&mut tx, &activity.name, email).await?;
    tx.commit().await?;

    info!(email, activity = %activity.name, "participant signed up");
    Ok(format!("Signed up {} for {}", email, activity.name))
}

pub async fn unregister_from_activity(
    pool: &SqlitePool,
    email: &str,
) -> Result<String, ActivityError> {
    let mut tx = pool.begin().await?;
    let Some(registration) =
        activity_participants_repo::find_first_registration(&mut tx, email).await?
    else {
        return Err(ActivityError::ParticipantNotFound);
    };
    activity_participants_repo::delete_participant(&mut tx, registration.id).await?;
    tx.commit().await?;

    info!(email, activity = %registration.activity_name, "participant unregistered");
    Ok(format!(
        "Unregistered {} from {}",
        email, registration.activity_name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;

    async fn seeded_pool() -> SqlitePool {
        schema::connect_and_prepare("sqlite::memory:").await.unwrap()
    }

    #[test]
    fn accepts_common_email_shapes() {
        for email in [
            "user.name@example.com",
            "user+tag@example.com",
            "user_name@example.com",
            "user-name@example.com",
            "user123@example.co.uk",
        ] {
            assert!(validate_email(email), "should accept {}", email);
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "notanemail",
            "missing@domain",
            "@nodomain.com",
            "spaces in@email.com",
            "double@@domain.com",
        ] {
            assert!(!validate_email(email), "should reject {}", email);
        }
    }

    #[tokio::test]
    async fn listing_keeps_activity_order() {
        let pool = seeded_pool().await;
        let listing = load_activities_listing(&pool).await.unwrap();
        let names: Vec<&str> = listing.keys().map(String::as_str).take(3).collect();
        assert_eq!(names, ["Chess Club", "Programming Class", "Gym Class"]);
        assert_eq!(
            listing["Chess Club"]["participants"],
            serde_json::json!(["michael@mergington.edu", "daniel@mergington.edu"])
        );
    }

    #[tokio::test]
    async fn signup_then_unregister() {
        let pool = seeded_pool().await;
        let msg = signup_for_activity(&pool, "Tennis Club", "new@test.com")
            .await
            .unwrap();
        assert_eq!(msg, "Signed up new@test.com for Tennis Club");

        let msg = unregister_from_activity(&pool, "new@test.com").await.unwrap();
        assert_eq!(msg, "Unregistered new@test.com from Tennis Club");

        let err = unregister_from_activity(&pool, "new@test.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::ParticipantNotFound));
    }

    #[tokio::test]
    async fn unregister_removes_first_activity_in_listing_order() {
        let pool = seeded_pool().await;
        signup_for_activity(&pool, "Science Club", "both@test.com")
            .await
            .unwrap();
        signup_for_activity(&pool, "Chess Club", "both@test.com")
            .await
            .unwrap();

        let msg = unregister_from_activity(&pool, "both@test.com").await.unwrap();
        assert_eq!(msg, "Unregistered both@test.com from Chess Club");
        let msg = unregister_from_activity(&pool, "both@test.com").await.unwrap();
        assert_eq!(msg, "Unregistered both@test.com from Science Club");
    }

    #[tokio::test]
    async fn signup_rejects_duplicates_and_full_activities() {
        let pool = seeded_pool().await;
        let err = signup_for_activity(&pool, "Chess Club", "michael@mergington.edu")
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::AlreadySignedUp));

        // Chess Club holds 12 and starts with 2.
        for i in 0..10 {
            signup_for_activity(&pool, "Chess Club", &format!("p{}@test.com", i))
                .await
                .unwrap();
        }
        let err = signup_for_activity(&pool, "Chess Club", "late@test.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::ActivityFull));
    }

    #[tokio::test]
    async fn signup_checks_email_before_activity() {
        let pool = seeded_pool().await;
        let err = signup_for_activity(&pool, "Nope", "notanemail")
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::InvalidEmail));
        let err = signup_for_activity(&pool, "Nope", "ok@test.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::ActivityNotFound));
    }

    #[tokio::test]
    async fn cards_report_spots_left() {
        let pool = seeded_pool().await;
        let cards = load_activity_cards(&pool).await.unwrap();
        let chess = cards.iter().find(|c| c.name == "Chess Club").unwrap();
        assert_eq!(chess.spots_left, 10);
    }
}
