//! Data shapes exchanged with the external document database.
//!
//! Documents are schema-less on the backend; every optional field here is
//! default-tolerant so records missing fields still deserialize. No
//! relational integrity is enforced client-side; the backend is
//! last-write-wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named collections in the document database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Users,
    Courses,
    Tracks,
    Events,
    Teachers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Courses => "courses",
            Collection::Tracks => "tracks",
            Collection::Events => "events",
            Collection::Teachers => "teachers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Default profile document written when an account is provisioned at
    /// sign-up. The display name falls back to the email's local part.
    pub fn provision(uid: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        let display_name = email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            uid: uid.into(),
            email,
            display_name,
            avatar_url: None,
            bio: None,
            joined_at: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub track_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub duration_secs: u32,
    #[serde(default)]
    pub course_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Incremented through the backend's atomic-increment primitive; never
    /// arbitrated client-side.
    #[serde(default)]
    pub participant_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_match_the_backend() {
        assert_eq!(Collection::Users.as_str(), "users");
        assert_eq!(Collection::Courses.as_str(), "courses");
        assert_eq!(Collection::Tracks.as_str(), "tracks");
        assert_eq!(Collection::Events.as_str(), "events");
        assert_eq!(Collection::Teachers.as_str(), "teachers");
    }

    #[test]
    fn documents_missing_optional_fields_still_deserialize() {
        let course: Course =
            serde_json::from_str(r#"{"id":"c1","title":"Foundations"}"#).unwrap();
        assert!(course.description.is_none());
        assert!(course.track_ids.is_empty());

        let event: Event =
            serde_json::from_str(r#"{"id":"e1","title":"Retreat"}"#).unwrap();
        assert_eq!(event.participant_count, 0);
        assert!(event.starts_at.is_none());
    }

    #[test]
    fn provisioned_profile_uses_email_local_part() {
        let profile = UserProfile::provision("u1", "ana@example.com");
        assert_eq!(profile.uid, "u1");
        assert_eq!(profile.display_name, "ana");
        assert!(profile.joined_at.is_some());
        assert!(profile.avatar_url.is_none());
    }
}
