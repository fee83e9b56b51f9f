use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::RecordError;
use crate::status::MovieStatus;

/// A movie in the user's collection, as stored by the application.
///
/// `fun` carries two meanings depending on `status`: anticipation (1-5)
/// while the movie is queued, and the user's rating (1-5) once it has been
/// watched. Marking a movie watched overwrites the anticipation with the
/// rating; the two are never stored side by side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    pub status: MovieStatus,
    pub priority: u8, // 1-5
    pub fun: u8,      // 1-5, anticipation or rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>, // comma-separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_watched: Option<DateTime<Utc>>,
}

fn default_name() -> String {
    "Untitled".to_string()
}

impl MovieRecord {
    /// Create a queued record with the application's defaults (priority 3, fun 3)
    pub fn queued(id: impl Into<String>, name: impl Into<String>, date_added: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: MovieStatus::Queued,
            priority: 3,
            fun: 3,
            director: None,
            actors: None,
            year: None,
            date_added,
            date_watched: None,
        }
    }

    pub fn is_watched(&self) -> bool {
        self.status == MovieStatus::Watched
    }

    pub fn is_queued(&self) -> bool {
        self.status == MovieStatus::Queued
    }

    /// Anticipation, only meaningful while queued
    pub fn anticipation(&self) -> Option<u8> {
        self.is_queued().then_some(self.fun)
    }

    /// Rating, only meaningful once watched
    pub fn rating(&self) -> Option<u8> {
        self.is_watched().then_some(self.fun)
    }

    /// Return the watched form of this record: status flips, the watch
    /// date is set and `rating` replaces the anticipation in `fun`.
    pub fn mark_watched(&self, rating: u8, at: DateTime<Utc>) -> Self {
        Self {
            status: MovieStatus::Watched,
            fun: rating,
            date_watched: Some(at),
            ..self.clone()
        }
    }

    /// Case-insensitive match on name, director or actors.
    /// `query` must already be lowercased.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(query)
            || self.director.as_deref().map(|d| d.to_lowercase().contains(query)).unwrap_or(false)
            || self.actors.as_deref().map(|a| a.to_lowercase().contains(query)).unwrap_or(false)
    }

    /// Check the invariants the engines assume but never enforce.
    pub fn validate(&self) -> Result<(), RecordError> {
        if !(1..=5).contains(&self.priority) {
            return Err(RecordError::PriorityOutOfRange { id: self.id.clone(), value: self.priority });
        }
        if !(1..=5).contains(&self.fun) {
            return Err(RecordError::FunOutOfRange { id: self.id.clone(), value: self.fun });
        }
        match (self.status, self.date_watched) {
            (MovieStatus::Watched, None) => Err(RecordError::MissingWatchDate { id: self.id.clone() }),
            (MovieStatus::Queued, Some(_)) => Err(RecordError::UnexpectedWatchDate { id: self.id.clone() }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn added() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_deserialize_application_document() {
        let json = r#"{
            "id": "b6f1",
            "name": "Arrival",
            "status": "watched",
            "priority": 4,
            "fun": 5,
            "director": "Denis Villeneuve",
            "year": 2016,
            "dateAdded": "2024-03-01T09:30:00.000Z",
            "dateWatched": "2024-03-09T21:00:00.000Z"
        }"#;
        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, MovieStatus::Watched);
        assert_eq!(record.year, Some(2016));
        assert_eq!(record.actors, None);
        assert_eq!(record.date_added, added());
        assert_eq!(record.rating(), Some(5));
        assert_eq!(record.anticipation(), None);
    }

    #[test]
    fn test_missing_name_defaults_to_untitled() {
        let json = r#"{"id":"x","status":"towatch","priority":3,"fun":3,"dateAdded":"2024-03-01T09:30:00Z"}"#;
        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Untitled");
        assert!(record.is_queued());
    }

    #[test]
    fn test_mark_watched_overwrites_anticipation() {
        let mut queued = MovieRecord::queued("m1", "Heat", added());
        queued.fun = 5;
        let at = Utc.with_ymd_and_hms(2024, 4, 2, 20, 0, 0).unwrap();

        let watched = queued.mark_watched(2, at);
        assert_eq!(watched.status, MovieStatus::Watched);
        assert_eq!(watched.fun, 2);
        assert_eq!(watched.date_watched, Some(at));
        assert_eq!(watched.date_added, queued.date_added);
        assert!(watched.validate().is_ok());
    }

    #[test]
    fn test_matches_query() {
        let mut record = MovieRecord::queued("m1", "The Thing", added());
        record.director = Some("John Carpenter".to_string());
        record.actors = Some("Kurt Russell, Keith David".to_string());

        assert!(record.matches_query("thing"));
        assert!(record.matches_query("carpenter"));
        assert!(record.matches_query("keith"));
        assert!(record.matches_query(""));
        assert!(!record.matches_query("alien"));
    }

    #[test]
    fn test_validate() {
        let mut record = MovieRecord::queued("m1", "Heat", added());
        assert!(record.validate().is_ok());

        record.priority = 7;
        assert_eq!(
            record.validate(),
            Err(RecordError::PriorityOutOfRange { id: "m1".to_string(), value: 7 })
        );

        record.priority = 3;
        record.status = MovieStatus::Watched;
        assert_eq!(record.validate(), Err(RecordError::MissingWatchDate { id: "m1".to_string() }));

        record.status = MovieStatus::Queued;
        record.date_watched = Some(added());
        assert_eq!(record.validate(), Err(RecordError::UnexpectedWatchDate { id: "m1".to_string() }));
    }
}
