use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a movie sits in the user's collection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MovieStatus {
    /// Still in the to-watch queue
    #[serde(rename = "towatch")]
    Queued,
    /// Watched and rated
    #[serde(rename = "watched")]
    Watched,
}

impl MovieStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieStatus::Queued => "towatch",
            MovieStatus::Watched => "watched",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "towatch" | "to-watch" | "queued" => Ok(MovieStatus::Queued),
            "watched" => Ok(MovieStatus::Watched),
            _ => Err(ParseEnumError::new("status", s, "towatch, watched")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&MovieStatus::Queued).unwrap(), "\"towatch\"");
        assert_eq!("WATCHED".parse::<MovieStatus>().unwrap(), MovieStatus::Watched);
        assert_eq!("queued".parse::<MovieStatus>().unwrap(), MovieStatus::Queued);
        assert!("dropped".parse::<MovieStatus>().is_err());
    }
}
