use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use time::{Date, OffsetDateTime, macros::format_description};
use uuid::Uuid;

/// Longest title the log form accepts, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Stable identifier of a logged entry.
///
/// New ids are UUIDs, but any stored string is accepted as an id so that logs
/// written by older clients keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    #[error("title must not be empty")]
    Empty,
    #[error("title is {0} characters long, the limit is {max}", max = MAX_TITLE_LEN)]
    TooLong(usize),
}

/// A trimmed, non-empty entry title of at most [`MAX_TITLE_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Title {
    type Err = TitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(TitleError::Empty);
        }

        let len = trimmed.chars().count();
        if len > MAX_TITLE_LEN {
            return Err(TitleError::TooLong(len));
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

/// A calendar date, written as `YYYY-MM-DD`.
///
/// Ordering matches the ordering of the written form, so sorting days and
/// sorting their strings agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Day(Date);

impl Day {
    pub fn date(self) -> Date {
        self.0
    }

    pub fn previous(self) -> Option<Self> {
        self.0.previous_day().map(Self)
    }
}

impl From<Date> for Day {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for Day {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, format_description!("[year]-[month]-[day]")).map(Self)
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One logged adventure. Entries are never edited once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub icon: String,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Calendar day of `created_at` as seen when the entry was logged. Never
    /// recomputed.
    #[serde(rename = "date")]
    pub day: Day,
}

impl Entry {
    pub fn new(title: Title, icon: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id: EntryId::generate(),
            title: title.into(),
            icon: icon.into(),
            created_at,
            day: Day::from(created_at.date()),
        }
    }
}

/// The current local time, or UTC when the local offset can't be determined.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Local offset unavailable, falling back to UTC");
        OffsetDateTime::now_utc()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_title_is_trimmed() -> TestResult {
        let title: Title = "  walked to the lake \n".parse()?;
        assert_eq!(title.as_str(), "walked to the lake");
        Ok(())
    }

    #[test]
    fn test_title_rejects_blank() {
        assert_eq!("".parse::<Title>(), Err(TitleError::Empty));
        assert_eq!("   \t".parse::<Title>(), Err(TitleError::Empty));
    }

    #[test]
    fn test_title_length_counts_characters() {
        let at_limit = "é".repeat(MAX_TITLE_LEN);
        assert!(at_limit.parse::<Title>().is_ok());

        let over = "a".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            over.parse::<Title>(),
            Err(TitleError::TooLong(MAX_TITLE_LEN + 1))
        );
    }

    #[test]
    fn test_day_display_and_parse() -> TestResult {
        let day: Day = "2024-06-09".parse()?;
        assert_eq!(day.date(), date!(2024 - 06 - 09));
        assert_eq!(day.to_string(), "2024-06-09");
        assert_eq!(day.previous().map(|d| d.to_string()).as_deref(), Some("2024-06-08"));
        assert!("2024-6-9".parse::<Day>().is_err());
        assert!("yesterday".parse::<Day>().is_err());
        Ok(())
    }

    #[test]
    fn test_day_order_matches_string_order() -> TestResult {
        let mut days: Vec<Day> = ["2024-06-10", "2023-12-31", "2024-01-02"]
            .iter()
            .map(|s| s.parse())
            .collect::<Result<_, _>>()?;
        days.sort();

        let mut strings: Vec<String> = days.iter().map(Day::to_string).collect();
        let sorted = strings.clone();
        strings.sort();
        assert_eq!(strings, sorted);
        Ok(())
    }

    #[test]
    fn test_new_entry_freezes_day_in_creation_offset() -> TestResult {
        let created_at = datetime!(2024-06-10 23:30 -05:00);
        let entry = Entry::new("Night swim".parse()?, "🏊", created_at);

        assert_eq!(entry.day.to_string(), "2024-06-10");
        assert_eq!(entry.title, "Night swim");
        assert_eq!(entry.icon, "🏊");
        assert!(!entry.id.as_str().is_empty());
        Ok(())
    }

    #[test]
    fn test_new_entries_get_distinct_ids() -> TestResult {
        let now = datetime!(2024-06-10 12:00 UTC);
        let a = Entry::new("a".parse()?, "☕", now);
        let b = Entry::new("b".parse()?, "☕", now);
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[test]
    fn test_entry_uses_stored_field_names() -> TestResult {
        let entry = Entry::new("Coffee".parse()?, "☕", datetime!(2024-06-10 08:15 UTC));
        let value = serde_json::to_value(&entry)?;

        assert_eq!(value["title"], "Coffee");
        assert_eq!(value["icon"], "☕");
        assert_eq!(value["timestamp"], "2024-06-10T08:15:00Z");
        assert_eq!(value["date"], "2024-06-10");
        assert!(value.get("created_at").is_none());
        Ok(())
    }

    #[test]
    fn test_entry_reads_records_from_older_clients() -> TestResult {
        let raw = r#"{
            "id": "1718000000000",
            "title": "Morning walk",
            "icon": "🚶",
            "timestamp": "2024-06-10T06:13:20.123Z",
            "date": "2024-06-10"
        }"#;
        let entry: Entry = serde_json::from_str(raw)?;

        assert_eq!(entry.id.as_str(), "1718000000000");
        assert_eq!(entry.created_at, datetime!(2024-06-10 06:13:20.123 UTC));
        assert_eq!(entry.day.to_string(), "2024-06-10");
        Ok(())
    }
}
