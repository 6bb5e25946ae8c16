//! Book records, the canonical genre set, and candidate validation.

use std::fmt;
use std::str::FromStr;

use booklog_core::error::ValidationError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// The fixed set of genres a book can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genre {
    /// Used when no genre was supplied.
    #[default]
    Unknown,
    /// Fiction.
    Fiction,
    /// Non-fiction.
    NonFiction,
    /// Mystery.
    Mystery,
    /// Science fiction.
    ScienceFiction,
    /// Fantasy.
    Fantasy,
    /// Biography.
    Biography,
    /// Self-help.
    SelfHelp,
}

impl Genre {
    /// Every genre, in picker order.
    pub const ALL: [Self; 8] = [
        Self::Unknown,
        Self::Fiction,
        Self::NonFiction,
        Self::Mystery,
        Self::ScienceFiction,
        Self::Fantasy,
        Self::Biography,
        Self::SelfHelp,
    ];

    /// The stored and displayed name of the genre.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
            Self::Mystery => "Mystery",
            Self::ScienceFiction => "Science Fiction",
            Self::Fantasy => "Fantasy",
            Self::Biography => "Biography",
            Self::SelfHelp => "Self-Help",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownGenre(s.to_owned()))
    }
}

/// A validated, finished book.
///
/// `genre` is kept as the stored string so that lists written with other
/// genre names still load and tally as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Genre name.
    #[serde(default = "unknown_genre")]
    pub genre: String,
    /// Page count, always positive.
    #[serde(deserialize_with = "deserialize_pages")]
    pub pages: u32,
}

fn unknown_genre() -> String {
    Genre::Unknown.as_str().to_owned()
}

/// Reads stored page text the way older clients accepted it: the leading
/// run of digits after optional whitespace and sign, so `"12.5"` is 12 and
/// `"1e3"` is 1. Returns `None` when there are no leading digits or the
/// value does not fit `u32`.
fn leading_pages(text: &str) -> Option<u32> {
    let rest = text.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let value: u32 = rest[..digits].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

/// Accepts `412` as well as `"412"`: older lists stored the raw text input.
fn deserialize_pages<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPages {
        Number(u32),
        Text(String),
    }

    let pages = match RawPages::deserialize(deserializer)? {
        RawPages::Number(n) => n,
        RawPages::Text(text) => leading_pages(&text)
            .ok_or_else(|| de::Error::custom(format!("pages {text:?} is not a number")))?,
    };
    if pages == 0 {
        return Err(de::Error::custom("pages must be positive"));
    }
    Ok(pages)
}

/// Unvalidated input for a new book, as collected by a form.
///
/// Every field is optional; `pages` may arrive as a JSON string or number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookCandidate {
    /// Book title.
    #[serde(default)]
    pub title: Option<String>,
    /// Book author.
    #[serde(default)]
    pub author: Option<String>,
    /// Genre name; defaults to `Unknown`.
    #[serde(default)]
    pub genre: Option<String>,
    /// Page count as entered.
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub pages: Option<String>,
}

impl BookCandidate {
    /// Builds a candidate from form text.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Option<&str>,
        pages: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            genre: genre.map(str::to_owned),
            pages: Some(pages.into()),
        }
    }
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(
        Option::<RawText>::deserialize(deserializer)?.map(|raw| match raw {
            RawText::Text(text) => text,
            RawText::Integer(n) => n.to_string(),
            RawText::Float(f) => f.to_string(),
        }),
    )
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn parse_pages(text: &str) -> Result<u32, ValidationError> {
    match text.parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).map_err(|_| ValidationError::InvalidPages(text.to_owned())),
        _ => Err(ValidationError::InvalidPages(text.to_owned())),
    }
}

/// Validates a candidate and turns it into a `BookRecord`.
///
/// Title and author are trimmed. The genre defaults to `Unknown` when absent
/// or blank.
///
/// # Errors
///
/// - `ValidationError::MissingField` if title, author or pages is empty or
///   absent (checked in that order).
/// - `ValidationError::InvalidPages` if pages is not a positive integer.
/// - `ValidationError::UnknownGenre` if the genre is not in [`Genre::ALL`].
pub fn validate(candidate: &BookCandidate) -> Result<BookRecord, ValidationError> {
    let title = required(candidate.title.as_deref(), "title")?;
    let author = required(candidate.author.as_deref(), "author")?;
    let pages = parse_pages(required(candidate.pages.as_deref(), "pages")?)?;
    let genre = match candidate.genre.as_deref().map(str::trim) {
        None | Some("") => Genre::Unknown,
        Some(name) => name.parse()?,
    };

    Ok(BookRecord {
        title: title.to_owned(),
        author: author.to_owned(),
        genre: genre.as_str().to_owned(),
        pages,
    })
}
