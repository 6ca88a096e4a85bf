//! Route patterns and how each category matches them.

use std::fmt;

use regex::Regex;

use crate::registry::table::Category;

/// A route key: an exact string or a regular expression.
#[derive(Debug, Clone)]
pub enum Pattern {
    Exact(String),
    Regex(Regex),
}

impl Pattern {
    pub fn exact(value: impl Into<String>) -> Self {
        Pattern::Exact(value.into())
    }

    pub fn regex(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern::Regex)
    }

    /// Regex matching every control emitted under a stateful host.
    pub fn state_prefix(host_id: &str) -> Result<Self, regex::Error> {
        Self::regex(&format!("^state:{}\\.", regex::escape(host_id)))
    }

    /// The string or regex source.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Exact(value) => value,
            Pattern::Regex(regex) => regex.as_str(),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Regex(_))
    }

    /// Whether this is exactly the string `id`.
    pub fn is_exact(&self, id: &str) -> bool {
        matches!(self, Pattern::Exact(value) if value == id)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.is_regex() == other.is_regex() && self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Exact(value) => f.write_str(value),
            Pattern::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Pattern::Exact(value.to_string())
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        Pattern::Exact(value)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern::Regex(regex)
    }
}

/// A pattern compiled for the category it was registered under.
#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    Exact(String),
    Substring(String),
    Regex(Regex),
}

impl Matcher {
    /// Option string patterns match a whole `_`-delimited segment so that a
    /// control id like `state:ns/Form.city_ns/Cities` reaches `ns/Cities`.
    /// Message string patterns match anywhere in the text.
    pub(crate) fn compile(category: Category, pattern: &Pattern) -> Result<Self, regex::Error> {
        let matcher = match (category, pattern) {
            (_, Pattern::Regex(regex)) => Matcher::Regex(regex.clone()),
            (Category::Option, Pattern::Exact(value)) => Matcher::Regex(Regex::new(&format!(
                "(^|_){}($|_)",
                regex::escape(value)
            ))?),
            (Category::Message, Pattern::Exact(value)) => Matcher::Substring(value.clone()),
            (_, Pattern::Exact(value)) => Matcher::Exact(value.clone()),
        };
        Ok(matcher)
    }

    pub(crate) fn matches(&self, subject: &str) -> bool {
        match self {
            Matcher::Exact(value) => value == subject,
            Matcher::Substring(value) => subject.contains(value.as_str()),
            Matcher::Regex(regex) => regex.is_match(subject),
        }
    }
}
