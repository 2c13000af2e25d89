//! Conceptual help topics.
//!
//! Topics are pages of documentation that are not commands, such as the date
//! formats accepted by `--since`. They are reachable through `help <topic>`
//! and listed by `help topics`.

use deunicode::deunicode;
use std::collections::HashMap;

use crate::error::TopicError;

/// Keyword that lists every topic instead of naming one.
pub const TOPICS_KEYWORD: &str = "topics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub title: String,
    pub content: String,
}

impl Topic {
    /// Creates a new topic.
    /// If name is None, it is generated from the title.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        name: Option<String>,
    ) -> Self {
        let title = title.into();
        let name = name.unwrap_or_else(|| slugify(&title));
        Self {
            name,
            title,
            content: content.into(),
        }
    }
}

fn slugify(title: &str) -> String {
    let slug: String = deunicode(title)
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    slug.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Registry of help topics keyed by name.
#[derive(Debug, Default, Clone)]
pub struct TopicRegistry {
    topics: HashMap<String, Topic>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a topic.
    ///
    /// Fails if the name is taken or equals [`TOPICS_KEYWORD`].
    pub fn add_topic(&mut self, topic: Topic) -> Result<(), TopicError> {
        if topic.name == TOPICS_KEYWORD {
            return Err(TopicError::Reserved(topic.name));
        }
        if self.topics.contains_key(&topic.name) {
            return Err(TopicError::Duplicate(topic.name));
        }
        self.topics.insert(topic.name.clone(), topic);
        Ok(())
    }

    pub fn get_topic(&self, name: &str) -> Option<&Topic> {
        self.topics.get(name)
    }

    /// All topics sorted by name.
    pub fn list_topics(&self) -> Vec<&Topic> {
        let mut topics: Vec<&Topic> = self.topics.values().collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        topics
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }
}
