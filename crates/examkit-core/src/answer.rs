//! Candidate answers.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::Duplicate;

/// One candidate answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    /// Positive identifier, unique within the owning question.
    pub id: u32,
    /// Display text.
    pub text: String,
}

impl Answer {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl Duplicate for Answer {
    fn duplicate(&self) -> Self {
        Answer::new(self.id, self.text.clone())
    }
}

impl Ord for Answer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for Answer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_is_equal_but_independent() {
        let original = Answer::new(3, "Paris");
        let mut copy = original.duplicate();
        assert_eq!(copy, original);

        copy.text.push_str(", France");
        assert_eq!(original.text, "Paris");
        assert_ne!(copy, original);
    }

    #[test]
    fn orders_by_id() {
        let mut answers = vec![
            Answer::new(3, "c"),
            Answer::new(1, "z"),
            Answer::new(2, "a"),
        ];
        answers.sort();
        let ids: Vec<u32> = answers.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn display_format() {
        assert_eq!(Answer::new(2, "False").to_string(), "2: False");
    }
}
