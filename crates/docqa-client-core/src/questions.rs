use serde::{Deserialize, Serialize};

pub const LAST_QUESTION_MESSAGE: &str = "At least one question is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionListError {
    #[error("At least one question is required")]
    LastQuestion,
    #[error("question {0} does not exist")]
    UnknownQuestion(QuestionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionEntry {
    pub id: QuestionId,
    pub text: String,
}

/// Ordered list of question inputs. Never empty: the last entry cannot be
/// removed and restoring an empty list keeps a single blank input.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionList {
    entries: Vec<QuestionEntry>,
    #[serde(skip)]
    next_id: u64,
    #[serde(skip)]
    revision: u64,
}

impl Default for QuestionList {
    fn default() -> Self {
        Self {
            entries: vec![QuestionEntry {
                id: QuestionId(1),
                text: String::new(),
            }],
            next_id: 2,
            revision: 0,
        }
    }
}

impl QuestionList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    /// Bumped whenever inputs are added, removed or replaced. Text edits do
    /// not change it, so the shell only rebuilds the container on structure
    /// changes and keeps focus while the user types.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add(&mut self) -> QuestionId {
        self.push_entry(String::new())
    }

    pub fn remove(&mut self, id: QuestionId) -> Result<(), QuestionListError> {
        let Some(index) = self.position(id) else {
            return Err(QuestionListError::UnknownQuestion(id));
        };
        if self.entries.len() <= 1 {
            return Err(QuestionListError::LastQuestion);
        }
        self.entries.remove(index);
        self.revision = self.revision.saturating_add(1);
        Ok(())
    }

    pub fn set_text(&mut self, id: QuestionId, text: &str) -> Result<(), QuestionListError> {
        let Some(index) = self.position(id) else {
            return Err(QuestionListError::UnknownQuestion(id));
        };
        if let Some(entry) = self.entries.get_mut(index) {
            entry.text = text.to_string();
        }
        Ok(())
    }

    pub fn text(&self, id: QuestionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.text.as_str())
    }

    /// Raw texts in display order, blanks included.
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.text.clone()).collect()
    }

    /// Replaces every input with one prefilled input per saved text.
    /// An empty `texts` leaves the list untouched.
    pub fn replace_all(&mut self, texts: &[String]) -> bool {
        if texts.is_empty() {
            return false;
        }
        self.entries.clear();
        for text in texts {
            self.push_entry(text.clone());
        }
        true
    }

    fn push_entry(&mut self, text: String) -> QuestionId {
        let id = QuestionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push(QuestionEntry { id, text });
        self.revision = self.revision.saturating_add(1);
        id
    }

    fn position(&self, id: QuestionId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_single_blank_input() {
        let list = QuestionList::default();
        assert_eq!(list.len(), 1);
        assert_eq!(list.texts(), vec![String::new()]);
    }

    #[test]
    fn add_appends_to_the_end_with_fresh_ids() {
        let mut list = QuestionList::default();
        let first = list.entries()[0].id;
        let second = list.add();
        let third = list.add();

        assert_ne!(first, second);
        assert_ne!(second, third);
        let ids: Vec<_> = list.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[test]
    fn removing_the_last_input_is_rejected() {
        let mut list = QuestionList::default();
        let only = list.entries()[0].id;
        let revision = list.revision();

        let error = list.remove(only).expect_err("last input must stay");
        assert_eq!(error, QuestionListError::LastQuestion);
        assert_eq!(error.to_string(), LAST_QUESTION_MESSAGE);
        assert_eq!(list.len(), 1);
        assert_eq!(list.revision(), revision);
    }

    #[test]
    fn removing_one_of_many_keeps_the_rest_in_order() {
        let mut list = QuestionList::default();
        let first = list.entries()[0].id;
        let second = list.add();
        let third = list.add();
        list.set_text(first, "Q1").expect("first exists");
        list.set_text(second, "Q2").expect("second exists");
        list.set_text(third, "Q3").expect("third exists");

        list.remove(second).expect("remove middle");
        assert_eq!(list.texts(), vec!["Q1".to_string(), "Q3".to_string()]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut list = QuestionList::default();
        let missing = QuestionId(99);
        assert_eq!(
            list.set_text(missing, "x"),
            Err(QuestionListError::UnknownQuestion(missing))
        );
        list.add();
        assert_eq!(
            list.remove(missing),
            Err(QuestionListError::UnknownQuestion(missing))
        );
    }

    #[test]
    fn replace_all_ignores_empty_input() {
        let mut list = QuestionList::default();
        assert!(!list.replace_all(&[]));
        assert_eq!(list.len(), 1);

        assert!(list.replace_all(&["Q1".to_string(), String::new(), "Q3".to_string()]));
        assert_eq!(
            list.texts(),
            vec!["Q1".to_string(), String::new(), "Q3".to_string()]
        );
    }

    #[test]
    fn text_edits_do_not_bump_revision() {
        let mut list = QuestionList::default();
        let id = list.entries()[0].id;
        let revision = list.revision();
        list.set_text(id, "typing").expect("entry exists");
        assert_eq!(list.revision(), revision);
        assert_eq!(list.text(id), Some("typing"));
    }
}
