use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Draft persisted across reloads. The auth token is never part of it.
///
/// Each field is decoded on its own: a broken `questions` value does not
/// cost the saved URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFormState {
    #[serde(default, deserialize_with = "lenient_text")]
    pub document_url: String,
    #[serde(default, deserialize_with = "lenient_questions")]
    pub questions: Vec<String>,
}

fn text_of(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(text_of)
}

/// Anything other than an array restores no questions; `null` entries
/// restore as blank inputs.
fn lenient_questions<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let questions = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(text_of).collect(),
        _ => Vec::new(),
    };
    Ok(questions)
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft storage failed: {0}")]
    Storage(String),
    #[error("failed to serialize draft: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("stored draft is malformed: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// String key-value storage the draft lives in (`localStorage` in the
/// browser).
pub trait DraftStore {
    type Error: std::fmt::Display;

    fn read_item(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn write_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

pub fn encode_draft(draft: &DraftFormState) -> Result<String, DraftError> {
    serde_json::to_string(draft).map_err(DraftError::Serialize)
}

pub fn decode_draft(raw: &str) -> Result<DraftFormState, DraftError> {
    serde_json::from_str(raw).map_err(DraftError::Deserialize)
}

pub fn read_draft<S: DraftStore>(
    store: &S,
    key: &str,
) -> Result<Option<DraftFormState>, DraftError> {
    let raw = store
        .read_item(key)
        .map_err(|error| DraftError::Storage(error.to_string()))?;
    raw.as_deref().map(decode_draft).transpose()
}

pub fn write_draft<S: DraftStore>(
    store: &S,
    key: &str,
    draft: &DraftFormState,
) -> Result<(), DraftError> {
    let encoded = encode_draft(draft)?;
    store
        .write_item(key, &encoded)
        .map_err(|error| DraftError::Storage(error.to_string()))
}

/// Page-load restore. Absent, unreadable or malformed drafts yield `None`
/// and are only logged.
pub fn load_draft_nonfatal<S: DraftStore>(store: &S, key: &str) -> Option<DraftFormState> {
    match read_draft(store, key) {
        Ok(Some(draft)) => {
            tracing::debug!(key, questions = draft.questions.len(), "restored form draft");
            Some(draft)
        }
        Ok(None) => None,
        Err(error) => {
            tracing::warn!(key, %error, "failed to load saved form data");
            None
        }
    }
}

pub fn save_draft_nonfatal<S: DraftStore>(store: &S, key: &str, draft: &DraftFormState) {
    if let Err(error) = write_draft(store, key, draft) {
        tracing::warn!(key, %error, "failed to save form data");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::DraftStore;

    #[derive(Debug, Default)]
    pub struct MemoryDraftStore {
        pub items: RefCell<HashMap<String, String>>,
        pub fail_writes: bool,
    }

    impl DraftStore for MemoryDraftStore {
        type Error = String;

        fn read_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn write_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err("quota exceeded".to_string());
            }
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
