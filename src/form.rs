// In-memory state of one editing session

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::layout::{resolve_layout, StructureMode};
use crate::schema::SectionKey;
use crate::AppError;

/// Current text of every section plus the selected structure mode.
///
/// Every [`SectionKey`] always has a value; unset sections hold the empty
/// string. Switching modes never touches stored text, so values for blocks
/// outside the active layout survive until the mode comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperForm {
    sections: BTreeMap<SectionKey, String>,
    mode: StructureMode,
    modified: bool,
}

impl Default for PaperForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PaperForm {
    pub fn new() -> Self {
        Self {
            sections: SectionKey::ALL
                .into_iter()
                .map(|key| (key, String::new()))
                .collect(),
            mode: StructureMode::default(),
            modified: false,
        }
    }

    pub fn value(&self, key: SectionKey) -> &str {
        self.sections.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Replaces the whole value of `key`.
    pub fn set_value(&mut self, key: SectionKey, text: impl Into<String>) {
        let text = text.into();
        debug!(section = %key, len = text.len(), "section updated");
        self.sections.insert(key, text);
        self.modified = true;
    }

    /// Replaces `key` with its template. Returns false, leaving the value
    /// alone, for sections without one.
    pub fn insert_template(&mut self, key: SectionKey) -> bool {
        match key.template() {
            Some(template) => {
                self.set_value(key, template);
                true
            }
            None => {
                debug!(section = %key, "no template for section");
                false
            }
        }
    }

    pub fn mode(&self) -> StructureMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: StructureMode) {
        debug!(from = %self.mode, to = %mode, "structure mode changed");
        self.mode = mode;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Sections an editor shows for the current mode, in display order.
    pub fn active_keys(&self) -> Vec<SectionKey> {
        let mut keys = vec![
            SectionKey::Title,
            SectionKey::Abstract,
            SectionKey::Introduction,
            SectionKey::RelatedWork,
        ];
        keys.extend_from_slice(resolve_layout(self.mode));
        keys.push(SectionKey::Conclusion);
        keys
    }

    /// Fills sections from a JSON object of `{"sectionKey": "text"}` pairs.
    /// Sections missing from the object keep their current value.
    pub fn apply_draft_json(&mut self, json: &str) -> Result<(), AppError> {
        let draft: BTreeMap<SectionKey, String> = serde_json::from_str(json)
            .map_err(|e| AppError::DraftError(format!("Invalid JSON: {}", e)))?;
        for (key, text) in draft {
            self.set_value(key, text);
        }
        Ok(())
    }

    pub fn load_draft(&mut self, path: &Path) -> Result<(), AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::DraftError(format!("{}: {}", path.display(), e)))?;
        self.apply_draft_json(&content)
    }
}
