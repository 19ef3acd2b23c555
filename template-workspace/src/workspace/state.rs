use serde::{Deserialize, Serialize};

use crate::notifications::Confirmation;
use crate::session::SessionGuard;

use super::actions::PendingAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
}

/// The editor's in-progress `{name, content}` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Draft {
    pub name: String,
    pub content: String,
}

impl Draft {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    fn from_template(template: &Template) -> Self {
        Self::new(template.name.clone(), template.content.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    pub generated_html: String,
    pub replacements_count: u32,
}

impl GenerationResult {
    pub fn summary(&self) -> String {
        format!("{} placeholder(s) replaced.", self.replacements_count)
    }
}

/// In-memory cache of the template collection plus the current selection and
/// draft. No network access; the controller drives every mutation.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
    selection: Option<String>,
    draft: Draft,
    // Bumped whenever the store itself replaces the draft, so a renderer can
    // tell its own edits apart from a select/clear.
    draft_revision: u64,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection wholesale. A selection that no longer exists
    /// reverts to none and the editor clears.
    pub fn replace_all(&mut self, templates: Vec<Template>) {
        self.templates = templates;

        let dangling = self
            .selection
            .as_deref()
            .is_some_and(|id| !self.templates.iter().any(|t| t.id == id));

        if dangling {
            log::info!("Selected template vanished from collection, clearing editor");
            self.clear();
        }
    }

    /// Selects `id` and loads it into the draft. Unknown ids are ignored. The
    /// revision only moves when the draft content actually changes.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(template) = self.templates.iter().find(|t| t.id == id) else {
            log::debug!("Ignoring selection of unknown template {}", id);
            return false;
        };

        let draft = Draft::from_template(template);
        self.selection = Some(template.id.clone());
        if self.draft != draft {
            self.draft = draft;
            self.draft_revision += 1;
        }
        true
    }

    /// Adopts `id` as the selection without touching the draft. Used after a
    /// create, before the reload that makes the id visible.
    pub(crate) fn adopt_selection(&mut self, id: String) {
        self.selection = Some(id);
    }

    pub fn clear(&mut self) {
        self.selection = None;
        self.draft = Draft::default();
        self.draft_revision += 1;
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.selection.as_deref() == Some(id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Editor input. Does not bump the revision.
    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    pub fn draft_revision(&self) -> u64 {
        self.draft_revision
    }
}

/// Everything the controller owns, built once at startup and threaded
/// through every operation.
pub struct AppState {
    pub session: SessionGuard,
    pub store: TemplateStore,
    pub confirmation: Confirmation<PendingAction>,
    pub result: Option<GenerationResult>,
}

impl AppState {
    pub fn new(session: SessionGuard) -> Self {
        Self {
            session,
            store: TemplateStore::new(),
            confirmation: Confirmation::default(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, name: &str) -> Template {
        Template {
            id: id.to_string(),
            name: name.to_string(),
            content: format!("<h1>{}</h1>", name),
        }
    }

    #[test]
    fn test_select_populates_draft() {
        let mut store = TemplateStore::new();
        store.replace_all(vec![template("a", "Invoice"), template("b", "Letter")]);

        assert!(store.select("b"));
        assert_eq!(store.selection(), Some("b"));
        assert_eq!(store.draft().name, "Letter");
        assert!(store.is_active("b"));
        assert!(!store.is_active("a"));
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut store = TemplateStore::new();
        store.replace_all(vec![template("a", "Invoice")]);
        store.select("a");
        let revision = store.draft_revision();

        assert!(!store.select("zzz"));
        assert_eq!(store.selection(), Some("a"));
        assert_eq!(store.draft_revision(), revision);
    }

    #[test]
    fn test_reselecting_unchanged_template_keeps_revision() {
        let mut store = TemplateStore::new();
        store.replace_all(vec![template("a", "Invoice"), template("b", "Letter")]);
        store.select("a");
        let revision = store.draft_revision();

        store.select("a");
        assert_eq!(store.draft_revision(), revision);

        store.select("b");
        assert_eq!(store.draft_revision(), revision + 1);
    }

    #[test]
    fn test_replace_all_drops_dangling_selection() {
        let mut store = TemplateStore::new();
        store.replace_all(vec![template("a", "Invoice"), template("b", "Letter")]);
        store.select("a");

        store.replace_all(vec![template("b", "Letter")]);
        assert_eq!(store.selection(), None);
        assert_eq!(store.draft(), &Draft::default());
    }

    #[test]
    fn test_replace_all_keeps_live_selection_and_draft() {
        let mut store = TemplateStore::new();
        store.replace_all(vec![template("a", "Invoice")]);
        store.select("a");
        store.set_draft(Draft::new("Invoice v2", "<p>edited</p>"));

        store.replace_all(vec![template("a", "Invoice"), template("c", "Memo")]);
        assert_eq!(store.selection(), Some("a"));
        assert_eq!(store.draft().name, "Invoice v2");
    }

    #[test]
    fn test_clear_resets_selection_and_draft() {
        let mut store = TemplateStore::new();
        store.replace_all(vec![template("a", "Invoice")]);
        store.select("a");

        store.clear();
        assert_eq!(store.selection(), None);
        assert!(store.draft().name.is_empty());
        assert!(store.draft().content.is_empty());
    }

    #[test]
    fn test_generation_summary() {
        let result = GenerationResult {
            generated_html: "<p>hi</p>".to_string(),
            replacements_count: 2,
        };
        assert_eq!(result.summary(), "2 placeholder(s) replaced.");
    }
}
