//! Interactive builder session.
//!
//! Owns the ordered field list the drag-and-drop editor mutates. Each
//! mutation re-serializes the whole list; there are no partial updates.

use crate::domain::field::{Field, FieldKind};
use crate::domain::slug::normalize;
use crate::wire;
use crate::Result;

/// Marker prefix for a field whose name has not been assigned yet.
const UNASSIGNED_PREFIX: &str = "new_field_";

const DEFAULT_LABEL: &str = "New Text Field";
const DEFAULT_PLACEHOLDER: &str = "Enter text here";
const DEFAULT_WIDTH: &str = "100%";
const DEFAULT_BORDER: &str = "1px solid #ccc";

/// One editing session over a single form's field list.
///
/// The counter is scoped to the session, so concurrently edited forms
/// cannot interfere with each other's temporary names.
#[derive(Debug, Default)]
pub struct BuilderSession {
    fields: Vec<Field>,
    counter: u32,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a persisted wire payload.
    pub fn from_wire(json: &str) -> Self {
        Self {
            fields: wire::from_wire(json),
            counter: 0,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Append a new field with the editor defaults and an unassigned
    /// name marker. Returns the new field's position.
    pub fn add_field(&mut self) -> usize {
        let serial = self.counter;
        self.counter += 1;
        self.fields.push(Field {
            label: DEFAULT_LABEL.to_string(),
            kind: FieldKind::Text,
            name: format!("{}{}", UNASSIGNED_PREFIX, serial),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            width: DEFAULT_WIDTH.to_string(),
            border: DEFAULT_BORDER.to_string(),
            ..Field::default()
        });
        self.fields.len() - 1
    }

    /// Update a field's label.
    ///
    /// While the name still carries the unassigned marker it is
    /// regenerated from the label on every edit; once a real name has
    /// been assigned it never changes again, so submissions keep the
    /// field names integrations already rely on.
    pub fn update_label(&mut self, index: usize, label: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.label = label.to_string();
            if field.name.contains(UNASSIGNED_PREFIX) {
                let slug = normalize(label);
                if !slug.is_empty() {
                    field.name = slug;
                }
            }
        }
    }

    pub fn set_kind(&mut self, index: usize, kind: FieldKind) {
        if let Some(field) = self.fields.get_mut(index) {
            field.kind = kind;
        }
    }

    /// Mutable access for the remaining attribute edits (placeholder,
    /// required, description, styling, options). Label edits should go
    /// through [`update_label`](Self::update_label) so the name
    /// assignment rule applies.
    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.get_mut(index)
    }

    pub fn remove_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.fields.remove(index);
        }
    }

    /// Move a field to a new position (drag-and-drop reorder).
    pub fn move_field(&mut self, from: usize, to: usize) {
        if from >= self.fields.len() {
            return;
        }
        let field = self.fields.remove(from);
        let to = to.min(self.fields.len());
        self.fields.insert(to, field);
    }

    /// Serialize the current list, resolving any still-unassigned names
    /// first: slug of the label, or `field_<position>` when the label
    /// yields nothing.
    pub fn to_wire(&mut self) -> Result<String> {
        self.resolve_names();
        wire::to_wire(&self.fields)
    }

    fn resolve_names(&mut self) {
        for (index, field) in self.fields.iter_mut().enumerate() {
            if field.name.is_empty() || field.name.contains(UNASSIGNED_PREFIX) {
                let slug = normalize(&field.label);
                field.name = if slug.is_empty() {
                    format!("field_{}", index)
                } else {
                    slug
                };
            }
        }
    }
}
