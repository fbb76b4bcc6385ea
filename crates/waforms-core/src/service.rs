//! Application service: save, delete, render, and submit use cases.

use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::domain::form::{FormDefinition, FormRef};
use crate::encode::{build_deep_link, FieldValue};
use crate::render::{esc_html, render};
use crate::store::FormStore;
use crate::wire;
use crate::{FormsError, Result};

/// Token scope used when the save targets a form that has no id yet.
const NEW_FORM_SCOPE: &str = "new";

/// The acting user, as verified by the host environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct Actor {
    pub can_manage_forms: bool,
}

impl Actor {
    pub fn manager() -> Self {
        Self {
            can_manage_forms: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            can_manage_forms: false,
        }
    }
}

/// Issues and verifies single-purpose freshness tokens bound to one
/// operation on one form.
pub struct TokenIssuer {
    secret: String,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Token for one (action, scope) pair.
    pub fn issue(&self, action: &str, scope: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(action.as_bytes());
        hasher.update(b":");
        hasher.update(scope.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn verify(&self, token: &str, action: &str, scope: &str) -> bool {
        token == self.issue(action, scope)
    }
}

/// Save command assembled by the host surface.
#[derive(Clone, Debug)]
pub struct SaveForm {
    pub form_ref: FormRef,
    pub name: String,
    pub phone: String,
    /// The builder's wire payload, decoded leniently.
    pub fields_json: String,
}

/// Form application service.
pub struct FormService {
    store: Arc<dyn FormStore>,
    tokens: TokenIssuer,
}

impl FormService {
    pub fn new(store: Arc<dyn FormStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Capability plus freshness token, checked before the store is
    /// touched. Absence of either rejects the whole request.
    fn authorize(&self, actor: &Actor, token: &str, action: &str, scope: &str) -> Result<()> {
        if !actor.can_manage_forms {
            return Err(FormsError::Authorization(
                "manage-forms capability required".to_string(),
            ));
        }
        if !self.tokens.verify(token, action, scope) {
            return Err(FormsError::Authorization(
                "stale or missing operation token".to_string(),
            ));
        }
        Ok(())
    }

    /// Save (create or fully replace) a form definition.
    pub async fn save_form(
        &self,
        actor: &Actor,
        token: &str,
        command: SaveForm,
    ) -> Result<FormDefinition> {
        let scope = match &command.form_ref {
            FormRef::New => NEW_FORM_SCOPE,
            FormRef::Existing(id) => id.as_str(),
        };
        self.authorize(actor, token, "save", scope)?;

        if command.name.trim().is_empty() {
            return Err(FormsError::Validation("form name is required".to_string()));
        }
        if command.phone.trim().is_empty() {
            return Err(FormsError::Validation(
                "WhatsApp number is required".to_string(),
            ));
        }

        let id = match command.form_ref {
            FormRef::New => format!("form_{}", Uuid::new_v4().simple()),
            FormRef::Existing(id) => id,
        };
        let def = FormDefinition {
            id: id.clone(),
            name: command.name,
            phone: command.phone,
            fields: wire::from_wire(&command.fields_json),
            updated_at: Utc::now(),
        };

        self.store
            .put(&id, def.clone())
            .await
            .map_err(|e| FormsError::Store(e.to_string()))?;
        info!("saved form {} ({} fields)", id, def.fields.len());
        Ok(def)
    }

    /// Delete a stored form. Unknown ids leave the store unchanged.
    pub async fn delete_form(&self, actor: &Actor, token: &str, id: &str) -> Result<()> {
        self.authorize(actor, token, "delete", id)?;

        let existing = self
            .store
            .get(id)
            .await
            .map_err(|e| FormsError::Store(e.to_string()))?;
        if existing.is_none() {
            return Err(FormsError::NotFound(format!("form {} does not exist", id)));
        }

        self.store
            .delete(id)
            .await
            .map_err(|e| FormsError::Store(e.to_string()))?;
        info!("deleted form {}", id);
        Ok(())
    }

    pub async fn get_form(&self, id: &str) -> Result<Option<FormDefinition>> {
        self.store
            .get(id)
            .await
            .map_err(|e| FormsError::Store(e.to_string()))
    }

    pub async fn list_forms(&self) -> Result<Vec<FormDefinition>> {
        self.store
            .list()
            .await
            .map_err(|e| FormsError::Store(e.to_string()))
    }

    /// Find a stored form by its public routing tag.
    ///
    /// Tags are recomputed per definition on every lookup; nothing is
    /// cached, so a rename takes effect immediately.
    pub async fn find_by_tag(&self, tag: &str) -> Result<Option<FormDefinition>> {
        let forms = self.list_forms().await?;
        Ok(forms.into_iter().find(|form| form.routing_tag() == tag))
    }

    /// Render the form behind `tag`.
    ///
    /// An unknown tag renders nothing for anonymous visitors; an actor
    /// holding the manage capability sees a visible diagnostic instead.
    pub async fn render_by_tag(&self, actor: &Actor, tag: &str) -> Result<String> {
        match self.find_by_tag(tag).await? {
            Some(def) => Ok(render(&def)),
            None if actor.can_manage_forms => Ok(format!(
                "<p><strong>WhatsApp Form Error: form with tag \"{}\" not found. Check your forms list.</strong></p>",
                esc_html(tag),
            )),
            None => Ok(String::new()),
        }
    }

    /// Turn a submission into a WhatsApp deep link.
    pub async fn submit(&self, tag: &str, entries: &[(String, FieldValue)]) -> Result<String> {
        let def = self
            .find_by_tag(tag)
            .await?
            .ok_or_else(|| FormsError::NotFound(format!("no form with tag {}", tag)))?;
        build_deep_link(&def.phone, &def.name, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryFormStore;

    fn service() -> FormService {
        FormService::new(
            Arc::new(InMemoryFormStore::new()),
            TokenIssuer::new("test-secret"),
        )
    }

    fn save_command(name: &str, phone: &str) -> SaveForm {
        SaveForm {
            form_ref: FormRef::New,
            name: name.into(),
            phone: phone.into(),
            fields_json: r#"[{"label": "Your Name", "type": "text", "name": "your-name"}]"#.into(),
        }
    }

    fn new_token(service: &FormService) -> String {
        service.tokens().issue("save", "new")
    }

    #[tokio::test]
    async fn test_save_and_lookup_by_tag() {
        let service = service();
        let token = new_token(&service);
        let def = service
            .save_form(&Actor::manager(), &token, save_command("Quote", "+123"))
            .await
            .unwrap();

        assert!(def.id.starts_with("form_"));
        assert_eq!(def.fields.len(), 1);

        let found = service
            .find_by_tag("wp_whatsapp_quote_form_quote")
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, def.id);
    }

    #[tokio::test]
    async fn test_save_rejects_missing_capability() {
        let service = service();
        let token = new_token(&service);
        let err = service
            .save_form(&Actor::anonymous(), &token, save_command("Quote", "+123"))
            .await
            .unwrap_err();
        assert!(matches!(err, FormsError::Authorization(_)));
        assert!(service.list_forms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_stale_token() {
        let service = service();
        let err = service
            .save_form(&Actor::manager(), "bogus", save_command("Quote", "+123"))
            .await
            .unwrap_err();
        assert!(matches!(err, FormsError::Authorization(_)));
        assert!(service.list_forms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_phone_leaves_prior_definition() {
        let service = service();
        let token = new_token(&service);
        let def = service
            .save_form(&Actor::manager(), &token, save_command("Quote", "+123"))
            .await
            .unwrap();

        let update_token = service.tokens().issue("save", &def.id);
        let err = service
            .save_form(
                &Actor::manager(),
                &update_token,
                SaveForm {
                    form_ref: FormRef::Existing(def.id.clone()),
                    name: "Quote".into(),
                    phone: "  ".into(),
                    fields_json: "[]".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FormsError::Validation(_)));

        let stored = service.get_form(&def.id).await.unwrap().unwrap();
        assert_eq!(stored.phone, "+123");
        assert_eq!(stored.fields.len(), 1);
    }

    #[tokio::test]
    async fn test_existing_ref_keeps_id_and_replaces() {
        let service = service();
        let token = new_token(&service);
        let def = service
            .save_form(&Actor::manager(), &token, save_command("Quote", "+123"))
            .await
            .unwrap();

        let update_token = service.tokens().issue("save", &def.id);
        let updated = service
            .save_form(
                &Actor::manager(),
                &update_token,
                SaveForm {
                    form_ref: FormRef::Existing(def.id.clone()),
                    name: "Quote v2".into(),
                    phone: "+456".into(),
                    fields_json: "[]".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, def.id);
        assert!(updated.fields.is_empty());
        assert_eq!(service.list_forms().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let service = service();
        let token = new_token(&service);
        let def = service
            .save_form(&Actor::manager(), &token, save_command("Quote", "+123"))
            .await
            .unwrap();

        let delete_token = service.tokens().issue("delete", "form_missing");
        let err = service
            .delete_form(&Actor::manager(), &delete_token, "form_missing")
            .await
            .unwrap_err();
        assert!(matches!(err, FormsError::NotFound(_)));
        assert_eq!(service.list_forms().await.unwrap().len(), 1);

        let delete_token = service.tokens().issue("delete", &def.id);
        service
            .delete_form(&Actor::manager(), &delete_token, &def.id)
            .await
            .unwrap();
        assert!(service.list_forms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_render_unknown_tag_per_capability() {
        let service = service();

        let anonymous = service
            .render_by_tag(&Actor::anonymous(), "wp_whatsapp_quote_form_missing")
            .await
            .unwrap();
        assert!(anonymous.is_empty());

        let manager = service
            .render_by_tag(&Actor::manager(), "wp_whatsapp_quote_form_missing")
            .await
            .unwrap();
        assert!(manager.contains("WhatsApp Form Error"));
    }

    #[tokio::test]
    async fn test_submit_builds_deep_link() {
        let service = service();
        let token = new_token(&service);
        service
            .save_form(
                &Actor::manager(),
                &token,
                save_command("Quote", "+1 (234) 567-890"),
            )
            .await
            .unwrap();

        let entries = vec![(
            "full_name".to_string(),
            FieldValue::Single("Jane Doe".to_string()),
        )];
        let link = service
            .submit("wp_whatsapp_quote_form_quote", &entries)
            .await
            .unwrap();
        assert!(link.starts_with("https://wa.me/+1234567890?text="));
        assert!(link.contains("*full name:* Jane%20Doe%0A"));
    }

    #[tokio::test]
    async fn test_submit_without_phone_is_configuration_error() {
        // Definitions written by older tooling may carry an empty phone;
        // submission must stop instead of emitting a broken link.
        let store = Arc::new(InMemoryFormStore::new());
        let service = FormService::new(store.clone(), TokenIssuer::new("test-secret"));
        store
            .put(
                "form_1",
                FormDefinition {
                    id: "form_1".into(),
                    name: "Quote".into(),
                    phone: String::new(),
                    fields: vec![],
                    updated_at: Utc::now(),
                },
            )
            .await
            .unwrap();

        let err = service
            .submit("wp_whatsapp_quote_form_quote", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FormsError::Configuration(_)));
    }
}
