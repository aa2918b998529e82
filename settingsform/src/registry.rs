//! The settings registry: what `on_init` registered, and the page pass that
//! walks it.
//!
//! This stands in for a host's hook table. It is an ordinary value owned by
//! the application, not process-wide state, so two forms never see each
//! other's registrations.

use settingsform_fields::OptionBundle;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::escape::{esc_attr, esc_html};
use crate::form::SettingsForm;
use crate::store::OptionStore;

/// A persisted option and the group that saves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRegistration {
    pub group_id: String,
    pub option_name: String,
    /// Whether a custom sanitizer runs on save (identity otherwise).
    pub sanitized: bool,
}

/// A section shown on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistration {
    pub id: String,
    pub title: String,
    pub page: String,
}

/// Everything `render_field` needs to find and bind a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    pub page: String,
    pub section_id: String,
    pub field_id: String,
    pub option_name: String,
    /// Wrap the row title in `<label for="...">`.
    pub label_for: Option<String>,
}

/// A field row inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistration {
    pub id: String,
    pub title: String,
    pub page: String,
    pub section_id: String,
    pub context: FieldContext,
}

/// Registrations in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    settings: Vec<SettingRegistration>,
    sections: Vec<SectionRegistration>,
    fields: Vec<FieldRegistration>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_setting(&mut self, registration: SettingRegistration) {
        self.settings.push(registration);
    }

    pub fn add_section(&mut self, registration: SectionRegistration) {
        self.sections.push(registration);
    }

    pub fn add_field(&mut self, registration: FieldRegistration) {
        self.fields.push(registration);
    }

    pub fn settings(&self) -> &[SettingRegistration] {
        &self.settings
    }

    pub fn setting(&self, option_name: &str) -> Option<&SettingRegistration> {
        self.settings.iter().find(|s| s.option_name == option_name)
    }

    /// Sections registered for `page`.
    pub fn sections<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a SectionRegistration> {
        self.sections.iter().filter(move |s| s.page == page)
    }

    /// Field rows registered for one section of `page`.
    pub fn fields<'a>(
        &'a self,
        page: &'a str,
        section_id: &'a str,
    ) -> impl Iterator<Item = &'a FieldRegistration> {
        self.fields
            .iter()
            .filter(move |f| f.page == page && f.section_id == section_id)
    }

    /// Render every section registered for `page`: heading, description, then
    /// a table with one row per field.
    pub fn do_settings_sections(
        &self,
        page: &str,
        form: &SettingsForm,
        store: &dyn OptionStore,
    ) -> Result<String> {
        let mut out = String::new();
        for section in self.sections(page) {
            if !section.title.is_empty() {
                out.push_str(&format!("<h2>{}</h2>", esc_html(&section.title)));
            }
            out.push_str(&form.render_page_section_description(page, &section.id));

            let mut rows = self.fields(page, &section.id).peekable();
            if rows.peek().is_none() {
                continue;
            }
            out.push_str(r#"<table class="form-table" role="presentation"><tbody>"#);
            for row in rows {
                let title = match &row.context.label_for {
                    Some(target) => format!(
                        r#"<label for="{}">{}</label>"#,
                        esc_attr(target),
                        esc_html(&row.title)
                    ),
                    None => esc_html(&row.title).into_owned(),
                };
                out.push_str(&format!(
                    r#"<tr><th scope="row">{}</th><td>{}</td></tr>"#,
                    title,
                    form.render_field(&row.context, store)?
                ));
            }
            out.push_str("</tbody></table>");
        }
        Ok(out)
    }

    /// Sanitize a submitted bundle and persist it with a single write.
    ///
    /// Returns the bundle as stored.
    pub fn save(
        &self,
        form: &SettingsForm,
        option_name: &str,
        raw: OptionBundle,
        store: &mut dyn OptionStore,
    ) -> Result<OptionBundle> {
        if self.setting(option_name).is_none() {
            return Err(FormError::UnregisteredOption {
                option_name: option_name.to_string(),
            });
        }
        let clean = form.sanitize(option_name, raw);
        store.set(option_name, clean.clone())?;
        debug!(option = option_name, keys = clean.len(), "option bundle saved");
        Ok(clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(section_id: &str, field_id: &str) -> FieldContext {
        FieldContext {
            page: "p".into(),
            section_id: section_id.into(),
            field_id: field_id.into(),
            option_name: "opts".into(),
            label_for: None,
        }
    }

    #[test]
    fn lookups_are_scoped_by_page_and_section() {
        let mut registry = SettingsRegistry::new();
        for (id, page) in [("s1", "p"), ("s2", "p"), ("s1", "q")] {
            registry.add_section(SectionRegistration {
                id: id.into(),
                title: id.to_uppercase(),
                page: page.into(),
            });
        }
        for (section, field) in [("s1", "a"), ("s2", "b"), ("s1", "c")] {
            registry.add_field(FieldRegistration {
                id: field.into(),
                title: field.into(),
                page: "p".into(),
                section_id: section.into(),
                context: context(section, field),
            });
        }

        let on_p: Vec<_> = registry.sections("p").map(|s| s.id.as_str()).collect();
        assert_eq!(on_p, ["s1", "s2"]);
        let in_s1: Vec<_> = registry.fields("p", "s1").map(|f| f.id.as_str()).collect();
        assert_eq!(in_s1, ["a", "c"]);
        assert_eq!(registry.fields("q", "s1").count(), 0);
    }

    #[test]
    fn setting_lookup_by_option_name() {
        let mut registry = SettingsRegistry::new();
        registry.register_setting(SettingRegistration {
            group_id: "g1".into(),
            option_name: "opts".into(),
            sanitized: false,
        });
        assert_eq!(registry.setting("opts").unwrap().group_id, "g1");
        assert!(registry.setting("other").is_none());
    }
}
