//! The settings form: binds a [`Schema`] to the host.
//!
//! [`SettingsForm::on_init`] hands the host a [`SettingsRegistry`]; the
//! registry's page pass calls back into [`SettingsForm::render_page_section_description`]
//! and [`SettingsForm::render_field`], and submissions come back through
//! [`SettingsForm::sanitize`].

use settingsform_fields::{
    FieldKind, OptionBundle, Schema, SchemaBuilder, Section, UnknownFieldPolicy,
};
use tracing::{debug, trace, warn};

use crate::config::FormConfig;
use crate::error::Result;
use crate::escape::{esc_attr, esc_html};
use crate::host::{FormHost, PageDirectory, StaticPages};
use crate::registry::{
    FieldContext, FieldRegistration, SectionRegistration, SettingRegistration, SettingsRegistry,
};
use crate::render::FieldRenderer;
use crate::resolve::resolve;
use crate::store::OptionStore;

/// A validated schema plus everything needed to render it.
pub struct SettingsForm {
    schema: Schema,
    config: FormConfig,
    pages: Box<dyn PageDirectory>,
}

impl SettingsForm {
    /// Wrap an already built schema. Pages default to an empty list.
    pub fn new(schema: Schema, config: FormConfig) -> Self {
        Self {
            schema,
            config,
            pages: Box::new(StaticPages::default()),
        }
    }

    /// Build the schema with the configured unknown-field policy.
    pub fn from_builder(builder: SchemaBuilder, config: FormConfig) -> Result<Self> {
        let schema = builder
            .unknown_field_policy(config.unknown_field_policy)
            .build()?;
        Ok(Self::new(schema, config))
    }

    /// Use `pages` for `dropdown_pages` fields.
    pub fn with_pages(mut self, pages: impl PageDirectory + 'static) -> Self {
        self.pages = Box::new(pages);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Register every option group, section and field.
    pub fn on_init(&self) -> SettingsRegistry {
        let mut registry = SettingsRegistry::new();

        for group in self.schema.option_groups() {
            registry.register_setting(SettingRegistration {
                group_id: group.group_id.clone(),
                option_name: group.option_name.clone(),
                sanitized: group.has_sanitizer(),
            });
        }

        for section in self.schema.sections() {
            registry.add_section(SectionRegistration {
                id: section.id.clone(),
                title: section.title.clone(),
                page: section.page.clone(),
            });
            for field in &section.fields {
                registry.add_field(FieldRegistration {
                    id: field.id.clone(),
                    title: field.title.clone(),
                    page: section.page.clone(),
                    section_id: section.id.clone(),
                    context: FieldContext {
                        page: section.page.clone(),
                        section_id: section.id.clone(),
                        field_id: field.id.clone(),
                        option_name: section.option_name.clone(),
                        label_for: field.label_for.clone(),
                    },
                });
            }
        }

        debug!(
            settings = registry.settings().len(),
            "settings form registered"
        );
        registry
    }

    /// The section's description as a paragraph; nothing when the section
    /// is unknown or has no description.
    pub fn render_section_description(&self, section_id: &str) -> String {
        description_markup(self.schema.section(section_id))
    }

    /// Like [`Self::render_section_description`], but only for the section
    /// declared on `page`. Section ids are unique per page, not globally.
    pub fn render_page_section_description(&self, page: &str, section_id: &str) -> String {
        description_markup(self.schema.section_on_page(page, section_id))
    }

    /// The stored bundle for `option_name`, or the group's defaults when
    /// nothing was saved yet.
    pub fn current_bundle(&self, option_name: &str, store: &dyn OptionStore) -> Result<OptionBundle> {
        if let Some(bundle) = store.get(option_name)? {
            return Ok(bundle);
        }
        Ok(self
            .schema
            .option_group(option_name)
            .map(|group| group.defaults.clone())
            .unwrap_or_default())
    }

    /// Render one registered field with its current value.
    pub fn render_field(&self, context: &FieldContext, store: &dyn OptionStore) -> Result<String> {
        let Some(field) = self
            .schema
            .section_on_page(&context.page, &context.section_id)
            .and_then(|section| section.field(&context.field_id))
        else {
            warn!(
                page = %context.page,
                section = %context.section_id,
                field = %context.field_id,
                "field is not in the schema"
            );
            return Ok(String::new());
        };

        if let FieldKind::Unknown(type_name) = &field.kind {
            if self.schema.unknown_field_policy() == UnknownFieldPolicy::Warn {
                warn!(field = %field.id, type_name = %type_name, "unknown field type, nothing rendered");
            }
            return Ok(String::new());
        }

        let bundle = self.current_bundle(&context.option_name, store)?;
        let value = resolve(field, &bundle);
        trace!(field = %field.id, ?value, "resolved field value");

        self.renderer().render(field, &value, &context.option_name)
    }

    /// Render every field of one section, without the surrounding table.
    pub fn render_section(
        &self,
        page: &str,
        section_id: &str,
        store: &dyn OptionStore,
    ) -> Result<String> {
        let Some(section) = self.schema.section_on_page(page, section_id) else {
            return Ok(String::new());
        };
        let mut out = String::new();
        for field in &section.fields {
            out.push_str(&self.render_field(
                &FieldContext {
                    page: section.page.clone(),
                    section_id: section.id.clone(),
                    field_id: field.id.clone(),
                    option_name: section.option_name.clone(),
                    label_for: field.label_for.clone(),
                },
                store,
            )?);
        }
        Ok(out)
    }

    /// Run the group's sanitizer over a submitted bundle. Identity when the
    /// option has no group or the group no sanitizer.
    pub fn sanitize(&self, option_name: &str, raw: OptionBundle) -> OptionBundle {
        match self.schema.option_group(option_name) {
            Some(group) => group.sanitize(raw),
            None => raw,
        }
    }

    /// The complete settings page for `page`: outer form, host fields, every
    /// section, submit control. Empty when nothing is registered for `page`.
    pub fn render_settings_page(
        &self,
        page: &str,
        registry: &SettingsRegistry,
        store: &dyn OptionStore,
        host: &dyn FormHost,
    ) -> Result<String> {
        let Some(first) = registry.sections(page).next() else {
            debug!(page, "no sections registered for page");
            return Ok(String::new());
        };
        let group_id = self
            .schema
            .section_on_page(page, &first.id)
            .and_then(|section| self.schema.option_group(&section.option_name))
            .map(|group| group.group_id.as_str())
            .unwrap_or_default();
        debug!(page, group = group_id, "rendering settings page");

        let mut out = format!(
            r#"<form action="{}" method="post">"#,
            esc_attr(&self.config.form_action)
        );
        out.push_str(&host.settings_fields(group_id));
        out.push_str(&registry.do_settings_sections(page, self, store)?);
        out.push_str(&host.submit_button(&self.config.submit_label));
        out.push_str("</form>");
        Ok(out)
    }

    fn renderer(&self) -> FieldRenderer<'_> {
        FieldRenderer::new(
            self.pages.as_ref(),
            &self.config.page_none_label,
            &self.config.page_none_value,
        )
    }
}

fn description_markup(section: Option<&Section>) -> String {
    match section {
        Some(section) if !section.description.is_empty() => {
            format!("<p>{}</p>", esc_html(&section.description))
        }
        _ => String::new(),
    }
}
