//! Field rendering: one field plus its resolved value in, markup out.
//!
//! Every attribute value goes through [`esc_attr`], every piece of text
//! between tags through [`esc_html`]. Controls are named
//! `option_name[field_name]` so a submission arrives as one bundle.

use settingsform_fields::{Choices, Field, FieldKind, InputType};

use crate::error::{FormError, Result};
use crate::escape::{esc_attr, esc_html};
use crate::host::{checked_attr, selected_attr, PageDirectory, PageDropdown};
use crate::resolve::ResolvedValue;

/// Renders fields. Pure: same inputs, same markup.
pub struct FieldRenderer<'a> {
    pages: &'a dyn PageDirectory,
    page_none_label: &'a str,
    page_none_value: &'a str,
}

impl<'a> FieldRenderer<'a> {
    pub fn new(
        pages: &'a dyn PageDirectory,
        page_none_label: &'a str,
        page_none_value: &'a str,
    ) -> Self {
        Self {
            pages,
            page_none_label,
            page_none_value,
        }
    }

    /// Render `field` showing `value`, named under `option_name`.
    ///
    /// Unknown field types produce no markup. Callback failures are returned,
    /// never swallowed.
    pub fn render(&self, field: &Field, value: &ResolvedValue, option_name: &str) -> Result<String> {
        let name = format!("{option_name}[{}]", field.name);
        let mut out = String::new();

        match &field.kind {
            FieldKind::Input(input) => {
                self.input(&mut out, field, *input, &name, value);
                description(&mut out, field);
            }
            FieldKind::Textarea => {
                out.push_str(&format!(
                    r#"<textarea name="{}" id="{}" placeholder="{}" rows="5" cols="60" class="{}">{}</textarea>"#,
                    esc_attr(&name),
                    esc_attr(&field.id),
                    esc_attr(&field.placeholder),
                    esc_attr(&field.class),
                    esc_html(value.as_text())
                ));
                description(&mut out, field);
            }
            FieldKind::Hidden => {
                out.push_str(&format!(
                    r#"<input type="hidden" name="{}" id="{}" value="{}" />"#,
                    esc_attr(&name),
                    esc_attr(&field.id),
                    esc_attr(value.as_text())
                ));
            }
            FieldKind::Select(choices) => {
                self.select(&mut out, field, choices, &name, value);
                description(&mut out, field);
            }
            FieldKind::Radio(choices) => {
                let selected = value.selected(choices);
                for (key, label) in choices {
                    out.push_str(&format!(
                        r#"<label><input type="radio" name="{}" id="{}_{}" value="{}" class="{}"{} /> {}</label><br />"#,
                        esc_attr(&name),
                        esc_attr(&field.id),
                        esc_attr(key),
                        esc_attr(key),
                        esc_attr(&field.class),
                        checked_attr(selected == Some(key.as_str())),
                        esc_html(label)
                    ));
                }
                description(&mut out, field);
            }
            FieldKind::Checkbox => {
                out.push_str(&format!(
                    r#"<label><input type="checkbox" name="{}" id="{}" value="1" class="{}"{} /> {}</label>"#,
                    esc_attr(&name),
                    esc_attr(&field.id),
                    esc_attr(&field.class),
                    checked_attr(value.flag() == 1),
                    esc_html(&field.description)
                ));
            }
            FieldKind::Checkboxes(choices) => {
                let class = if field.class.is_empty() {
                    String::new()
                } else {
                    format!(r#" class="{}""#, esc_attr(&field.class))
                };
                let members = value.members(choices);
                for (key, label) in choices {
                    out.push_str(&format!(
                        r#"<label><input type="checkbox" name="{}[]" id="{}_{}" value="{}"{}{} /> {}</label><br />"#,
                        esc_attr(&name),
                        esc_attr(&field.id),
                        esc_attr(key),
                        esc_attr(key),
                        class,
                        checked_attr(members.contains(&key.as_str())),
                        esc_html(label)
                    ));
                }
                description(&mut out, field);
            }
            FieldKind::DropdownPages => {
                out.push_str(&self.pages.dropdown(&PageDropdown {
                    name: &name,
                    id: &field.id,
                    selected: value.as_text(),
                    none_label: self.page_none_label,
                    none_value: self.page_none_value,
                }));
                description(&mut out, field);
            }
            FieldKind::Callback {
                callback, param, ..
            } => {
                let markup = callback(field, param.as_ref()).map_err(|source| FormError::Callback {
                    field: field.id.clone(),
                    source,
                })?;
                out.push_str(&markup);
            }
            FieldKind::Unknown(_) => {}
        }

        Ok(out)
    }

    fn input(
        &self,
        out: &mut String,
        field: &Field,
        input: InputType,
        name: &str,
        value: &ResolvedValue,
    ) {
        let class = if field.class.is_empty() {
            "regular-text".to_string()
        } else {
            format!("regular-text {}", esc_attr(&field.class))
        };
        out.push_str(&format!(
            r#"<input type="{}" name="{}" id="{}" value="{}" placeholder="{}" class="{}" />"#,
            input.as_str(),
            esc_attr(name),
            esc_attr(&field.id),
            esc_attr(value.as_text()),
            esc_attr(&field.placeholder),
            class
        ));
    }

    fn select(
        &self,
        out: &mut String,
        field: &Field,
        choices: &Choices,
        name: &str,
        value: &ResolvedValue,
    ) {
        out.push_str(&format!(
            r#"<select name="{}" id="{}" class="{}">"#,
            esc_attr(name),
            esc_attr(&field.id),
            esc_attr(&field.class)
        ));
        let selected = value.selected(choices);
        for (key, label) in choices {
            out.push_str(&format!(
                r#"<option value="{}"{}>{}</option>"#,
                esc_attr(key),
                selected_attr(selected == Some(key.as_str())),
                esc_html(label)
            ));
        }
        out.push_str("</select>");
    }
}

fn description(out: &mut String, field: &Field) {
    if !field.description.is_empty() {
        out.push_str(&format!(
            r#"<p class="description">{}</p>"#,
            esc_html(&field.description)
        ));
    }
}
