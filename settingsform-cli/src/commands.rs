//! Subcommand implementations.

use std::path::Path;

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use settingsform::{
    esc_html, FormConfig, JsonFileStore, MemoryStore, OptionStore, Page, SettingsForm,
    StaticFormHost, StaticPages,
};
use settingsform_fields::{OptionBundle, Schema, SchemaFile};
use tracing::{debug, info};

/// Load a schema file with every named callback and sanitizer bound to a
/// placeholder.
pub fn load_form(schema: &Path, config: FormConfig) -> Result<SettingsForm> {
    let source = std::fs::read_to_string(schema)
        .with_context(|| format!("Failed to read schema {}", schema.display()))?;
    let file: SchemaFile = serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Failed to parse schema {}", schema.display()))?;

    let mut builder = Schema::builder();
    for name in file.callback_names() {
        let placeholder = format!("<!-- callback: {} -->", esc_html(name));
        builder = builder.callback(name, move |_, _| Ok(placeholder.clone()));
    }
    for name in file.sanitizer_names() {
        debug!(sanitizer = name, "sanitizer bound to identity");
        builder = builder.sanitizer(name, |bundle: OptionBundle| bundle);
    }

    let form = SettingsForm::from_builder(builder.declarations(file), config)
        .with_context(|| format!("Invalid schema {}", schema.display()))?;
    Ok(form)
}

pub fn validate(form: &SettingsForm) -> Result<()> {
    let schema = form.schema();
    let fields: usize = schema.sections().iter().map(|s| s.fields.len()).sum();
    info!(pages = schema.pages().len(), "schema valid");
    println!(
        "Schema OK: {} option group(s), {} section(s), {} field(s) on {} page(s)",
        schema.option_groups().len(),
        schema.sections().len(),
        fields,
        schema.pages().len()
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct FieldRow<'a> {
    page: &'a str,
    section: &'a str,
    id: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    name: &'a str,
    option: &'a str,
}

pub fn fields(form: &SettingsForm, page: Option<&str>, json: bool) -> Result<()> {
    let rows: Vec<FieldRow<'_>> = form
        .schema()
        .sections()
        .iter()
        .filter(|section| page.map_or(true, |p| section.page == p))
        .flat_map(|section| {
            section.fields.iter().map(move |field| FieldRow {
                page: &section.page,
                section: &section.id,
                id: &field.id,
                type_name: field.type_name(),
                name: &field.name,
                option: &section.option_name,
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No fields.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Page", "Section", "Field", "Type", "Name", "Option"]);
    for row in &rows {
        table.add_row(vec![
            row.page,
            row.section,
            row.id,
            row.type_name,
            row.name,
            row.option,
        ]);
    }
    println!("{table}");
    println!("\n{} field(s).", rows.len());
    Ok(())
}

pub fn render(
    form: SettingsForm,
    page: &str,
    options: Option<&Path>,
    pages: Option<&Path>,
    nonce: &str,
) -> Result<()> {
    if form.schema().sections_for_page(page).next().is_none() {
        bail!("No sections are registered for page '{page}'");
    }

    let form = match pages {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read pages {}", path.display()))?;
            let list: Vec<Page> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse pages {}", path.display()))?;
            form.with_pages(StaticPages::new(list))
        }
        None => form,
    };

    let store: Box<dyn OptionStore> = match options {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    let registry = form.on_init();
    let html = form
        .render_settings_page(page, &registry, store.as_ref(), &StaticFormHost::new(nonce))
        .with_context(|| format!("Failed to render page '{page}'"))?;
    println!("{html}");
    Ok(())
}
