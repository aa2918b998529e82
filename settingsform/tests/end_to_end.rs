//! Whole-pipeline tests: schema in, markup and saved bundles out.

use settingsform::{
    FormConfig, FormError, JsonFileStore, MemoryStore, OptionStore, SettingsForm, StaticFormHost,
    StaticPages,
};
use settingsform_fields::{
    FieldDef, FieldType, OptionBundle, OptionGroupDef, OptionValue, Schema, SchemaBuilder,
    SchemaError, SectionDef,
};
use tempfile::TempDir;

fn one_field(field: FieldDef) -> SchemaBuilder {
    Schema::builder()
        .option_group(OptionGroupDef::new("g1", "opts"))
        .section(SectionDef::new("s1", "General", "page", "opts").field(field))
}

fn render(builder: SchemaBuilder, store: &MemoryStore) -> String {
    let form = SettingsForm::from_builder(builder, FormConfig::default()).unwrap();
    form.render_section("page", "s1", store).unwrap()
}

#[test_log::test]
fn text_field_shows_stored_value() {
    let store = MemoryStore::new().with("opts", OptionBundle::new().with("color", "blue"));
    let html = render(
        one_field(FieldDef::new(FieldType::Text, "f1", "color", "Color")),
        &store,
    );

    assert!(html.starts_with(r#"<input type="text" name="opts[color]" id="f1" value="blue""#));
}

#[test_log::test]
fn checkboxes_check_stored_members() {
    let store = MemoryStore::new().with(
        "opts",
        OptionBundle::new().with("color", vec!["blue"]),
    );
    let html = render(
        one_field(
            FieldDef::new(FieldType::Checkboxes, "f1", "color", "Color")
                .choice("red", "Red")
                .choice("blue", "Blue"),
        ),
        &store,
    );

    assert!(html.contains(r#"name="opts[color][]" id="f1_blue" value="blue" checked="checked" /> Blue"#));
    assert!(html.contains(r#"name="opts[color][]" id="f1_red" value="red" /> Red"#));
    assert_eq!(html.matches("checked=").count(), 1);
}

#[test_log::test]
fn checkbox_states_follow_stored_flag() {
    let field = || FieldDef::new(FieldType::Checkbox, "f1", "enabled", "Enabled");

    for (stored, checked) in [
        (Some(OptionValue::from(1)), true),
        (Some(OptionValue::from("1")), true),
        (Some(OptionValue::from(0)), false),
        (None, false),
    ] {
        let mut bundle = OptionBundle::new();
        if let Some(value) = stored {
            bundle.insert("enabled", value);
        }
        let html = render(one_field(field()), &MemoryStore::new().with("opts", bundle));
        assert_eq!(html.contains(r#"checked="checked""#), checked, "{html}");
        assert!(html.contains(r#"value="1""#));
    }
}

#[test_log::test]
fn select_and_radio_mark_exactly_one_choice() {
    let store = MemoryStore::new().with("opts", OptionBundle::new().with("size", 2));

    let select = render(
        one_field(
            FieldDef::new(FieldType::Select, "f1", "size", "Size")
                .choice("1", "Small")
                .choice("2", "Medium")
                .choice("3", "Large"),
        ),
        &store,
    );
    assert_eq!(select.matches("selected=").count(), 1);
    assert!(select.contains(r#"<option value="2" selected="selected">Medium</option>"#));

    let radio = render(
        one_field(
            FieldDef::new(FieldType::Radio, "f1", "size", "Size")
                .choice("1", "Small")
                .choice("2", "Medium"),
        ),
        &store,
    );
    assert_eq!(radio.matches("checked=").count(), 1);
    assert!(radio.contains(r#"id="f1_2" value="2" class="" checked="checked""#));
}

#[test_log::test]
fn unmatched_selection_marks_nothing() {
    let store = MemoryStore::new().with("opts", OptionBundle::new().with("size", "huge"));
    let html = render(
        one_field(
            FieldDef::new(FieldType::Select, "f1", "size", "Size")
                .choice("s", "Small")
                .choice("m", "Medium"),
        ),
        &store,
    );
    assert!(!html.contains("selected="));
}

#[test_log::test]
fn empty_choices_fail_before_rendering() {
    let builder = one_field(FieldDef::new(FieldType::Select, "f1", "size", "Size"));
    let err = SettingsForm::from_builder(builder, FormConfig::default())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        FormError::Schema(SchemaError::EmptyChoices { ref field }) if field == "f1"
    ));
}

#[test_log::test]
fn callback_field_gets_param_and_errors_propagate() {
    let builder = Schema::builder()
        .option_group(OptionGroupDef::new("g1", "opts"))
        .section(
            SectionDef::new("s1", "General", "page", "opts")
                .field(
                    FieldDef::new(FieldType::Callback, "f1", "", "")
                        .callback("greet")
                        .param(serde_json::json!({"who": "world"})),
                )
                .field(FieldDef::new(FieldType::Callback, "f2", "", "").callback("broken")),
        )
        .callback("greet", |field, param| {
            let who = param.and_then(|p| p["who"].as_str()).unwrap_or("nobody");
            Ok(format!("<em id=\"{}\">hello {who}</em>", field.id))
        })
        .callback("broken", |_, _| Err("backend down".into()));
    let form = SettingsForm::from_builder(builder, FormConfig::default()).unwrap();
    let registry = form.on_init();
    let mut rows = registry.fields("page", "s1");

    let greet = rows.next().unwrap();
    let html = form.render_field(&greet.context, &MemoryStore::new()).unwrap();
    assert_eq!(html, r#"<em id="f1">hello world</em>"#);

    let broken = rows.next().unwrap();
    let err = form
        .render_field(&broken.context, &MemoryStore::new())
        .unwrap_err();
    assert!(matches!(err, FormError::Callback { ref field, .. } if field == "f2"));
}

#[test_log::test]
fn dropdown_pages_uses_host_pages() {
    let builder = one_field(FieldDef::new(
        FieldType::DropdownPages,
        "f1",
        "landing",
        "Landing page",
    ));
    let form = SettingsForm::from_builder(builder, FormConfig::default())
        .unwrap()
        .with_pages(StaticPages::default().page(4, "Home").page(9, "Blog"));
    let store = MemoryStore::new().with("opts", OptionBundle::new().with("landing", 9));

    let html = form.render_section("page", "s1", &store).unwrap();
    assert!(html.contains(r#"<select name="opts[landing]" id="f1">"#));
    assert!(html.contains(r#"<option value="-1">Choose a page</option>"#));
    assert!(html.contains(r#"value="9" selected="selected">Blog"#));
}

#[test_log::test]
fn save_sanitizes_and_writes_once() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("options.json");

    let builder = Schema::builder()
        .option_group(OptionGroupDef::new("g1", "opts").sanitizer("upper"))
        .sanitizer("upper", |raw: OptionBundle| {
            raw.iter()
                .map(|(k, v)| (k.clone(), v.to_text().to_uppercase().into()))
                .collect::<OptionBundle>()
        })
        .section(
            SectionDef::new("s1", "General", "page", "opts")
                .field(FieldDef::new(FieldType::Text, "f1", "color", "Color")),
        );
    let form = SettingsForm::from_builder(builder, FormConfig::default()).unwrap();
    let registry = form.on_init();

    let mut store = JsonFileStore::new(&path);
    let saved = registry
        .save(&form, "opts", OptionBundle::new().with("color", "teal"), &mut store)
        .unwrap();
    assert_eq!(saved.get("color").unwrap().to_text(), "TEAL");
    assert_eq!(store.get("opts").unwrap(), Some(saved));

    let html = form.render_section("page", "s1", &store).unwrap();
    assert!(html.contains(r#"value="TEAL""#));

    let err = registry
        .save(&form, "nope", OptionBundle::new(), &mut store)
        .unwrap_err();
    assert!(matches!(err, FormError::UnregisteredOption { .. }));
}

#[test_log::test]
fn yaml_schema_renders_full_page() {
    let yaml = r#"
option_groups:
  - group_id: site_group
    option_name: site
    defaults:
      tagline: "Just another site"
sections:
  - id: basics
    title: Basics
    description: Site-wide settings
    page: site-settings
    option_name: site
    fields:
      - id: tagline
        type: text
        name: tagline
        title: Tagline
        label_for: tagline
      - id: mode
        type: radio
        name: mode
        title: Mode
        choices:
          live: Live
          draft: Draft
        value: draft
"#;
    let builder = Schema::builder().yaml(yaml).unwrap();
    let form = SettingsForm::from_builder(builder, FormConfig::default()).unwrap();
    let registry = form.on_init();

    let html = form
        .render_settings_page(
            "site-settings",
            &registry,
            &MemoryStore::new(),
            &StaticFormHost::new("tok"),
        )
        .unwrap();

    assert!(html.contains(r#"name="option_page" value="site_group""#));
    assert!(html.contains("<h2>Basics</h2><p>Site-wide settings</p>"));
    assert!(html.contains(r#"value="Just another site""#));
    assert!(html.contains(r#"id="mode_draft" value="draft" class="" checked="checked""#));
    assert_eq!(html.matches("<tr>").count(), 2);
}
