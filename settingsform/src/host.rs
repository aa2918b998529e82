//! Host collaborators: page listing and the outer form.
//!
//! The form renderer never decides what pages exist or how a submission is
//! authenticated. It asks these traits, and the host answers.

use serde::{Deserialize, Serialize};

use crate::escape::{esc_attr, esc_html};
use crate::resolve::match_key;

/// Arguments for a page-selection control.
#[derive(Debug, Clone, Copy)]
pub struct PageDropdown<'a> {
    /// Full form name, e.g. `opts[landing_page]`.
    pub name: &'a str,
    pub id: &'a str,
    /// Currently selected page id; `"0"` when none is stored.
    pub selected: &'a str,
    /// Sentinel option offered for "no page".
    pub none_label: &'a str,
    pub none_value: &'a str,
}

/// Renders a `<select>` listing the host's pages.
pub trait PageDirectory: Send + Sync {
    fn dropdown(&self, args: &PageDropdown<'_>) -> String;
}

/// A page known to [`StaticPages`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: u64,
    pub title: String,
    /// Nesting level, rendered as a `level-N` class and indentation.
    #[serde(default)]
    pub depth: usize,
}

/// Fixed page list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticPages {
    pub pages: Vec<Page>,
}

impl StaticPages {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn page(mut self, id: u64, title: impl Into<String>) -> Self {
        self.pages.push(Page {
            id,
            title: title.into(),
            depth: 0,
        });
        self
    }
}

impl PageDirectory for StaticPages {
    fn dropdown(&self, args: &PageDropdown<'_>) -> String {
        let ids: Vec<String> = self.pages.iter().map(|page| page.id.to_string()).collect();
        let selected = match_key(ids.iter().map(String::as_str), args.selected);
        let mut out = format!(
            r#"<select name="{}" id="{}">"#,
            esc_attr(args.name),
            esc_attr(args.id)
        );
        out.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            esc_attr(args.none_value),
            esc_html(args.none_label)
        ));
        for (page, id) in self.pages.iter().zip(&ids) {
            out.push_str(&format!(
                r#"<option class="level-{}" value="{}"{}>{}{}</option>"#,
                page.depth,
                id,
                selected_attr(selected == Some(id.as_str())),
                "&nbsp;&nbsp;&nbsp;".repeat(page.depth),
                esc_html(&page.title)
            ));
        }
        out.push_str("</select>");
        out
    }
}

/// Supplies the parts of the outer `<form>` that belong to the host.
pub trait FormHost {
    /// Hidden fields naming the option group and guarding the submission.
    fn settings_fields(&self, group_id: &str) -> String;

    /// The submit control.
    fn submit_button(&self, label: &str) -> String;
}

/// A host with a fixed submission token.
#[derive(Debug, Clone, Default)]
pub struct StaticFormHost {
    pub nonce: String,
}

impl StaticFormHost {
    pub fn new(nonce: impl Into<String>) -> Self {
        Self {
            nonce: nonce.into(),
        }
    }
}

impl FormHost for StaticFormHost {
    fn settings_fields(&self, group_id: &str) -> String {
        format!(
            concat!(
                r#"<input type="hidden" name="option_page" value="{}" />"#,
                r#"<input type="hidden" name="action" value="update" />"#,
                r#"<input type="hidden" name="_nonce" value="{}" />"#
            ),
            esc_attr(group_id),
            esc_attr(&self.nonce)
        )
    }

    fn submit_button(&self, label: &str) -> String {
        format!(
            r#"<p class="submit"><input type="submit" name="submit" id="submit" class="button button-primary" value="{}" /></p>"#,
            esc_attr(label)
        )
    }
}

pub(crate) fn selected_attr(on: bool) -> &'static str {
    if on {
        r#" selected="selected""#
    } else {
        ""
    }
}

pub(crate) fn checked_attr(on: bool) -> &'static str {
    if on {
        r#" checked="checked""#
    } else {
        ""
    }
}
