//! Panel view: a pure function of a store snapshot.

use std::fmt::{self, Write as _};

use crate::links::{Category, LinkId, ListKey};
use crate::store::Snapshot;
use crate::url_model::shorten;

pub const PENDING_PLACEHOLDER: &str = "Right-click links and choose \"Send Link to Holder\"";
pub const EMPTY_PLACEHOLDER: &str = "No links here.";

/// Control offered on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Assign(Category),
    Discard,
    Remove(ListKey),
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Assign(Category::Model) => "Model",
            RowAction::Assign(Category::Footprint) => "Footprint",
            RowAction::Assign(Category::Symbol) => "Symbol",
            RowAction::Discard | RowAction::Remove(_) => "X",
        }
    }

    /// Hover text for the control.
    pub fn title(self) -> String {
        match self {
            RowAction::Assign(c) => format!("Move to {c}"),
            RowAction::Discard => "Discard this link".to_string(),
            RowAction::Remove(list) => format!("Remove this {list} link"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: LinkId,
    /// Shortened form for display.
    pub display: String,
    /// Full URL, shown on demand.
    pub url: String,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Rows(Vec<Row>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub list: ListKey,
    pub body: SectionBody,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self.list {
            ListKey::Pending => "Pending",
            ListKey::Model => "Model",
            ListKey::Footprint => "Footprint",
            ListKey::Symbol => "Symbol",
        }
    }

    pub fn len(&self) -> usize {
        match &self.body {
            SectionBody::Rows(rows) => rows.len(),
            SectionBody::Placeholder(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub folder_name: String,
    pub sections: Vec<Section>,
}

/// Builds the view for all four lists, pending first.
pub fn render(snapshot: &Snapshot, max_length: usize) -> PanelView {
    let sections = ListKey::ALL
        .into_iter()
        .map(|list| render_section(list, snapshot, max_length))
        .collect();
    PanelView {
        folder_name: snapshot.download_folder_name.clone(),
        sections,
    }
}

fn render_section(list: ListKey, snapshot: &Snapshot, max_length: usize) -> Section {
    let links = snapshot.list(list);
    if links.is_empty() {
        let placeholder = if list == ListKey::Pending {
            PENDING_PLACEHOLDER
        } else {
            EMPTY_PLACEHOLDER
        };
        return Section {
            list,
            body: SectionBody::Placeholder(placeholder),
        };
    }
    let rows = links
        .iter()
        .map(|link| Row {
            id: link.id,
            display: shorten(&link.url, max_length),
            url: link.url.clone(),
            actions: actions_for(list),
        })
        .collect();
    Section {
        list,
        body: SectionBody::Rows(rows),
    }
}

fn actions_for(list: ListKey) -> Vec<RowAction> {
    if list == ListKey::Pending {
        let mut actions: Vec<RowAction> = Category::ALL.into_iter().map(RowAction::Assign).collect();
        actions.push(RowAction::Discard);
        actions
    } else {
        vec![RowAction::Remove(list)]
    }
}

impl PanelView {
    pub fn section(&self, list: ListKey) -> Option<&Section> {
        self.sections.iter().find(|s| s.list == list)
    }

    /// Plain-text rendering; `full` adds the complete URL under each row.
    pub fn to_text(&self, full: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Download folder: {}", self.folder_name);
        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{} ({})", section.title(), section.len());
            match &section.body {
                SectionBody::Placeholder(text) => {
                    let _ = writeln!(out, "  {}", text);
                }
                SectionBody::Rows(rows) => {
                    for row in rows {
                        let actions: Vec<String> =
                            row.actions.iter().map(|a| format!("[{}]", a.label())).collect();
                        let _ = writeln!(
                            out,
                            "  {:<15} {:<52} {}",
                            row.id,
                            row.display,
                            actions.join(" ")
                        );
                        if full && row.display != row.url {
                            let _ = writeln!(out, "  {:<15} {}", "", row.url);
                        }
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkEntry;

    fn snapshot() -> Snapshot {
        Snapshot {
            pending: vec![LinkEntry::new(
                "https://example.com/very/long/path/to/some/deeply/nested/file.step",
                1,
            )],
            model: vec![LinkEntry::new("https://h/m.step", 2)],
            download_folder_name: "Parts".into(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn rows_carry_short_and_full_url() {
        let view = render(&snapshot(), 50);
        let pending = view.section(ListKey::Pending).unwrap();
        let SectionBody::Rows(rows) = &pending.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].display, "example.com/.../file.step");
        assert!(rows[0].url.starts_with("https://example.com/very"));
    }

    #[test]
    fn pending_rows_offer_three_categories_and_discard() {
        let view = render(&snapshot(), 50);
        let SectionBody::Rows(rows) = &view.section(ListKey::Pending).unwrap().body else {
            panic!("expected rows");
        };
        assert_eq!(
            rows[0].actions,
            vec![
                RowAction::Assign(Category::Model),
                RowAction::Assign(Category::Footprint),
                RowAction::Assign(Category::Symbol),
                RowAction::Discard,
            ]
        );
        let SectionBody::Rows(rows) = &view.section(ListKey::Model).unwrap().body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].actions, vec![RowAction::Remove(ListKey::Model)]);
        assert_eq!(rows[0].actions[0].title(), "Remove this model link");
    }

    #[test]
    fn empty_lists_show_placeholders() {
        let view = render(&Snapshot::default(), 50);
        assert_eq!(
            view.section(ListKey::Pending).unwrap().body,
            SectionBody::Placeholder(PENDING_PLACEHOLDER)
        );
        for list in ListKey::CATEGORIZED {
            assert_eq!(
                view.section(list).unwrap().body,
                SectionBody::Placeholder(EMPTY_PLACEHOLDER)
            );
        }
    }

    #[test]
    fn text_output_lists_sections_in_order() {
        let text = render(&snapshot(), 50).to_text(true);
        let pending = text.find("Pending (1)").unwrap();
        let model = text.find("Model (1)").unwrap();
        let symbol = text.find("Symbol (0)").unwrap();
        assert!(pending < model && model < symbol);
        assert!(text.starts_with("Download folder: Parts"));
        assert!(text.contains("[Footprint]"));
        assert!(text.contains("https://example.com/very/long/path"));
        assert!(text.contains(EMPTY_PLACEHOLDER));
    }
}
