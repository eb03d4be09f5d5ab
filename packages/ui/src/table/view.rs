//! Declarative table description built from records and descriptors.
//!
//! [`TableView::build`] is a pure function of its three inputs. Components
//! render the result; print and tests read it directly.

use store::{record_id, Record, RecordId};

use super::columns::{Action, ActionIcon, Cell, Column};

/// Placeholder text of an empty table.
pub const EMPTY_MESSAGE: &str = "No data available";

/// A button bound to one row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowAction {
    pub key: String,
    pub icon: ActionIcon,
    pub class: String,
    pub title: String,
    pub id: RecordId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub id: Option<RecordId>,
    pub cells: Vec<Cell>,
    pub actions: Vec<RowAction>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableBody {
    /// Single placeholder row spanning every column.
    Empty { colspan: usize },
    Rows(Vec<TableRow>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub has_actions: bool,
    pub body: TableBody,
}

impl TableView {
    pub fn build(records: &[Record], columns: &[Column], actions: &[Action]) -> Self {
        let has_actions = !actions.is_empty();
        let headers = columns.iter().map(|c| c.header.clone()).collect();

        if records.is_empty() {
            return Self {
                headers,
                has_actions,
                body: TableBody::Empty {
                    colspan: columns.len() + usize::from(has_actions),
                },
            };
        }

        let rows = records
            .iter()
            .map(|record| {
                let id = record_id(record);
                let cells = columns.iter().map(|column| column.render(record)).collect();
                let actions = match id {
                    Some(id) => actions
                        .iter()
                        .filter(|action| action.applies_to(record))
                        .map(|action| RowAction {
                            key: action.key.clone(),
                            icon: action.icon,
                            class: action.class.clone(),
                            title: action.title.clone(),
                            id,
                        })
                        .collect(),
                    None => {
                        if has_actions {
                            tracing::debug!("Row without id, skipping its actions");
                        }
                        Vec::new()
                    }
                };
                TableRow { id, cells, actions }
            })
            .collect();

        Self {
            headers,
            has_actions,
            body: TableBody::Rows(rows),
        }
    }

    /// Body rows, the placeholder included.
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Empty { .. } => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty { .. })
    }

    /// Static HTML of the table, without action buttons. Used for printing.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table><thead><tr>");
        for header in &self.headers {
            html.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        html.push_str("</tr></thead><tbody>");
        match &self.body {
            TableBody::Empty { .. } => {
                html.push_str(&format!(
                    "<tr><td colspan=\"{}\">{EMPTY_MESSAGE}</td></tr>",
                    self.headers.len().max(1)
                ));
            }
            TableBody::Rows(rows) => {
                for row in rows {
                    html.push_str("<tr>");
                    for cell in &row.cells {
                        html.push_str(&format!("<td>{}</td>", escape_html(cell.text())));
                    }
                    html.push_str("</tr>");
                }
            }
        }
        html.push_str("</tbody></table>");
        html
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format;
    use serde_json::json;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("reg_no", "Registration"),
            Column::new("cost", "Cost").formatted(format::currency),
            Column::new("status", "Status").badge(),
        ]
    }

    #[test]
    fn test_empty_list_has_one_placeholder_row() {
        let with_actions = TableView::build(&[], &columns(), &[Action::edit()]);
        assert_eq!(with_actions.row_count(), 1);
        assert_eq!(with_actions.body, TableBody::Empty { colspan: 4 });

        let without_actions = TableView::build(&[], &columns(), &[]);
        assert_eq!(without_actions.row_count(), 1);
        assert_eq!(without_actions.body, TableBody::Empty { colspan: 3 });

        assert_eq!(TableView::build(&[], &[], &[]).row_count(), 1);
    }

    #[test]
    fn test_one_row_per_record_in_order() {
        let records = vec![
            json!({ "id": 2, "reg_no": "B", "cost": 10, "status": "active" }),
            json!({ "id": 1, "reg_no": "A", "cost": null, "status": "inactive" }),
        ];
        let view = TableView::build(&records, &columns(), &[]);
        let TableBody::Rows(rows) = &view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0], Cell::Text("B".into()));
        assert_eq!(rows[0].cells[1], Cell::Text("$10.00".into()));
        assert_eq!(rows[1].cells[1], Cell::Text("$0.00".into()));
        assert_eq!(rows[1].cells[2], Cell::badge("inactive"));
        for (row, record) in rows.iter().zip(&records) {
            for (cell, column) in row.cells.iter().zip(columns()) {
                assert_eq!(*cell, column.render(record));
            }
        }
    }

    #[test]
    fn test_actions_filtered_by_condition() {
        let records = vec![
            json!({ "id": 1, "status": "planned" }),
            json!({ "id": 2, "status": "completed" }),
            json!({ "status": "planned" }),
        ];
        let actions = vec![
            Action::edit(),
            Action::new("start", ActionIcon::Start, "Start").when(|r| r["status"] == "planned"),
        ];
        let view = TableView::build(&records, &[Column::new("status", "Status")], &actions);
        let TableBody::Rows(rows) = &view.body else {
            panic!("expected rows");
        };
        let keys = |row: &TableRow| row.actions.iter().map(|a| a.key.clone()).collect::<Vec<_>>();
        assert_eq!(keys(&rows[0]), vec!["edit", "start"]);
        assert_eq!(rows[0].actions[1].id, 1);
        assert_eq!(keys(&rows[1]), vec!["edit"]);
        assert!(rows[2].actions.is_empty());
    }

    #[test]
    fn test_build_is_deterministic() {
        let records = vec![json!({ "id": 1, "reg_no": "A", "status": "active" })];
        assert_eq!(
            TableView::build(&records, &columns(), &[]),
            TableView::build(&records, &columns(), &[])
        );
    }

    #[test]
    fn test_html_escapes_cells() {
        let records = vec![json!({ "id": 1, "reg_no": "<b>&</b>", "status": "active" })];
        let html = TableView::build(&records, &columns(), &[]).to_html();
        assert!(html.contains("<th>Registration</th>"));
        assert!(html.contains("<td>&lt;b&gt;&amp;&lt;/b&gt;</td>"));
        assert!(html.contains("<td>ACTIVE</td>"));

        let empty = TableView::build(&[], &columns(), &[]).to_html();
        assert!(empty.contains(EMPTY_MESSAGE));
    }
}
