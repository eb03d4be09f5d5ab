//! CSV export and print.
//!
//! [`to_csv`] is pure. [`download_csv`] and [`print_table`] hand the result to
//! the browser on the web; native builds write CSV into the download folder and
//! cannot print.

use serde_json::Value;
use store::Record;
use thiserror::Error;

use super::view::{escape_html, TableView};

/// Heading of printed reports.
pub const REPORT_TITLE: &str = "Fleet Management Report";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export")]
    Empty,
    #[error("records are not objects")]
    NotTabular,
    #[error("browser refused the export: {0}")]
    Browser(String),
    #[error("could not write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("export is not available on this platform")]
    Unsupported,
}

/// Render records as CSV. Headers are the first record's keys in order;
/// lines are joined with `\n`.
pub fn to_csv(records: &[Record]) -> Result<String, ExportError> {
    let first = records.first().ok_or(ExportError::Empty)?;
    let headers: Vec<&String> = first
        .as_object()
        .ok_or(ExportError::NotTabular)?
        .keys()
        .collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| csv_field(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in records {
        let line = headers
            .iter()
            .map(|header| match record.get(header.as_str()) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => csv_field(s),
                Some(other) => csv_field(&other.to_string()),
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Full HTML document of a printable report.
pub fn report_html(view: &TableView, generated_on: &str) -> String {
    format!(
        "<html><head><title>{REPORT_TITLE}</title><style>\
         body {{ font-family: Arial, sans-serif; }} \
         table {{ width: 100%; border-collapse: collapse; }} \
         th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }} \
         th {{ background-color: #f2f2f2; }} \
         @media print {{ body {{ margin: 0; }} }}\
         </style></head><body><h1>{REPORT_TITLE}</h1><p>Generated on: {}</p>{}</body></html>",
        escape_html(generated_on),
        view.to_html()
    )
}

/// Offer `records` as a CSV file named `filename`.
pub fn download_csv(records: &[Record], filename: &str) -> Result<(), ExportError> {
    let csv = to_csv(records)?;
    save_csv(&csv, filename)?;
    tracing::info!("Exported {} rows to {}", records.len(), filename);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn save_csv(csv: &str, filename: &str) -> Result<(), ExportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let browser = |e: JsValue| ExportError::Browser(format!("{e:?}"));

    let parts = js_sys::Array::of1(&JsValue::from_str(csv));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(browser)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(browser)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::Unsupported)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(browser)?
        .dyn_into()
        .map_err(|e| ExportError::Browser(format!("{e:?}")))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    Url::revoke_object_url(&url).map_err(browser)
}

#[cfg(not(target_arch = "wasm32"))]
fn save_csv(csv: &str, filename: &str) -> Result<(), ExportError> {
    let dir = dirs::download_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(filename), csv)?;
    Ok(())
}

/// Open a print window for a rendered table. A missing table is a no-op.
pub fn print_table(view: Option<&TableView>) -> Result<(), ExportError> {
    let Some(view) = view else {
        tracing::debug!("Nothing to print");
        return Ok(());
    };
    let generated_on = chrono::Local::now().format("%m/%d/%Y, %I:%M:%S %p").to_string();
    open_print_window(&report_html(view, &generated_on))
}

#[cfg(target_arch = "wasm32")]
fn open_print_window(html: &str) -> Result<(), ExportError> {
    let browser = |e: wasm_bindgen::JsValue| ExportError::Browser(format!("{e:?}"));
    let window = web_sys::window().ok_or(ExportError::Unsupported)?;
    let report = window
        .open_with_url_and_target("", "_blank")
        .map_err(browser)?
        .ok_or_else(|| ExportError::Browser("popup blocked".to_string()))?;
    let root = report
        .document()
        .and_then(|d| d.document_element())
        .ok_or(ExportError::Unsupported)?;
    root.set_inner_html(html);
    report.print().map_err(browser)
}

#[cfg(not(target_arch = "wasm32"))]
fn open_print_window(_html: &str) -> Result<(), ExportError> {
    Err(ExportError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, TableView};
    use serde_json::json;

    #[test]
    fn test_quotes_commas() {
        let csv = to_csv(&[json!({ "a": 1, "b": "x,y" })]).unwrap();
        assert_eq!(csv, "a,b\n1,\"x,y\"");
    }

    #[test]
    fn test_doubles_quotes_and_blanks_nulls() {
        let csv = to_csv(&[
            json!({ "name": "say \"hi\"", "phone": null, "active": true }),
            json!({ "name": "plain", "active": false }),
        ])
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,phone,active");
        assert_eq!(lines[1], "\"say \"\"hi\"\"\",,true");
        assert_eq!(lines[2], "plain,,false");
    }

    #[test]
    fn test_nested_objects_as_json() {
        let csv = to_csv(&[json!({ "id": 1, "vehicle": { "reg_no": "KA" } })]).unwrap();
        assert_eq!(csv, "id,vehicle\n1,\"{\"\"reg_no\"\":\"\"KA\"\"}\"");
    }

    #[test]
    fn test_empty_and_non_tabular() {
        assert!(matches!(to_csv(&[]), Err(ExportError::Empty)));
        assert_eq!(ExportError::Empty.to_string(), "No data to export");
        assert!(matches!(to_csv(&[json!([1, 2])]), Err(ExportError::NotTabular)));
    }

    #[test]
    fn test_report_html() {
        let view = TableView::build(
            &[json!({ "id": 1, "reg_no": "KA-01" })],
            &[Column::new("reg_no", "Registration")],
            &[],
        );
        let html = report_html(&view, "01/02/2024");
        assert!(html.contains("<title>Fleet Management Report</title>"));
        assert!(html.contains("Generated on: 01/02/2024"));
        assert!(html.contains("<td>KA-01</td>"));
    }

    #[test]
    fn test_print_without_table_is_noop() {
        assert!(print_table(None).is_ok());
    }
}
