//! rendering flattened documents
//!
//! Every document becomes a section named by its title, every tab a table with one line
//! per [Row]. HTML output carries the row banding as cell backgrounds; Markdown is the
//! same layout without colour. JSON and YAML dump the documents as data.
use crate::banding::BandingHint;
use crate::flatten::{FlattenedDocument, Row};
use std::fmt::{Display, Formatter, Write};

pub const COLUMNS: [&str; 7] = [
    "Level",
    "Repeating",
    "Path ID",
    "Label",
    "Data Type",
    "Mandatory",
    "Description & Logic",
];

/// Index of the `Repeating` column, the only cell shaded for rows of a repeating parent
const REPEATING_COLUMN: usize = 1;

const HEADER_FILL: &str = "0070C0";
const HEADER_TEXT: &str = "FFFFFF";

#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Html,
    Markdown,
    Json,
    Yaml,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Html => f.write_str("html"),
            ReportFormat::Markdown => f.write_str("markdown"),
            ReportFormat::Json => f.write_str("json"),
            ReportFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Unable to format report")]
    Format(#[from] std::fmt::Error),
    #[error("Unable to serialize report as json")]
    Json(#[from] serde_json::Error),
    #[error("Unable to serialize report as yaml")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn render(documents: &[FlattenedDocument], format: ReportFormat) -> Result<String, RenderError> {
    match format {
        ReportFormat::Html => render_html(documents),
        ReportFormat::Markdown => render_markdown(documents),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(documents)?),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(documents)?),
    }
}

/// `datacapture_<yyyyMMddHHmmss>.<ext>`
pub fn report_file_name(now: &chrono::NaiveDateTime, format: ReportFormat) -> String {
    format!(
        "datacapture_{}.{}",
        now.format("%Y%m%d%H%M%S"),
        format.extension()
    )
}

fn cells(row: &Row) -> [String; 7] {
    [
        row.order.to_string(),
        flag(row.is_repeating).to_string(),
        row.path.clone(),
        row.label.clone(),
        row.data_type.clone(),
        flag(row.mandatory).to_string(),
        row.description.clone(),
    ]
}

fn flag(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

pub fn render_markdown(documents: &[FlattenedDocument]) -> Result<String, RenderError> {
    let mut out = String::new();

    for (index, document) in documents.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        writeln!(out, "# {}", document.title)?;

        for (tab, rows) in &document.tabs {
            writeln!(out)?;
            writeln!(out, "## {tab}")?;
            writeln!(out)?;
            writeln!(out, "| {} |", COLUMNS.join(" | "))?;
            writeln!(out, "|{}", " --- |".repeat(COLUMNS.len()))?;

            for row in rows {
                let cells = cells(row).map(|cell| cell.replace('|', "\\|"));
                writeln!(out, "| {} |", cells.join(" | "))?;
            }
        }
    }

    Ok(out)
}

pub fn render_html(documents: &[FlattenedDocument]) -> Result<String, RenderError> {
    let mut out = String::new();

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Data capture</title>")?;
    writeln!(
        out,
        "<style>body {{ font-family: Calibri, sans-serif; font-size: 8pt; }} \
         table {{ border-collapse: collapse; width: auto; }} \
         th, td {{ border: 1px solid #000000; padding: 2px 4px; text-align: left; }}</style>"
    )?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    for document in documents {
        writeln!(out, "<h1>{}</h1>", escape(&document.title))?;

        for (tab, rows) in &document.tabs {
            writeln!(out, "<h2>{}</h2>", escape(tab))?;
            writeln!(out, "<table>")?;

            out.push_str("<tr>");
            for column in COLUMNS {
                write!(
                    out,
                    "<th style=\"background-color:#{HEADER_FILL};color:#{HEADER_TEXT};font-weight:bold\">{}</th>",
                    escape(column)
                )?;
            }
            out.push_str("</tr>\n");

            for row in rows {
                render_html_row(&mut out, row)?;
            }

            writeln!(out, "</table>")?;
        }
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

fn render_html_row(out: &mut String, row: &Row) -> std::fmt::Result {
    let hex = row.banding.shade().map(|shade| shade.hex());

    out.push_str("<tr>");
    for (index, cell) in cells(row).iter().enumerate() {
        let shaded = match row.banding {
            BandingHint::Container { .. } => true,
            BandingHint::Repeated { .. } => index == REPEATING_COLUMN,
            BandingHint::NoBackground => false,
        };

        match hex.as_deref() {
            Some(hex) if shaded => {
                write!(out, "<td style=\"background-color:#{hex}\">{}</td>", escape(cell))?
            }
            _ => write!(out, "<td>{}</td>", escape(cell))?,
        }
    }
    out.push_str("</tr>\n");
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filter::NodeFilter;
    use crate::flatten::Flattener;
    use crate::config_document;
    use pretty_assertions::assert_eq;

    fn document(xml: &str) -> FlattenedDocument {
        let document = config_document!(xml);
        let filter = NodeFilter::default();
        let flattened = Flattener::new(&filter)
            .flatten_document(&document.root(), "PN_TEST")
            .unwrap();
        flattened
    }

    const XML: &str = r#"<tab name="General">
        <container name="grp" min="0" max="2">
            <item pathid="f1"><text required="t"/><label>Name &amp; Title</label></item>
        </container>
        <item pathid="f2"><checkbox/><label>A|B</label></item>
    </tab>"#;

    #[test]
    fn markdown_table() {
        let rendered = render_markdown(&[document(XML)]).unwrap();
        assert_eq!(
            rendered,
            "# PN_TEST

## General

| Level | Repeating | Path ID | Label | Data Type | Mandatory | Description & Logic |
| --- | --- | --- | --- | --- | --- | --- |
| 1 | Y | grp |  | Container (Min = 0, Max = 2) | N |  |
| 1.1 | N | grp/f1 | Name & Title | text | Y |  |
| 2 | N | f2 | A\\|B | checkbox | N |  |
"
        );
    }

    #[test]
    fn html_shading() {
        let rendered = render_html(&[document(XML)]).unwrap();

        let container_fill = BandingHint::Container { depth: 1 }.shade().unwrap().hex();
        assert!(rendered.contains(&format!(
            "<tr><td style=\"background-color:#{container_fill}\">1</td>"
        )));
        // item under a repeating container: only the repeating cell is shaded
        let item_fill = BandingHint::Repeated { depth: 1 }.shade().unwrap().hex();
        assert!(rendered.contains(&format!(
            "<tr><td>1.1</td><td style=\"background-color:#{item_fill}\">N</td><td>grp/f1</td>"
        )));
        assert!(rendered.contains("<tr><td>2</td><td>N</td><td>f2</td>"));
        assert!(rendered.contains("<td>Name &amp; Title</td>"));
        assert!(rendered.contains("<h1>PN_TEST</h1>"));
        assert!(rendered.contains("<h2>General</h2>"));
    }

    #[test]
    fn json_dump() {
        let rendered = render(&[document(XML)], ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["title"], "PN_TEST");
        assert_eq!(value[0]["tabs"]["General"][1]["path"], "grp/f1");
        assert_eq!(value[0]["tabs"]["General"][1]["order"], "1.1");
    }

    #[test]
    fn yaml_dump() {
        let rendered = render(&[document(XML)], ReportFormat::Yaml).unwrap();
        assert!(rendered.contains("title: PN_TEST"));
        assert!(rendered.contains("path: grp/f1"));
    }

    #[test]
    fn file_name() {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        assert_eq!(
            report_file_name(&now, ReportFormat::Html),
            "datacapture_20240309140507.html"
        );
        assert_eq!(
            report_file_name(&now, ReportFormat::Markdown),
            "datacapture_20240309140507.md"
        );
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href='x'>&\"</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;");
    }
}
