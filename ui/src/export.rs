//! Client-local exports: the cohort CSV and single-embryo JSON reports.
//!
//! Builders are pure; delivery hands the bytes to the browser as a download
//! on web and writes into the app data directory on desktop.

use crate::cohort::Embryo;
use crate::core::format::yes_no;
use crate::t;

pub const CSV_HEADERS: [&str; 11] = [
    "Embryo ID",
    "Total Frames",
    "Duration (h)",
    "Last Stage",
    "t2 (h)",
    "t3 (h)",
    "t5 (h)",
    "Blastocyst",
    "Speed",
    "Viability Score",
    "Confidence (%)",
];

const MISSING: &str = "N/A";

#[derive(Clone, Debug, PartialEq)]
pub enum ExportStatus {
    Idle,
    Working(String),
    Done(String),
    Error(String),
}

impl ExportStatus {
    /// `(class, message)` for the status line under the export buttons.
    pub fn feedback(&self) -> Option<(&'static str, String)> {
        match self {
            Self::Idle => None,
            Self::Working(label) => Some(("export-status", format!("{label}…"))),
            Self::Done(message) => Some((
                "export-status export-status--success",
                format!("✅ {message}"),
            )),
            Self::Error(err) => Some(("export-status export-status--error", format!("⚠️ {err}"))),
        }
    }
}

/// One row per embryo, in the order given (the table's visible order).
pub fn build_cohort_csv(embryos: &[&Embryo]) -> String {
    let mut csv = String::new();
    push_row(&mut csv, CSV_HEADERS.iter().map(|h| h.to_string()));

    for embryo in embryos {
        let row = [
            embryo.id.clone(),
            embryo.total_frames.to_string(),
            embryo.observation_duration_hours.to_string(),
            embryo.last_observed_stage.label().to_string(),
            optional_cell(embryo.time_to_t2),
            optional_cell(embryo.time_to_t3),
            optional_cell(embryo.time_to_t5),
            yes_no(embryo.blastocyst_formation).to_string(),
            embryo.development_speed.label().to_string(),
            embryo.model_output.viability_score.to_string(),
            embryo.model_output.confidence.to_string(),
        ];
        push_row(&mut csv, row);
    }

    csv
}

fn optional_cell(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn push_row<I>(csv: &mut String, fields: I)
where
    I: IntoIterator<Item = String>,
{
    let line = fields
        .into_iter()
        .map(|field| escape_csv(&field))
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&line);
    csv.push('\n');
}

pub fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

pub fn export_filename(cycle_id: &str) -> String {
    format!("embryo_cohort_{cycle_id}.csv")
}

pub fn report_filename(embryo_id: &str) -> String {
    format!("embryo_report_{embryo_id}_{}.json", timestamp_slug())
}

pub fn build_embryo_report(embryo: &Embryo) -> Result<String, String> {
    serde_json::to_string_pretty(embryo).map_err(|err| err.to_string())
}

pub async fn perform_cohort_csv_export(
    cycle_id: String,
    embryos: Vec<Embryo>,
) -> Result<String, String> {
    let rows: Vec<&Embryo> = embryos.iter().collect();
    let csv = build_cohort_csv(&rows);
    let filename = export_filename(&cycle_id);
    tracing::info!(rows = rows.len(), %filename, "exporting cohort CSV");
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => t!("export-csv-saved", path = path),
        None => t!("export-csv-download"),
    })
}

pub async fn perform_embryo_report_export(embryo: Embryo) -> Result<String, String> {
    let json = build_embryo_report(&embryo)?;
    copy_to_clipboard(json.clone()).await?;
    let filename = report_filename(&embryo.id);
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => t!("export-report-saved", path = path),
        None => t!("export-report-download"),
    })
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;
        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("opacity", "0").ok();
        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .and_then(|html| html.exec_command("copy").ok())
            .unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err("Clipboard copy blocked".into())
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

/// Returns the saved path on desktop, `None` when the browser took over.
async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());
        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();
        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();
        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("org", "Embryolens", "Embryolens")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::generate_mock_cohort;

    #[test]
    fn header_matches_column_order() {
        let csv = build_cohort_csv(&[]);
        assert_eq!(
            csv,
            "Embryo ID,Total Frames,Duration (h),Last Stage,t2 (h),t3 (h),t5 (h),Blastocyst,Speed,Viability Score,Confidence (%)\n"
        );
    }

    #[test]
    fn missing_times_render_na() {
        let mut cohort = generate_mock_cohort(11);
        cohort.embryos[3].time_to_t3 = None;
        let rows: Vec<&Embryo> = cohort.embryos.iter().collect();
        let csv = build_cohort_csv(&rows);

        let line = csv.lines().nth(4).unwrap();
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells[0], "EMB-004");
        assert_eq!(cells[5], "N/A");
        assert_eq!(cells[7], "No");
        assert_eq!(cells[8], "Slow");
        assert_eq!(csv.lines().count(), 13);
    }

    #[test]
    fn rows_follow_given_order() {
        let cohort = generate_mock_cohort(12);
        let rows = vec![
            cohort.find("EMB-007").unwrap(),
            cohort.find("EMB-001").unwrap(),
        ];
        let csv = build_cohort_csv(&rows);
        let first_cells: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(first_cells, vec!["EMB-007", "EMB-001"]);
        assert!(csv.lines().nth(2).unwrap().contains(",tEB,"));
        assert!(csv.lines().nth(2).unwrap().contains(",Yes,Normal,0.847,"));
    }

    #[test]
    fn quoting_rule() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn filenames() {
        assert_eq!(
            export_filename("CYC-2026-02-12-A"),
            "embryo_cohort_CYC-2026-02-12-A.csv"
        );
        assert!(report_filename("EMB-001").starts_with("embryo_report_EMB-001_"));
    }

    #[test]
    fn report_is_camel_case_json() {
        let cohort = generate_mock_cohort(13);
        let json = build_embryo_report(cohort.find("EMB-002").unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "EMB-002");
        assert_eq!(value["blastocystFormation"], true);
        assert_eq!(value["modelOutput"]["viabilityScore"], 0.782);
    }

    #[test]
    fn feedback_reflects_status() {
        assert_eq!(ExportStatus::Idle.feedback(), None);
        let (class, message) = ExportStatus::Working("Preparing CSV".into())
            .feedback()
            .unwrap();
        assert_eq!(class, "export-status");
        assert_eq!(message, "Preparing CSV…");
        let (class, _) = ExportStatus::Error("disk full".into()).feedback().unwrap();
        assert!(class.ends_with("--error"));
    }
}
