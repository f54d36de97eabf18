use dioxus::prelude::*;

use crate::cohort::Embryo;
use crate::core::platform;
use crate::export::{perform_cohort_csv_export, perform_embryo_report_export, ExportStatus};
use crate::t;

/// Exports exactly the rows currently shown, in the order shown.
#[component]
pub fn CohortExportButton(cycle_id: String, embryos: Vec<&'static Embryo>) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let csv_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working(t!("export-preparing-csv")));
            let rows: Vec<Embryo> = embryos.iter().map(|e| (*e).clone()).collect();
            let cycle_id = cycle_id.clone();
            platform::spawn_future(async move {
                match perform_cohort_csv_export(cycle_id, rows).await {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => {
                        tracing::warn!("cohort CSV export failed: {err}");
                        status_signal.set(ExportStatus::Error(err));
                    }
                }
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        div { class: "export-action",
            button {
                r#type: "button",
                class: "button",
                disabled: busy(),
                onclick: csv_handler,
                {t!("export-csv-button")}
            }
            if let Some((class_name, message)) = status().feedback() {
                span { class: "{class_name}", "{message}" }
            }
        }
    }
}

#[component]
pub fn EmbryoReportButton(embryo: &'static Embryo) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let report_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working(t!("export-preparing-report")));
            let record = embryo.clone();
            platform::spawn_future(async move {
                match perform_embryo_report_export(record).await {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => {
                        tracing::warn!("embryo report export failed: {err}");
                        status_signal.set(ExportStatus::Error(err));
                    }
                }
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        div { class: "export-action",
            button {
                r#type: "button",
                class: "button",
                disabled: busy(),
                onclick: report_handler,
                {t!("export-report-button")}
            }
            if let Some((class_name, message)) = status().feedback() {
                span { class: "{class_name}", "{message}" }
            }
        }
    }
}
