use dioxus::prelude::*;

use crate::cohort::metrics::{ComparisonSelection, SortDirection, SortField, SortState, ViabilityTier};
use crate::cohort::Embryo;
use super::labels::{column_label, speed_label};
use crate::core::{format, routes};
use crate::t;

#[component]
pub fn CohortTable(
    embryos: Vec<&'static Embryo>,
    sort: Signal<SortState>,
    selection: Signal<ComparisonSelection>,
) -> Element {
    let state = sort();
    let select_label = t!("table-select");

    rsx! {
        div { class: "cohort-table__scroll",
            table { class: "cohort-table",
                thead {
                    tr {
                        th { class: "cohort-table__select",
                            span { class: "visually-hidden", "{select_label}" }
                        }
                        for field in SortField::ALL {
                            {render_header(field, state.direction_for(field), sort)}
                        }
                    }
                }
                tbody {
                    for embryo in embryos {
                        {render_row(embryo, selection)}
                    }
                }
            }
        }
    }
}

fn render_header(
    field: SortField,
    direction: Option<SortDirection>,
    mut sort: Signal<SortState>,
) -> Element {
    let icon = match direction {
        Some(SortDirection::Ascending) => "↑",
        Some(SortDirection::Descending) => "↓",
        None => "↕",
    };
    let aria_sort = match direction {
        Some(SortDirection::Ascending) => "ascending",
        Some(SortDirection::Descending) => "descending",
        None => "none",
    };
    let icon_class = if direction.is_some() {
        "sort-icon sort-icon--active"
    } else {
        "sort-icon"
    };

    rsx! {
        th {
            key: "{field.header()}",
            class: format!("cohort-table__head {}", alignment(field)),
            aria_sort: aria_sort,
            button {
                r#type: "button",
                class: "cohort-table__sort",
                onclick: move |_| sort.write().toggle(field),
                {column_label(field)}
                span {
                    class: "{icon_class}",
                    aria_hidden: "true",
                    "{icon}"
                }
            }
        }
    }
}

fn alignment(field: SortField) -> &'static str {
    match field {
        SortField::Id | SortField::LastStage | SortField::Speed => "align-left",
        SortField::Blastocyst => "align-center",
        _ => "align-right",
    }
}

fn render_row(embryo: &'static Embryo, mut selection: Signal<ComparisonSelection>) -> Element {
    let id = embryo.id.clone();
    let checked = selection.read().contains(&id);
    let at_cap = !checked && selection.read().len() >= crate::cohort::metrics::MAX_COMPARE;
    let tier = ViabilityTier::from_score(embryo.model_output.viability_score);
    let stage = embryo.last_observed_stage;
    let speed = embryo.development_speed;
    let detail_path = routes::embryo_path(&id);
    let toggle_id = id.clone();
    let duration = format!("{:.1}", embryo.observation_duration_hours);
    let select_label = t!("table-select-embryo", id = id.as_str());

    rsx! {
        tr {
            key: "{id}",
            class: "cohort-table__row",
            onclick: move |_| {
                navigator().push(detail_path.clone());
            },
            td { class: "cohort-table__select",
                input {
                    r#type: "checkbox",
                    aria_label: "{select_label}",
                    checked: checked,
                    disabled: at_cap,
                    onclick: move |evt| evt.stop_propagation(),
                    onchange: move |_| selection.write().toggle(&toggle_id),
                }
            }
            td { class: "mono strong", "{id}" }
            td { class: "align-right mono", "{embryo.total_frames}" }
            td { class: "align-right mono", "{duration}" }
            td {
                span { class: "stage-badge {stage.css_class()}", "{stage}" }
            }
            td { class: "align-right mono", "{optional_number(embryo.time_to_t2)}" }
            td { class: "align-right mono", "{optional_number(embryo.time_to_t3)}" }
            td { class: "align-right mono", "{optional_number(embryo.time_to_t5)}" }
            td { class: "align-center",
                if embryo.blastocyst_formation {
                    span { class: "flag flag--yes", "✓" }
                } else {
                    span { class: "flag flag--no", "—" }
                }
            }
            td {
                span { class: "speed-badge {speed.css_class()}", {speed_label(speed)} }
            }
            td { class: "align-right mono {tier.css_class()}",
                "{format::format_score(embryo.model_output.viability_score)}"
            }
            td { class: "align-right mono", "{format::format_percent(embryo.model_output.confidence)}" }
        }
    }
}

fn optional_number(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "—".to_string())
}
