use dioxus::prelude::*;

use crate::cohort::metrics::{filter_by_id, sort_embryos, ComparisonSelection, SortState};
use crate::cohort::{cohort_repository, CohortRepository};
use crate::core::routes;
use crate::dashboard::{CohortExportButton, CohortTable, PopulationAnalytics};
use crate::i18n::use_language_marker;
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CohortTab {
    Table,
    Analytics,
}

#[component]
pub fn CohortPage() -> Element {
    let lang_marker = use_language_marker();
    let cohort = cohort_repository().cohort();

    let mut tab = use_signal(|| CohortTab::Table);
    let sort = use_signal(SortState::default);
    let mut search = use_signal(String::new);
    let selection = use_signal(ComparisonSelection::default);

    let visible = filter_by_id(sort_embryos(&cohort.embryos, &sort()), &search());
    let shown = visible.len();
    let total = cohort.embryos.len();
    let blastocysts = cohort.blastocyst_count();
    let picked = selection.read().len();
    let compare_target = routes::compare_path(selection.read().ids());
    let can_compare = selection.read().can_compare();
    let export_rows = visible.clone();
    let search_placeholder = t!("cohort-search-placeholder");

    let tab_class = move |which: CohortTab| {
        if tab() == which {
            "tabs__tab tabs__tab--active"
        } else {
            "tabs__tab"
        }
    };

    rsx! {
        div { style: "display:none", "{lang_marker}" }
        section { class: "page page-cohort",
            header { class: "page__header",
                h1 { {t!("cohort-title", cycle = cohort.cycle_id.as_str())} }
                p { class: "page__subtitle",
                    {t!("cohort-summary", total = total, blastocysts = blastocysts)}
                }
            }

            div { class: "page-cohort__toolbar",
                div { class: "tabs", role: "tablist",
                    button {
                        r#type: "button",
                        role: "tab",
                        class: tab_class(CohortTab::Table),
                        aria_selected: tab() == CohortTab::Table,
                        onclick: move |_| tab.set(CohortTab::Table),
                        {t!("cohort-tab-table")}
                    }
                    button {
                        r#type: "button",
                        role: "tab",
                        class: tab_class(CohortTab::Analytics),
                        aria_selected: tab() == CohortTab::Analytics,
                        onclick: move |_| tab.set(CohortTab::Analytics),
                        {t!("cohort-tab-analytics")}
                    }
                }

                div { class: "page-cohort__actions",
                    if can_compare {
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: move |_| {
                                navigator().push(compare_target.clone());
                            },
                            {t!("cohort-compare-button", count = picked)}
                        }
                    }
                    CohortExportButton {
                        cycle_id: cohort.cycle_id.clone(),
                        embryos: export_rows,
                    }
                }
            }

            match tab() {
                CohortTab::Table => rsx! {
                    div { class: "page-cohort__search",
                        input {
                            r#type: "search",
                            class: "search-input",
                            placeholder: search_placeholder,
                            value: "{search}",
                            oninput: move |evt| search.set(evt.value()),
                        }
                        span { class: "page__meta", {t!("cohort-showing", shown = shown, total = total)} }
                    }
                    CohortTable { embryos: visible, sort, selection }
                },
                CohortTab::Analytics => rsx! {
                    PopulationAnalytics { cohort }
                },
            }
        }
    }
}
