//! Locale bundles must mirror the fallback: same message ids, no duplicates,
//! and the same `{ $variable }` placeholders per message.

use std::collections::{BTreeMap, BTreeSet};

const EN_US: &str = include_str!("../i18n/en-US/embryolens-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/embryolens-ui.ftl");
const FR_FR: &str = include_str!("../i18n/fr-FR/embryolens-ui.ftl");

const LOCALES: &[(&str, &str)] = &[("es-ES", ES_ES), ("fr-FR", FR_FR)];

/// `id -> placeholders` for every single-line message.
fn messages(src: &str, locale: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut out = BTreeMap::new();
    for line in src.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') {
            continue;
        }
        let Some((id, body)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || id.contains(char::is_whitespace) {
            continue;
        }
        let previous = out.insert(id.to_string(), placeholders(body));
        assert!(previous.is_none(), "{locale}: duplicate message `{id}`");
    }
    out
}

fn placeholders(body: &str) -> BTreeSet<String> {
    body.split("{ $")
        .skip(1)
        .filter_map(|rest| rest.split_once(' ').map(|(name, _)| name.to_string()))
        .collect()
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback = messages(EN_US, "en-US");
    assert!(!fallback.is_empty());

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        let ids = messages(src, locale);
        for (id, vars) in &fallback {
            match ids.get(id) {
                None => failures.push(format!("{locale}: missing `{id}`")),
                Some(found) if found != vars => failures.push(format!(
                    "{locale}: `{id}` uses {found:?}, fallback uses {vars:?}"
                )),
                Some(_) => {}
            }
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn placeholder_parsing() {
    let vars = placeholders("Cohort Analysis: { $cycle } ({ $count })");
    assert_eq!(
        vars.into_iter().collect::<Vec<_>>(),
        vec!["count".to_string(), "cycle".to_string()]
    );
}
