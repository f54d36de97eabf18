//! Every `t!("...")` key used in `src/` must exist in the fallback bundle,
//! and every locale must define every fallback key.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "embryolens-ui.ftl";
const I18N_DIR: &str = "i18n";
const FALLBACK: &str = "en-US";

fn is_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Message ids (`id = ...`) in a Fluent file. Terms and attributes are skipped.
fn message_ids(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| !id.is_empty() && id.chars().all(is_key_char))
        .map(str::to_string)
        .collect()
}

fn rust_sources(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|e| e.path()));
            }
        } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
            files.push(path);
        }
    }
    files
}

/// Literal first arguments of `t!` invocations.
fn referenced_keys(content: &str) -> BTreeSet<String> {
    let needle = concat!("t!", "(\"");
    content
        .match_indices(needle)
        .filter_map(|(pos, _)| {
            let rest = &content[pos + needle.len()..];
            let end = rest.find('"')?;
            let key = &rest[..end];
            (!key.is_empty() && key.chars().all(is_key_char)).then(|| key.to_string())
        })
        .collect()
}

fn read_bundle(root: &Path, locale: &str) -> String {
    let path = root.join(locale).join(FTL_FILENAME);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {path:?}: {err}"))
}

#[test]
fn source_keys_exist_in_fallback() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = message_ids(&read_bundle(&crate_root.join(I18N_DIR), FALLBACK));
    assert!(!fallback.is_empty(), "fallback bundle has no messages");

    let mut used = BTreeSet::new();
    for file in rust_sources(&crate_root.join("src")) {
        if let Ok(content) = fs::read_to_string(&file) {
            used.extend(referenced_keys(&content));
        }
    }
    assert!(used.contains("nav-cohort"), "scanner found no navbar keys");

    let missing: Vec<_> = used.difference(&fallback).cloned().collect();
    assert!(
        missing.is_empty(),
        "keys used in src/ but missing from {FALLBACK}: {}",
        missing.join(", ")
    );
}

#[test]
fn every_locale_covers_fallback() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(I18N_DIR);
    let fallback = message_ids(&read_bundle(&root, FALLBACK));

    let mut gaps: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let locales = fs::read_dir(&root)
        .expect("i18n directory")
        .flatten()
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_string));

    for locale in locales {
        let ids = message_ids(&read_bundle(&root, &locale));
        let missing: Vec<_> = fallback.difference(&ids).cloned().collect();
        if !missing.is_empty() {
            gaps.insert(locale, missing);
        }
    }

    assert!(gaps.is_empty(), "locales with missing messages: {gaps:#?}");
}

#[test]
fn scanner_reads_literal_keys_only() {
    let sample = concat!("let a = t!", "(\"nav-cohort\"); let b = t!", "(\"Bad Key\");");
    let keys = referenced_keys(sample);
    assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["nav-cohort"]);
}
