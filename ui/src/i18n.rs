//! Localization for `embryolens-ui`.
//!
//! Fluent bundles live under `i18n/<lang>/embryolens-ui.ftl` and are embedded
//! at compile time with `rust-embed`. `en-US` is the fallback and the
//! reference for the completeness tests.
//!
//! ```ignore
//! crate::i18n::init(); // idempotent
//! let label = crate::t!("nav-cohort");
//! ```
//!
//! Desktop builds ask the OS for preferred languages; wasm builds read
//! `navigator.languages`. Components that render translated text call
//! [`use_language_marker`] so a switch in the navbar re-renders them.
use std::sync::Once;

use dioxus::prelude::*;
use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// `t!("nav-cohort")` or `t!("cohort-title", cycle = id)`, routed through [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fallback file path is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "embryolens-ui";

pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => {
            tracing::debug!(tag, "ignoring unparseable language tag");
            return Ok(());
        }
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

/// Subscribe the calling component to the platform's language signal (if one
/// was provided) and return the current code for a hidden marker node.
pub fn use_language_marker() -> String {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    lang_code.map(|code| code()).unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn fallback_language_is_present() {
        assert!(available_languages().iter().any(|l| l == FALLBACK_LANGUAGE));
        assert_eq!(available_languages().len(), 3);
    }

    #[test]
    fn lookup_with_argument() {
        init();
        let _ = set_language(FALLBACK_LANGUAGE);
        let s = fl!(&*LOADER, "cohort-title", cycle = "CYC-1");
        assert!(s.contains("CYC-1"), "{s}");
    }

    #[test]
    fn unknown_language_keeps_current_bundle() {
        init();
        let before = fl!(&*LOADER, "nav-cohort");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "nav-cohort");
        assert_eq!(before, after);
    }
}
