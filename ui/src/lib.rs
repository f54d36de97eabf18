//! Shared UI crate for Embryolens: the synthetic cohort, its derived metrics,
//! exports, the upload flow and every Dioxus view. Platform crates only add a
//! `Route` enum and a launcher.

pub mod cohort;
pub mod core;
pub mod dashboard;
pub mod export;
pub mod i18n;
pub mod upload;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Shared theme, inlined by launchers that cannot serve assets.
pub const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}
