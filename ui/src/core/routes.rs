//! Path builders for the three views. The platform crates own the `Route`
//! enum; shared components navigate with these string paths instead.

pub const COHORT_PATH: &str = "/";

pub fn embryo_path(embryo_id: &str) -> String {
    format!("/embryo/{embryo_id}")
}

/// `/compare?embryos=EMB-001,EMB-004`
pub fn compare_path<S: AsRef<str>>(embryo_ids: &[S]) -> String {
    let joined = embryo_ids
        .iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    format!("/compare?embryos={joined}")
}

/// Split the comma-joined `embryos` query value, dropping blanks.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_path_joins_ids() {
        assert_eq!(
            compare_path(&["EMB-001", "EMB-003"]),
            "/compare?embryos=EMB-001,EMB-003"
        );
    }

    #[test]
    fn id_list_skips_empty_segments() {
        assert_eq!(parse_id_list("EMB-001,,EMB-002,"), vec!["EMB-001", "EMB-002"]);
        assert!(parse_id_list("").is_empty());
    }
}
