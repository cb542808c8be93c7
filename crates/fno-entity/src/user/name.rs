//! Display-name composition.

/// Composes a full name as `last first [patronymic]`.
///
/// Every part is trimmed and parts that are empty after trimming are
/// dropped, so no blank segments or double spaces appear.
pub fn format_full_name(last_name: &str, first_name: &str, patronymic: Option<&str>) -> String {
    [Some(last_name), Some(first_name), patronymic]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
