/// Builds the text document ("tag") a movie is vectorized from
///
/// Fields are joined with a single space in genre, actors, directors, writers
/// order and the result is lowercased. Absent fields and "unknown" markers
/// contribute nothing.
pub fn build_tag(
    genre: Option<&str>,
    actors: Option<&str>,
    directors: Option<&str>,
    writers: Option<&str>,
) -> String {
    [genre, actors, directors, writers]
        .into_iter()
        .map(normalize_field)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Maps a missing, blank, `-` or `nan` cell to the empty string
fn normalize_field(field: Option<&str>) -> &str {
    match field {
        Some(value) if !is_unknown_marker(value) => value,
        _ => "",
    }
}

fn is_unknown_marker(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "-" || value.eq_ignore_ascii_case("nan")
}
