use super::changes::RecipeDiff;
use itertools::Itertools;

/// Renders a short human-readable commit message from a diff's summary
/// counts, in fixed priority order: block changes first, then connections,
/// then operations, then a recipe rename. Returns "No changes" when the
/// summary is empty.
pub fn generate_message(diff: &RecipeDiff) -> String {
    let summary = &diff.summary;
    let segments: Vec<String> = [
        count_phrase("added", summary.blocks_added, "block"),
        count_phrase("removed", summary.blocks_removed, "block"),
        count_phrase("modified", summary.blocks_modified, "block"),
        count_phrase("added", summary.connections_added, "connection"),
        count_phrase("removed", summary.connections_removed, "connection"),
        count_phrase("modified", summary.connections_modified, "connection"),
        count_phrase("added", summary.operations_added, "operation"),
        count_phrase("removed", summary.operations_removed, "operation"),
        count_phrase("modified", summary.operations_modified, "operation"),
        summary
            .name_changed
            .then(|| format!("renamed recipe to \"{}\"", diff.name.new)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if segments.is_empty() {
        return "No changes".to_string();
    }
    capitalize(&segments.iter().join(", "))
}

fn count_phrase(verb: &str, count: usize, noun: &str) -> Option<String> {
    (count > 0).then(|| {
        let plural = if count == 1 { "" } else { "s" };
        format!("{} {} {}{}", verb, count, noun, plural)
    })
}

fn capitalize(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
