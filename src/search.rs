//! Accent- and case-insensitive search over entity names and descriptions.

use crate::model::Entity;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lower-case `text` and strip diacritics (NFD, combining marks removed).
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when `query` occurs in the entity's name or description.
/// A blank query matches everything.
pub fn matches<E: Entity>(entity: &E, query: &str) -> bool {
    let query = fold(query.trim());
    if query.is_empty() {
        return true;
    }
    fold(entity.name()).contains(&query) || fold(entity.description()).contains(&query)
}

/// Keep the entities matching `query`, in their original order.
pub fn filter<E: Entity>(entities: Vec<E>, query: Option<&str>) -> Vec<E> {
    match query {
        Some(q) => entities.into_iter().filter(|e| matches(e, q)).collect(),
        None => entities,
    }
}

/// File-name friendly form of `text`: folded, whitespace runs become `-`,
/// characters outside `[a-z0-9-_]` dropped.
pub fn slug(text: &str) -> String {
    let folded = fold(text);
    let mut out = String::with_capacity(folded.len());
    for word in folded.split_whitespace() {
        if !out.is_empty() {
            out.push('-');
        }
        out.extend(
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_'),
        );
    }
    out
}
