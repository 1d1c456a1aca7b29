use crate::model::{is_blank, ResultEntity, ResultKind, TabId};

/// Visible subset for `(query, tab)`, in corpus order. Never sorts, never copies.
pub fn compute_visible<'a>(
    results: &'a [ResultEntity],
    committed_query: &str,
    active_tab: TabId,
) -> Vec<&'a ResultEntity> {
    let needle = query_needle(committed_query);
    results
        .iter()
        .filter(|entity| matches_query(entity, needle.as_deref()))
        .filter(|entity| in_tab(entity.kind, active_tab))
        .collect()
}

pub fn count_for(results: &[ResultEntity], committed_query: &str, tab: TabId) -> usize {
    let needle = query_needle(committed_query);
    results
        .iter()
        .filter(|entity| matches_query(entity, needle.as_deref()))
        .filter(|entity| in_tab(entity.kind, tab))
        .count()
}

pub fn in_tab(kind: ResultKind, tab: TabId) -> bool {
    match tab {
        TabId::All => true,
        TabId::Files => kind.is_file_like(),
        TabId::People => kind == ResultKind::Person,
        // No backing data for these categories yet.
        TabId::Chats | TabId::Lists => false,
    }
}

fn query_needle(committed_query: &str) -> Option<String> {
    if is_blank(committed_query) {
        None
    } else {
        Some(committed_query.to_lowercase())
    }
}

fn matches_query(entity: &ResultEntity, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };

    contains_folded(&entity.title, needle)
        || entity
            .subtitle
            .as_deref()
            .is_some_and(|subtitle| contains_folded(subtitle, needle))
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}
