use crate::ids::{EntityKind, IdentifierStore};

/// Token marking the identifier position in an endpoint template
pub const PLACEHOLDER: &str = "{id}";

/// Substituted when no identifier of the right kind has been collected
pub const UNKNOWN_ID: &str = "unknown-id";

/// At most this many stored identifiers are tried per template
pub const MAX_IDS_PER_TEMPLATE: usize = 2;

pub fn is_parameterized(template: &str) -> bool {
    template.contains(PLACEHOLDER)
}

/// Template with everything from the placeholder onwards removed.
///
/// This is the key used to look up query-parameter variants.
pub fn base_path(template: &str) -> &str {
    match template.find(PLACEHOLDER) {
        Some(index) => &template[..index],
        None => template,
    }
}

/// Expand `template` into concrete paths. Never returns an empty list.
///
/// Templates without a placeholder come back unchanged. Otherwise the first
/// [`MAX_IDS_PER_TEMPLATE`] identifiers of the template's kind are
/// substituted, or [`UNKNOWN_ID`] when none are known, so the endpoint is
/// still probed and documented as failing.
pub fn resolve(template: &str, store: &IdentifierStore) -> Vec<String> {
    if !is_parameterized(template) {
        return vec![template.to_string()];
    }

    let ids = EntityKind::from_template_prefix(template)
        .map(|kind| store.get(kind))
        .unwrap_or(&[]);

    if ids.is_empty() {
        return vec![template.replacen(PLACEHOLDER, UNKNOWN_ID, 1)];
    }

    ids.iter()
        .take(MAX_IDS_PER_TEMPLATE)
        .map(|id| template.replacen(PLACEHOLDER, id, 1))
        .collect()
}

/// Stable partition: plain templates first, then parameterized ones.
///
/// Plain templates are probed first so their responses can fill the
/// identifier store before any placeholder is resolved.
pub fn order_templates(templates: &[String]) -> Vec<String> {
    let (plain, parameterized): (Vec<&String>, Vec<&String>) =
        templates.iter().partition(|template| !is_parameterized(template));

    plain.into_iter().chain(parameterized).cloned().collect()
}
