//! Deep merge of configuration documents

use crate::Document;

/// Merge `overlay` on top of `base`.
///
/// Objects are merged key by key, recursing where both sides hold an object.
/// Any other combination, arrays included, is replaced by the overlay value.
pub fn merge(base: Document, overlay: Document) -> Document {
    match (base, overlay) {
        (Document::Object(mut merged), Document::Object(overlay)) => {
            for (key, value) in overlay {
                let value = match merged.remove(&key) {
                    Some(existing) => merge(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            Document::Object(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Left fold of [`merge`] over `documents`, earliest lowest precedence.
///
/// Returns `None` when there is nothing to merge; a single document comes back unchanged.
pub fn merge_all<I>(documents: I) -> Option<Document>
where
    I: IntoIterator<Item = Document>,
{
    documents.into_iter().reduce(merge)
}
