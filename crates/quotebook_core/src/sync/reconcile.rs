//! Local-wins merge of remote quotes into the local list.

use crate::model::quote::{Quote, QuoteOrigin};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
}

/// One net-new quote contributed by the remote list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub quote: Quote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// `local` unchanged, followed by the additions in remote order.
    pub merged: Vec<Quote>,
    pub changes: Vec<ChangeRecord>,
}

impl Reconciliation {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Appends remote quotes whose text is not already known (ignoring case).
///
/// Texts added during this pass count as known, so duplicates inside one
/// remote batch are collapsed as well.
pub fn reconcile(local: &[Quote], remote: &[Quote]) -> Reconciliation {
    let mut known: HashSet<String> = local.iter().map(Quote::identity_key).collect();
    let mut merged = local.to_vec();
    let mut changes = Vec::new();

    for quote in remote {
        if !known.insert(quote.identity_key()) {
            continue;
        }
        let added = quote.clone().with_origin(QuoteOrigin::Remote);
        merged.push(added.clone());
        changes.push(ChangeRecord {
            kind: ChangeKind::Added,
            quote: added,
        });
    }

    Reconciliation { merged, changes }
}
