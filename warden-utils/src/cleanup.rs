use twilight_model::id::{Id, marker::MessageMarker};

/// Discord refuses bulk deletion of messages older than this.
pub const BULK_DELETE_MAX_AGE_SECS: u64 = 14 * 24 * 60 * 60;
const BULK_DELETE_SAFETY_BUFFER_SECS: u64 = 60 * 60;

/// Oldest timestamp (unix seconds) still safe to bulk-delete at `now_secs`.
pub fn bulk_delete_cutoff(now_secs: u64) -> i64 {
    let cutoff = now_secs
        .saturating_sub(BULK_DELETE_MAX_AGE_SECS.saturating_sub(BULK_DELETE_SAFETY_BUFFER_SECS));
    i64::try_from(cutoff).unwrap_or(i64::MAX)
}

/// Messages split by whether they can still be bulk-deleted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BulkDeletePartition {
    pub deletable: Vec<Id<MessageMarker>>,
    pub too_old: usize,
}

/// Split `(id, unix_secs)` pairs into bulk-deletable ids and a count of skipped ones.
pub fn partition_bulk_deletable(
    messages: impl IntoIterator<Item = (Id<MessageMarker>, i64)>,
    now_secs: u64,
) -> BulkDeletePartition {
    let cutoff = bulk_delete_cutoff(now_secs);
    let mut partition = BulkDeletePartition::default();

    for (id, sent_at) in messages {
        if sent_at >= cutoff {
            partition.deletable.push(id);
        } else {
            partition.too_old += 1;
        }
    }

    partition
}
