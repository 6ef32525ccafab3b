/// Bulk-delete age window helpers for channel cleanup.
pub mod cleanup;
/// Compact duration tokens (`10m`, `1h`, `1d`).
pub mod duration;
/// Pure parser helpers.
pub mod parse;
/// Shared time helpers.
pub mod time;
