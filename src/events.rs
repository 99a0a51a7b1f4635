// Change notifications for the phrase store
// Observer trait in place of framework model signals; default no-op methods
// let tests and UI layers implement only the events they watch.

/// Observer for [`PhraseStore`](crate::store::PhraseStore) change
/// notifications.
///
/// All methods are invoked synchronously on the context performing the
/// triggering mutation (or applying a background completion), so a table view
/// stays consistent without polling. Row ranges are inclusive.
pub trait StoreObserver: Send + Sync {
    /// Rows `first..=last` were inserted.
    fn rows_inserted(&self, _first: usize, _last: usize) {}

    /// Rows `first..=last` were removed.
    fn rows_removed(&self, _first: usize, _last: usize) {}

    /// A cell in `row` was overwritten.
    fn row_changed(&self, _row: usize) {}

    /// The whole sequence was replaced or cleared.
    fn reset(&self) {}

    /// The dirty flag flipped. Fired only on actual transitions.
    fn dirty_changed(&self, _dirty: bool) {}
}
