//! Backend commands queued from UI to backend worker.

use client_core::FilterQuery;

pub enum BackendCommand {
    /// Fetch the catalog for the given filter query. `request_seq` ties the
    /// eventual completion back to the newest-request gate in the UI.
    FetchCatalog {
        request_seq: u64,
        query: FilterQuery,
    },
    FetchCardImage {
        url: String,
    },
}
