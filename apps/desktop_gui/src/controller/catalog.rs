//! Newest-request gate for catalog fetches.
//!
//! Filter edits can outrun the network: each edit issues a fetch, and the
//! completions may land in any order. Every fetch is tagged with a
//! monotonically increasing sequence number, and only the completion that
//! matches the most recently issued number may touch the displayed list.

use shared::domain::Product;

#[derive(Default)]
pub struct CatalogFetchState {
    products: Vec<Product>,
    loading: bool,
    latest_seq: u64,
}

impl CatalogFetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of a new fetch and returns its sequence number. Any
    /// fetch issued earlier is stale from this point on.
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_seq += 1;
        self.loading = true;
        self.latest_seq
    }

    /// Commits a completed fetch. Returns false (and changes nothing) when
    /// the completion is stale.
    pub fn commit(&mut self, request_seq: u64, products: Vec<Product>) -> bool {
        if request_seq != self.latest_seq {
            return false;
        }
        self.products = products;
        self.loading = false;
        true
    }

    /// Records a failed fetch. The prior list is retained; the loading flag
    /// clears only when the failure belongs to the newest request.
    pub fn fail(&mut self, request_seq: u64) -> bool {
        if request_seq != self.latest_seq {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
