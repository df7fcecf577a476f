use std::collections::HashSet;

use cinescout_models::{sort_movies, MovieSummary, SortKey};
use cinescout_omdb::{CatalogError, MovieCatalog, SearchPage};
use tracing::{debug, warn};

/// Fixed user-facing message for any failed fetch.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to fetch movies. Try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Error(String),
}

/// Permission to fetch one page, handed out by `begin_*` and redeemed by
/// `fold`. The generation pins the ticket to the search it was issued
/// under; a ticket that outlives a reset folds to nothing.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Accumulating search state over a `MovieCatalog`.
///
/// Results are cleared only by a new search; load-more and page-jump
/// append. Fetch results are applied in the order they resolve, and
/// appends deduplicate by imdb_id, so overlapping or repeated pages
/// cannot corrupt the list.
pub struct SearchSession<C: MovieCatalog> {
    catalog: C,
    query: String,
    page: u32,
    results: Vec<MovieSummary>,
    status: SearchStatus,
    sort_key: SortKey,
    total_results: u32,
    max_results: Option<usize>,
    generation: u64,
}

impl<C: MovieCatalog> SearchSession<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            query: String::new(),
            page: 1,
            results: Vec::new(),
            status: SearchStatus::Idle,
            sort_key: SortKey::Title,
            total_results: 0,
            max_results: None,
            generation: 0,
        }
    }

    pub fn with_max_results(mut self, cap: Option<usize>) -> Self {
        self.max_results = cap;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Page of the last completed fetch.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Server-reported match count for the current query.
    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    /// Start a fresh search: clear accumulated results and fetch page 1.
    /// A blank or whitespace-only query is a no-op.
    pub async fn start_search(&mut self, query: &str) {
        let Some(ticket) = self.begin_search(query) else {
            return;
        };
        self.run(ticket).await;
    }

    /// Fetch the next page and append it to the accumulated results.
    pub async fn load_more(&mut self) {
        let Some(ticket) = self.begin_load_more() else {
            return;
        };
        self.run(ticket).await;
    }

    /// Fetch an arbitrary page and append it. Zero is a no-op; negative
    /// and non-numeric input never parses to a `u32` at the call site.
    pub async fn jump_to_page(&mut self, page: u32) {
        let Some(ticket) = self.begin_jump(page) else {
            return;
        };
        self.run(ticket).await;
    }

    /// Re-order the accumulated results in memory. No network traffic;
    /// the key sticks, but later appends land unsorted until the next
    /// explicit re-sort.
    pub fn set_sort_order(&mut self, key: SortKey) {
        self.sort_key = key;
        sort_movies(&mut self.results, key);
    }

    /// First half of a search: reset state and issue a ticket for page 1.
    pub fn begin_search(&mut self, query: &str) -> Option<FetchTicket> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.generation += 1;
        self.query = trimmed.to_string();
        self.page = 1;
        self.results.clear();
        self.total_results = 0;
        self.status = SearchStatus::Loading;
        Some(FetchTicket {
            generation: self.generation,
            page: 1,
        })
    }

    /// Ticket for the page after the last completed fetch. None until a
    /// search has been started.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if self.query.is_empty() {
            return None;
        }
        self.status = SearchStatus::Loading;
        Some(FetchTicket {
            generation: self.generation,
            page: self.page + 1,
        })
    }

    /// Ticket for an arbitrary positive page of the current query.
    pub fn begin_jump(&mut self, page: u32) -> Option<FetchTicket> {
        if page == 0 || self.query.is_empty() {
            return None;
        }
        self.status = SearchStatus::Loading;
        Some(FetchTicket {
            generation: self.generation,
            page,
        })
    }

    /// Fold a fetch outcome into the session. Failures become the fixed
    /// error status and leave accumulated results untouched; stale
    /// tickets (issued before the last reset) are discarded.
    pub fn fold(&mut self, ticket: FetchTicket, outcome: Result<SearchPage, CatalogError>) {
        if ticket.generation != self.generation {
            debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale fetch result"
            );
            return;
        }

        match outcome {
            Ok(page) => {
                self.page = ticket.page;
                self.total_results = page.total_results;
                self.append_items(page.items);
                self.status = SearchStatus::Idle;
            }
            Err(err) => {
                warn!(error = %err, page = ticket.page, "fetch failed");
                self.status = SearchStatus::Error(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    async fn run(&mut self, ticket: FetchTicket) {
        let query = self.query.clone();
        let outcome = self.catalog.search(&query, ticket.page()).await;
        self.fold(ticket, outcome);
    }

    fn append_items(&mut self, items: Vec<MovieSummary>) {
        let mut seen: HashSet<String> = self
            .results
            .iter()
            .map(|movie| movie.imdb_id.clone())
            .collect();

        for item in items {
            if !seen.insert(item.imdb_id.clone()) {
                // Pages overlap on the server side; keep the first copy
                continue;
            }
            if let Some(cap) = self.max_results {
                if self.results.len() >= cap {
                    warn!(cap, "accumulated result cap reached, dropping the rest");
                    break;
                }
            }
            self.results.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cinescout_models::MovieDetail;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Catalog fake that pops a scripted outcome per search call.
    struct ScriptedCatalog {
        responses: Mutex<VecDeque<Result<SearchPage, CatalogError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedCatalog {
        fn new(responses: Vec<Result<SearchPage, CatalogError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MovieCatalog for &ScriptedCatalog {
        async fn search(&self, _query: &str, _page: u32) -> Result<SearchPage, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(SearchPage::default()))
        }

        async fn lookup(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
            Err(CatalogError::Api(format!("no detail scripted for {}", imdb_id)))
        }
    }

    fn movie(id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            imdb_id: id.to_string(),
            title: title.to_string(),
            year: "2000".to_string(),
            poster: String::new(),
            released: None,
            imdb_rating: None,
        }
    }

    fn page(items: Vec<MovieSummary>, total: u32) -> Result<SearchPage, CatalogError> {
        Ok(SearchPage {
            items,
            total_results: total,
        })
    }

    fn fetch_error() -> Result<SearchPage, CatalogError> {
        Err(CatalogError::Api("Invalid API key!".to_string()))
    }

    #[tokio::test]
    async fn test_start_search_replaces_results() {
        let catalog = ScriptedCatalog::new(vec![
            page(vec![movie("tt1", "First")], 1),
            page(vec![movie("tt2", "Second")], 1),
        ]);
        let mut session = SearchSession::new(&catalog);

        session.start_search("first").await;
        assert_eq!(session.results().len(), 1);

        session.start_search("second").await;
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].imdb_id, "tt2");
        assert_eq!(session.page(), 1);
        assert_eq!(*session.status(), SearchStatus::Idle);
    }

    #[tokio::test]
    async fn test_blank_query_is_a_no_op() {
        let catalog = ScriptedCatalog::new(vec![page(vec![movie("tt1", "First")], 1)]);
        let mut session = SearchSession::new(&catalog);
        session.start_search("batman").await;

        session.start_search("   ").await;
        session.start_search("").await;

        assert_eq!(catalog.calls(), 1);
        assert_eq!(session.query(), "batman");
        assert_eq!(session.results().len(), 1);
        assert_eq!(*session.status(), SearchStatus::Idle);
    }

    #[tokio::test]
    async fn test_empty_page_is_success_not_error() {
        let catalog = ScriptedCatalog::new(vec![page(vec![], 0)]);
        let mut session = SearchSession::new(&catalog);

        session.start_search("zzzzz").await;
        assert!(session.results().is_empty());
        assert_eq!(*session.status(), SearchStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_start_search_sets_error_and_empty_results() {
        let catalog = ScriptedCatalog::new(vec![fetch_error()]);
        let mut session = SearchSession::new(&catalog);

        session.start_search("batman").await;
        assert!(session.results().is_empty());
        assert_eq!(
            *session.status(),
            SearchStatus::Error(FETCH_ERROR_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_load_more_appends() {
        let catalog = ScriptedCatalog::new(vec![
            page(vec![movie("tt1", "One")], 3),
            page(vec![movie("tt2", "Two")], 3),
            page(vec![movie("tt3", "Three")], 3),
        ]);
        let mut session = SearchSession::new(&catalog);

        session.start_search("batman").await;
        session.load_more().await;
        session.load_more().await;

        assert_eq!(session.results().len(), 3);
        assert_eq!(session.page(), 3);
        let ids: Vec<&str> = session.results().iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3"]);
    }

    #[tokio::test]
    async fn test_failed_load_more_preserves_results() {
        let catalog = ScriptedCatalog::new(vec![
            page(vec![movie("tt1", "One")], 2),
            fetch_error(),
        ]);
        let mut session = SearchSession::new(&catalog);

        session.start_search("batman").await;
        session.load_more().await;

        assert_eq!(session.results().len(), 1);
        assert_eq!(session.page(), 1); // cursor only advances on success
        assert_eq!(
            *session.status(),
            SearchStatus::Error(FETCH_ERROR_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_load_more_before_any_search_is_a_no_op() {
        let catalog = ScriptedCatalog::new(vec![]);
        let mut session = SearchSession::new(&catalog);

        session.load_more().await;
        assert_eq!(catalog.calls(), 0);
        assert_eq!(*session.status(), SearchStatus::Idle);
    }

    #[tokio::test]
    async fn test_jump_to_page_zero_is_a_no_op() {
        let catalog = ScriptedCatalog::new(vec![page(vec![movie("tt1", "One")], 1)]);
        let mut session = SearchSession::new(&catalog);
        session.start_search("batman").await;

        session.jump_to_page(0).await;

        assert_eq!(catalog.calls(), 1);
        assert_eq!(session.page(), 1);
        assert_eq!(*session.status(), SearchStatus::Idle);
    }

    #[tokio::test]
    async fn test_jump_to_page_appends_like_load_more() {
        let catalog = ScriptedCatalog::new(vec![
            page(vec![movie("tt1", "One")], 50),
            page(vec![movie("tt9", "Nine")], 50),
        ]);
        let mut session = SearchSession::new(&catalog);

        session.start_search("batman").await;
        session.jump_to_page(5).await;

        assert_eq!(session.results().len(), 2);
        assert_eq!(session.page(), 5);
    }

    #[tokio::test]
    async fn test_appends_deduplicate_by_id() {
        let catalog = ScriptedCatalog::new(vec![
            page(vec![movie("tt1", "One"), movie("tt2", "Two")], 3),
            page(vec![movie("tt2", "Two"), movie("tt3", "Three")], 3),
        ]);
        let mut session = SearchSession::new(&catalog);

        session.start_search("batman").await;
        session.load_more().await;

        let ids: Vec<&str> = session.results().iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3"]);
    }

    #[tokio::test]
    async fn test_max_results_cap() {
        let catalog = ScriptedCatalog::new(vec![page(
            vec![movie("tt1", "One"), movie("tt2", "Two"), movie("tt3", "Three")],
            3,
        )]);
        let mut session = SearchSession::new(&catalog).with_max_results(Some(2));

        session.start_search("batman").await;
        assert_eq!(session.results().len(), 2);
    }

    #[tokio::test]
    async fn test_sort_does_not_touch_the_network() {
        let catalog = ScriptedCatalog::new(vec![page(
            vec![movie("tt2", "B Movie"), movie("tt1", "A Movie")],
            2,
        )]);
        let mut session = SearchSession::new(&catalog);
        session.start_search("movie").await;

        session.set_sort_order(SortKey::Title);

        assert_eq!(catalog.calls(), 1);
        assert_eq!(session.results()[0].title, "A Movie");
        assert_eq!(session.sort_key(), SortKey::Title);
    }

    #[tokio::test]
    async fn test_appends_after_sort_land_unsorted() {
        let catalog = ScriptedCatalog::new(vec![
            page(vec![movie("tt2", "B Movie"), movie("tt1", "A Movie")], 3),
            page(vec![movie("tt0", "0 Movie")], 3),
        ]);
        let mut session = SearchSession::new(&catalog);
        session.start_search("movie").await;
        session.set_sort_order(SortKey::Title);

        session.load_more().await;

        // The new page is appended, not merged into sorted position
        assert_eq!(session.results()[2].title, "0 Movie");
    }

    #[tokio::test]
    async fn test_stale_ticket_is_discarded_after_reset() {
        let catalog = ScriptedCatalog::new(vec![page(vec![movie("tt1", "One")], 1)]);
        let mut session = SearchSession::new(&catalog);
        session.start_search("batman").await;

        let stale = session.begin_load_more().unwrap();
        let fresh = session.begin_search("superman").unwrap();

        // The old-query response resolves after the reset: it must not
        // leak into the new query's results
        session.fold(stale, page(vec![movie("tt9", "Old Query Item")], 9));
        assert!(session.results().is_empty());

        session.fold(fresh, page(vec![movie("tt5", "New Query Item")], 1));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].imdb_id, "tt5");
        assert_eq!(*session.status(), SearchStatus::Idle);
    }

    #[tokio::test]
    async fn test_overlapping_folds_apply_in_resolution_order() {
        let catalog = ScriptedCatalog::new(vec![page(vec![movie("tt1", "One")], 9)]);
        let mut session = SearchSession::new(&catalog);
        session.start_search("batman").await;

        // Two load-more tickets issued before either resolves: both ask
        // for the page after the last completed fetch
        let first = session.begin_load_more().unwrap();
        let second = session.begin_load_more().unwrap();
        assert_eq!(first.page(), 2);
        assert_eq!(second.page(), 2);

        // They resolve out of order; both folds apply, dedup keeps the
        // list consistent and neither append is dropped
        session.fold(second, page(vec![movie("tt2", "Two")], 9));
        session.fold(first, page(vec![movie("tt2", "Two"), movie("tt3", "Three")], 9));

        let ids: Vec<&str> = session.results().iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3"]);
        assert_eq!(session.page(), 2);
        assert_eq!(*session.status(), SearchStatus::Idle);
    }
}
