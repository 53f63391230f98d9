//! Search state for the monster viewer.
//!
//! [`SearchController`] owns the query text and the last result set. Every
//! request it issues carries a sequence number; a response is applied only
//! if it answers the most recently issued request, so a slow early search
//! can never overwrite a later one.

use async_trait::async_trait;
use bestiary_api::{Error as ApiError, Monster, MonsterApi, SearchQuery, Spell};

/// Read-only lookups against the Monster Search Service.
#[async_trait]
pub trait MonsterSearch: Send + Sync {
    /// Case-insensitive name-substring search.
    async fn search_monsters(&self, query: &SearchQuery) -> Result<Vec<Monster>, ApiError>;

    async fn get_monster(&self, id: i64) -> Result<Monster, ApiError>;

    async fn search_spells(&self, query: &SearchQuery) -> Result<Vec<Spell>, ApiError>;
}

#[async_trait]
impl MonsterSearch for MonsterApi {
    async fn search_monsters(&self, query: &SearchQuery) -> Result<Vec<Monster>, ApiError> {
        self.search_monsters_page(query).await
    }

    async fn get_monster(&self, id: i64) -> Result<Monster, ApiError> {
        MonsterApi::get_monster(self, id).await
    }

    async fn search_spells(&self, query: &SearchQuery) -> Result<Vec<Spell>, ApiError> {
        MonsterApi::search_spells(self, query).await
    }
}

/// Handle for one issued search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page.unwrap_or(1)
    }
}

/// What the viewer should show alongside the results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Pending,
    /// The latest request failed; results are from an earlier search.
    Failed(String),
}

/// What [`SearchController::complete`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced; carries the new result count.
    Applied(usize),
    /// The request failed; results were left alone.
    Failed,
    /// A newer request has been issued since; the response was dropped.
    Stale,
}

/// The viewer's search state.
#[derive(Debug, Clone)]
pub struct SearchController {
    query: String,
    results: Vec<Monster>,
    status: SearchStatus,
    page: u32,
    page_size: u32,
    /// Name of the search the current results answer. Paging reuses it.
    shown_query: Option<String>,
    last_seq: u64,
}

impl SearchController {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            status: SearchStatus::Idle,
            page: 1,
            page_size: page_size.max(1),
            shown_query: None,
            last_seq: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn results(&self) -> &[Monster] {
        &self.results
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SearchStatus::Pending
    }

    /// Page of the results currently shown, starting at 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The name the current results were fetched for, if any search has
    /// succeeded yet.
    pub fn shown_query(&self) -> Option<&str> {
        self.shown_query.as_deref()
    }

    /// Issue a request for page 1 of the current query text.
    pub fn begin_search(&mut self) -> SearchTicket {
        let name = self.query.clone();
        self.issue(name, 1)
    }

    /// Issue a request for the page after the one shown. `None` until a
    /// search has succeeded.
    pub fn next_page(&mut self) -> Option<SearchTicket> {
        let name = self.shown_query.clone()?;
        let page = self.page.saturating_add(1);
        Some(self.issue(name, page))
    }

    /// Issue a request for the page before the one shown. `None` on page 1.
    pub fn previous_page(&mut self) -> Option<SearchTicket> {
        if self.page <= 1 {
            return None;
        }
        let name = self.shown_query.clone()?;
        let page = self.page - 1;
        Some(self.issue(name, page))
    }

    fn issue(&mut self, name: String, page: u32) -> SearchTicket {
        self.last_seq += 1;
        self.status = SearchStatus::Pending;

        let ticket = SearchTicket {
            seq: self.last_seq,
            query: SearchQuery::by_name(name)
                .with_page(page)
                .with_page_count(self.page_size),
        };
        tracing::debug!(seq = ticket.seq, name = %ticket.query.name, page, "search issued");
        ticket
    }

    /// Apply the response to `ticket`, unless a newer request is out.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Monster>, ApiError>,
    ) -> SearchOutcome {
        if ticket.seq != self.last_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.last_seq,
                "discarding stale search response"
            );
            return SearchOutcome::Stale;
        }

        match result {
            Ok(monsters) => {
                let count = monsters.len();
                self.page = ticket.page();
                self.results = monsters;
                self.shown_query = Some(ticket.query.name);
                self.status = SearchStatus::Idle;
                SearchOutcome::Applied(count)
            }
            Err(e) => {
                tracing::warn!(seq = ticket.seq, error = %e, "search failed");
                self.status = SearchStatus::Failed(e.to_string());
                SearchOutcome::Failed
            }
        }
    }

    /// Run a ticket against `service` and apply the response.
    pub async fn run(
        &mut self,
        ticket: SearchTicket,
        service: &dyn MonsterSearch,
    ) -> SearchOutcome {
        let result = service.search_monsters(ticket.query()).await;
        self.complete(ticket, result)
    }

    /// Search for the current query text and wait for the answer.
    pub async fn submit(&mut self, service: &dyn MonsterSearch) -> SearchOutcome {
        let ticket = self.begin_search();
        self.run(ticket, service).await
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblins() -> Vec<Monster> {
        vec![Monster::new("Goblin"), Monster::new("Goblin Boss")]
    }

    fn server_error() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let controller = SearchController::default();
        assert_eq!(controller.query(), "");
        assert!(controller.results().is_empty());
        assert_eq!(controller.status(), &SearchStatus::Idle);
        assert_eq!(controller.page(), 1);
    }

    #[test]
    fn test_ticket_carries_query_and_paging() {
        let mut controller = SearchController::new(25);
        controller.set_query("gob");

        let ticket = controller.begin_search();
        assert_eq!(ticket.query().name, "gob");
        assert_eq!(ticket.page(), 1);
        assert_eq!(ticket.query().page_count, Some(25));
        assert!(controller.is_pending());
    }

    #[test]
    fn test_success_replaces_results() {
        let mut controller = SearchController::default();
        let first = controller.begin_search();
        controller.complete(first, Ok(goblins()));

        let second = controller.begin_search();
        let outcome = controller.complete(second, Ok(vec![Monster::new("Orc")]));

        assert_eq!(outcome, SearchOutcome::Applied(1));
        assert_eq!(controller.results().len(), 1);
        assert_eq!(controller.results()[0].name, "Orc");
    }

    #[test]
    fn test_failure_keeps_results_and_reports() {
        let mut controller = SearchController::default();
        let first = controller.begin_search();
        controller.complete(first, Ok(goblins()));

        let second = controller.begin_search();
        let outcome = controller.complete(second, Err(server_error()));

        assert_eq!(outcome, SearchOutcome::Failed);
        assert_eq!(controller.results().len(), 2);
        assert!(matches!(controller.status(), SearchStatus::Failed(msg) if msg.contains("500")));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut controller = SearchController::default();
        controller.set_query("gob");
        let slow = controller.begin_search();
        controller.set_query("orc");
        let fast = controller.begin_search();

        assert_eq!(
            controller.complete(fast, Ok(vec![Monster::new("Orc")])),
            SearchOutcome::Applied(1)
        );
        assert_eq!(controller.complete(slow, Ok(goblins())), SearchOutcome::Stale);

        assert_eq!(controller.results()[0].name, "Orc");
        assert_eq!(controller.shown_query(), Some("orc"));
    }

    #[test]
    fn test_stale_failure_does_not_touch_status() {
        let mut controller = SearchController::default();
        let old = controller.begin_search();
        let new = controller.begin_search();
        controller.complete(new, Ok(goblins()));

        assert_eq!(controller.complete(old, Err(server_error())), SearchOutcome::Stale);
        assert_eq!(controller.status(), &SearchStatus::Idle);
    }

    #[test]
    fn test_paging_requires_a_shown_search() {
        let mut controller = SearchController::default();
        assert!(controller.next_page().is_none());
        assert!(controller.previous_page().is_none());
    }

    #[test]
    fn test_paging_moves_between_pages() {
        let mut controller = SearchController::default();
        controller.set_query("dragon");
        let first = controller.begin_search();
        controller.complete(first, Ok(goblins()));

        // Editing the box does not change what paging pages through.
        controller.set_query("something else");

        let next = controller.next_page().unwrap();
        assert_eq!(next.query().name, "dragon");
        assert_eq!(next.page(), 2);
        controller.complete(next, Ok(vec![Monster::new("Red Dragon")]));
        assert_eq!(controller.page(), 2);

        let prev = controller.previous_page().unwrap();
        assert_eq!(prev.page(), 1);
        controller.complete(prev, Ok(goblins()));
        assert_eq!(controller.page(), 1);
        assert!(controller.previous_page().is_none());
    }

    #[test]
    fn test_new_search_resets_to_first_page() {
        let mut controller = SearchController::default();
        let first = controller.begin_search();
        controller.complete(first, Ok(goblins()));
        let next = controller.next_page().unwrap();
        controller.complete(next, Ok(goblins()));
        assert_eq!(controller.page(), 2);

        let fresh = controller.begin_search();
        controller.complete(fresh, Ok(goblins()));
        assert_eq!(controller.page(), 1);
    }
}
