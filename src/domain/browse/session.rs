use crate::domain::catalog::{CatalogQuery, Category, DateRange, Language, Movie, PageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened when the client reported the sentinel card as visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAdvance {
    Advanced,
    NoMorePages,
    InFlight,
}

/// Permission to run one catalog fetch for a session.
///
/// Issued only while the session is idle; the session stays `loading` until
/// the ticket is handed back through `complete_fetch` or `fail_fetch`.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    pub query: CatalogQuery,
}

/// Browsing state of one client: filters, pagination, accumulated grid and
/// the movie shown in the detail view.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    id: Uuid,
    category: Category,
    language: Language,
    page: u32,
    total_pages: u32,
    movies: Vec<Movie>,
    selected: Option<Movie>,
    dates: Option<DateRange>,
    loading: bool,
    generation: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BrowseSession {
    pub fn new(id: Uuid, category: Category, language: Language) -> Self {
        let now = Utc::now();
        Self {
            id,
            category,
            language,
            page: 1,
            total_pages: 1,
            movies: Vec::new(),
            selected: None,
            dates: None,
            loading: false,
            generation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    pub fn dates(&self) -> Option<&DateRange> {
        self.dates.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Move to `loading` for the given page. Returns `None` when a fetch is
    /// already in flight: the request is dropped, not queued.
    pub fn begin_fetch(&mut self, page: u32) -> Option<FetchTicket> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.touch();
        Some(FetchTicket {
            generation: self.generation,
            query: CatalogQuery::new(self.category, self.language.clone(), page),
        })
    }

    /// Sentinel became visible: ask for the page after the current one
    pub fn request_next_page(&mut self) -> Result<FetchTicket, PageAdvance> {
        if self.loading {
            return Err(PageAdvance::InFlight);
        }
        if !self.has_more() {
            return Err(PageAdvance::NoMorePages);
        }
        self.begin_fetch(self.page + 1).ok_or(PageAdvance::InFlight)
    }

    /// Apply a fetched page. Page 1 replaces the grid, later pages append.
    ///
    /// Returns `false` if the ticket belongs to a filter that has since been
    /// replaced; such results are discarded.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: PageResult) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        let page = ticket.query.page;
        if page == 1 {
            self.movies = result.results;
        } else {
            self.movies.extend(result.results);
        }
        self.page = page;
        self.total_pages = result.total_pages.max(page);
        self.dates = result.dates;
        self.loading = false;
        self.touch();
        true
    }

    /// Return to idle after a failed fetch, keeping everything already loaded
    pub fn fail_fetch(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = false;
        self.touch();
        true
    }

    /// Switch category. Clears the grid and returns the ticket for page 1,
    /// or `None` if the category is unchanged.
    pub fn change_category(&mut self, category: Category) -> Option<FetchTicket> {
        if self.category == category {
            return None;
        }
        self.category = category;
        self.reset();
        self.begin_fetch(1)
    }

    /// Switch language. Same contract as `change_category`.
    pub fn change_language(&mut self, language: Language) -> Option<FetchTicket> {
        if self.language == language {
            return None;
        }
        self.language = language;
        self.reset();
        self.begin_fetch(1)
    }

    /// Open the detail view for a movie in the grid
    pub fn select(&mut self, movie_id: i64) -> Option<&Movie> {
        let movie = self.movies.iter().find(|m| m.id == movie_id)?.clone();
        self.selected = Some(movie);
        self.touch();
        self.selected.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
        self.touch();
    }

    fn reset(&mut self) {
        self.movies.clear();
        self.page = 1;
        self.total_pages = 1;
        self.dates = None;
        // the fetch of the previous filter keeps running but can no longer land
        self.loading = false;
        self.generation += 1;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
