use async_trait::async_trait;
use chrono::NaiveDate;
use movie_browser::domain::catalog::{CatalogQuery, Category, DateRange, Movie, PageResult};
use movie_browser::infrastructure::repositories::CatalogRepository;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

pub const MOVIES_PER_PAGE: i64 = 2;
pub const TOTAL_PAGES: u32 = 3;

/// In-memory catalog: `TOTAL_PAGES` pages of `MOVIES_PER_PAGE` movies for
/// every (category, language). Movie ids encode where they came from:
/// `language_offset + category_offset + page * 10 + index`.
pub struct FakeCatalog {
    queries: Mutex<Vec<CatalogQuery>>,
    fail: AtomicBool,
    hold: AtomicBool,
    release: Notify,
    dates_everywhere: AtomicBool,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
            hold: AtomicBool::new(false),
            release: Notify::new(),
            dates_everywhere: AtomicBool::new(false),
        }
    }

    /// Number of upstream calls made so far
    pub fn calls(&self) -> usize {
        self.queries.lock().len()
    }

    pub fn last_query(&self) -> Option<CatalogQuery> {
        self.queries.lock().last().cloned()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Send a date range for every category, not only the dated ones
    pub fn set_dates_everywhere(&self, enabled: bool) {
        self.dates_everywhere.store(enabled, Ordering::SeqCst);
    }

    /// Park every following fetch until `release` is called
    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.release.notify_waiters();
        self.release.notify_one();
    }

    pub fn movie_id(query_language: &str, category: Category, page: u32, index: i64) -> i64 {
        let language_offset = if query_language == "es" { 5000 } else { 0 };
        let category_offset = match category {
            Category::Popular => 0,
            Category::NowPlaying => 100,
            Category::TopRated => 200,
            Category::Upcoming => 300,
        };
        language_offset + category_offset + page as i64 * 10 + index
    }

    pub fn date_range() -> DateRange {
        DateRange {
            minimum: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            maximum: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
        }
    }
}

#[async_trait]
impl CatalogRepository for FakeCatalog {
    async fn fetch_page(&self, query: &CatalogQuery) -> Result<PageResult, String> {
        self.queries.lock().push(query.clone());

        if self.hold.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err("TMDB returned 503 Service Unavailable".to_string());
        }

        let results = (0..MOVIES_PER_PAGE)
            .map(|index| {
                let id = Self::movie_id(query.language.as_str(), query.category, query.page, index);
                Movie {
                    id,
                    title: format!("Test Movie {}", id),
                    overview: format!("Test Overview {}", id),
                    poster_path: Some(format!("/test-poster-{}.jpg", id)),
                    release_date: "2023-01-01".to_string(),
                    popularity: 100.0,
                    vote_average: 8.5,
                    original_language: query.language.to_string(),
                }
            })
            .collect();

        let with_dates =
            query.category.shows_date_range() || self.dates_everywhere.load(Ordering::SeqCst);
        let dates = with_dates.then(Self::date_range);

        Ok(PageResult {
            results,
            total_pages: TOTAL_PAGES,
            dates,
        })
    }
}
