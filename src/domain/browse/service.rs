use super::error::BrowseServiceError;
use super::session::{BrowseSession, FetchTicket, PageAdvance};
use super::{
    ChangeCategoryRequest, ChangeLanguageRequest, CreateSessionRequest, NextPageResponse,
    SelectMovieRequest, SessionResponse,
};
use crate::domain::catalog::{CatalogService, CatalogServiceApi, Category, Language};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

type SessionHandle = Arc<Mutex<BrowseSession>>;

pub struct BrowseService {
    catalog_service: Arc<CatalogService>,
    sessions: Cache<Uuid, SessionHandle>,
    default_language: Language,
    supported_languages: Vec<Language>,
    image_base_url: String,
}

impl BrowseService {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        session_idle: Duration,
        default_language: Language,
        supported_languages: Vec<Language>,
        image_base_url: String,
    ) -> Self {
        let sessions = Cache::builder().time_to_idle(session_idle).build();

        Self {
            catalog_service,
            sessions,
            default_language,
            supported_languages,
            image_base_url,
        }
    }

    /// Approximate number of live sessions
    pub fn session_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

#[async_trait]
pub trait BrowseServiceApi: Send + Sync {
    /// Start a session and load its first page
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<SessionResponse, BrowseServiceError>;

    async fn get_session(&self, session_id: Uuid) -> Result<SessionResponse, BrowseServiceError>;

    async fn delete_session(&self, session_id: Uuid) -> Result<(), BrowseServiceError>;

    /// Reset the grid and load page 1 of the new category
    async fn change_category(
        &self,
        session_id: Uuid,
        request: ChangeCategoryRequest,
    ) -> Result<SessionResponse, BrowseServiceError>;

    /// Reset the grid and load page 1 in the new language
    async fn change_language(
        &self,
        session_id: Uuid,
        request: ChangeLanguageRequest,
    ) -> Result<SessionResponse, BrowseServiceError>;

    /// The sentinel card became visible.
    ///
    /// Loads the next page only while more pages remain and nothing is in
    /// flight; otherwise the request is dropped and the outcome says why.
    async fn next_page(&self, session_id: Uuid) -> Result<NextPageResponse, BrowseServiceError>;

    /// Open the detail view
    async fn select_movie(
        &self,
        session_id: Uuid,
        request: SelectMovieRequest,
    ) -> Result<SessionResponse, BrowseServiceError>;

    /// Close the detail view and go back to the grid
    async fn close_detail(&self, session_id: Uuid) -> Result<SessionResponse, BrowseServiceError>;
}

#[async_trait]
impl BrowseServiceApi for BrowseService {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<SessionResponse, BrowseServiceError> {
        let category = request
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?
            .unwrap_or_default();
        let language = match request.language.as_deref() {
            Some(code) => self.parse_language(code)?,
            None => self.default_language.clone(),
        };

        let session_id = Uuid::new_v4();
        let mut session = BrowseSession::new(session_id, category, language);
        let ticket = session.begin_fetch(1);

        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(session_id, handle.clone()).await;

        tracing::info!(
            session_id = %session_id,
            category = %category,
            "Browsing session created"
        );

        if let Some(ticket) = ticket {
            self.fetch(handle.clone(), ticket).await;
        }

        Ok(self.snapshot(&handle).await)
    }

    async fn get_session(&self, session_id: Uuid) -> Result<SessionResponse, BrowseServiceError> {
        let handle = self.find_session(session_id).await?;
        Ok(self.snapshot(&handle).await)
    }

    async fn delete_session(&self, session_id: Uuid) -> Result<(), BrowseServiceError> {
        self.sessions
            .remove(&session_id)
            .await
            .map(|_| ())
            .ok_or(BrowseServiceError::SessionNotFound)
    }

    async fn change_category(
        &self,
        session_id: Uuid,
        request: ChangeCategoryRequest,
    ) -> Result<SessionResponse, BrowseServiceError> {
        let category: Category = request.category.parse()?;
        let handle = self.find_session(session_id).await?;

        let ticket = handle.lock().await.change_category(category);
        if let Some(ticket) = ticket {
            tracing::info!(session_id = %session_id, category = %category, "Category changed");
            self.fetch(handle.clone(), ticket).await;
        }

        Ok(self.snapshot(&handle).await)
    }

    async fn change_language(
        &self,
        session_id: Uuid,
        request: ChangeLanguageRequest,
    ) -> Result<SessionResponse, BrowseServiceError> {
        let language = self.parse_language(&request.language)?;
        let handle = self.find_session(session_id).await?;

        let ticket = handle.lock().await.change_language(language);
        if let Some(ticket) = ticket {
            tracing::info!(
                session_id = %session_id,
                language = %ticket.query.language,
                "Language changed"
            );
            self.fetch(handle.clone(), ticket).await;
        }

        Ok(self.snapshot(&handle).await)
    }

    async fn next_page(&self, session_id: Uuid) -> Result<NextPageResponse, BrowseServiceError> {
        let handle = self.find_session(session_id).await?;

        let request = handle.lock().await.request_next_page();
        let outcome = match request {
            Ok(ticket) => {
                self.fetch(handle.clone(), ticket).await;
                PageAdvance::Advanced
            }
            Err(outcome) => {
                tracing::debug!(
                    session_id = %session_id,
                    outcome = ?outcome,
                    "Next page request dropped"
                );
                outcome
            }
        };

        Ok(NextPageResponse {
            outcome,
            session: self.snapshot(&handle).await,
        })
    }

    async fn select_movie(
        &self,
        session_id: Uuid,
        request: SelectMovieRequest,
    ) -> Result<SessionResponse, BrowseServiceError> {
        let handle = self.find_session(session_id).await?;
        let mut session = handle.lock().await;

        if session.select(request.movie_id).is_none() {
            return Err(BrowseServiceError::MovieNotFound(request.movie_id));
        }

        Ok(SessionResponse::from_session(&session, &self.image_base_url))
    }

    async fn close_detail(&self, session_id: Uuid) -> Result<SessionResponse, BrowseServiceError> {
        let handle = self.find_session(session_id).await?;
        let mut session = handle.lock().await;
        session.close_detail();
        Ok(SessionResponse::from_session(&session, &self.image_base_url))
    }
}

impl BrowseService {
    async fn find_session(&self, session_id: Uuid) -> Result<SessionHandle, BrowseServiceError> {
        self.sessions
            .get(&session_id)
            .await
            .ok_or(BrowseServiceError::SessionNotFound)
    }

    fn parse_language(&self, code: &str) -> Result<Language, BrowseServiceError> {
        let language = Language::parse(code)?;
        if !self.supported_languages.is_empty() && !self.supported_languages.contains(&language) {
            return Err(BrowseServiceError::Invalid(format!(
                "Unsupported language: {}",
                code
            )));
        }
        Ok(language)
    }

    async fn snapshot(&self, handle: &SessionHandle) -> SessionResponse {
        let session = handle.lock().await;
        SessionResponse::from_session(&session, &self.image_base_url)
    }

    /// Run the fetch described by `ticket` and fold the result into the session.
    ///
    /// The session lock is not held during the catalog call. The work runs on
    /// its own task so that a dropped HTTP request cannot leave the session
    /// stuck in `loading`. Failures are logged and never reach the caller.
    async fn fetch(&self, handle: SessionHandle, ticket: FetchTicket) {
        let catalog_service = self.catalog_service.clone();

        let task = tokio::spawn(async move {
            let outcome = catalog_service.get_movies(&ticket.query).await;
            let mut session = handle.lock().await;

            match outcome {
                Ok(page) => {
                    if !session.complete_fetch(&ticket, page.result) {
                        tracing::debug!(
                            session_id = %session.id(),
                            category = %ticket.query.category,
                            page = ticket.query.page,
                            "Discarding page fetched for a replaced filter"
                        );
                    }
                }
                Err(e) => {
                    tracing::error!(
                        session_id = %session.id(),
                        category = %ticket.query.category,
                        language = %ticket.query.language,
                        page = ticket.query.page,
                        error = %e,
                        "Error fetching movies"
                    );
                    session.fail_fetch(&ticket);
                }
            }
        });

        if let Err(e) = task.await {
            tracing::error!(error = %e, "Movie fetch task failed");
        }
    }
}
