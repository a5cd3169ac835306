use crate::clients::{AuthClient, SearchClient};
use crate::config::{ClientConfig, ConfigError};
use crate::model::{GoogleAuthRequest, LoginRequest, SignupRequest, User};
use crate::search::{self, SearchHandle};
use crate::slices::{self, AllReviews, CreatorCourses, CurrentUser, PublishedCourses};
use crate::speech::{RecognitionConfig, SpeechCapture, SpeechPlatform, SpeechPlayback};
use crate::store::CourseStore;
use std::sync::Arc;
use store_sync::{
    FetchError, HttpFetcher, ResourceFetcher, ResourceResult, StoreError, SyncHook, SyncTask,
};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

const SEARCH_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// The running client: four synced slices, the search actor and the auth contract.
///
/// # Example
///
/// ```ignore
/// let mut system = CourseSystem::new(&ClientConfig::default(), SpeechPlatform::console())?;
///
/// for task in system.mount().await? {
///     task.finished().await?;
/// }
/// let courses = system.store().courses.get().await?;
///
/// system.search().submit("rust").await?;
/// let view = system.search().settled().await?;
///
/// system.shutdown().await?;
/// ```
pub struct CourseSystem {
    store: CourseStore,
    search: SearchHandle,
    auth: AuthClient,
    courses_hook: SyncHook<PublishedCourses>,
    reviews_hook: SyncHook<AllReviews>,
    current_user_hook: SyncHook<CurrentUser>,
    /// Moved into the watcher task on mount.
    creator_hook: Option<SyncHook<CreatorCourses>>,
    watcher: Option<JoinHandle<()>>,
    handles: Vec<JoinHandle<()>>,
}

impl CourseSystem {
    /// Validates `config` and starts the system against the configured backend.
    pub fn new(config: &ClientConfig, platform: SpeechPlatform) -> Result<Self, SystemError> {
        config.validate()?;
        let fetcher = HttpFetcher::new(config.server_url.clone(), config.request_timeout())?;
        info!(server_url = %fetcher.base_url(), "Using backend");
        Ok(Self::with_fetcher(Arc::new(fetcher), config, platform))
    }

    /// Starts the system on an arbitrary fetcher.
    ///
    /// Spawns every slice actor and the search actor. Nothing is fetched until
    /// [`mount`](Self::mount).
    pub fn with_fetcher(
        fetcher: Arc<dyn ResourceFetcher>,
        config: &ClientConfig,
        platform: SpeechPlatform,
    ) -> Self {
        // 1. Slices: the reader goes to the store, the writer into the hook
        let (courses_actor, courses, courses_hook) = slices::courses::new(fetcher.clone());
        let (reviews_actor, reviews, reviews_hook) = slices::reviews::new(fetcher.clone());
        let (user_actor, current_user, current_user_hook) =
            slices::current_user::new(fetcher.clone());
        let (creator_actor, creator_courses, creator_hook) =
            slices::creator_courses::new(fetcher.clone());

        // 2. Search, with speech capabilities gated by configuration
        let platform = if config.voice_enabled {
            platform
        } else {
            SpeechPlatform::unavailable()
        };
        let recognition = RecognitionConfig {
            lang: config.speech_lang.clone(),
            ..RecognitionConfig::default()
        };
        let mut capture = SpeechCapture::new(platform.recognizer, recognition);
        if let Some(cue) = platform.cue {
            capture = capture.with_cue(cue);
        }
        let (search_actor, search) = search::new(
            SearchClient::new(fetcher.clone()),
            capture,
            SpeechPlayback::new(platform.synthesizer),
            SEARCH_BUFFER,
        );

        // 3. Start actors
        let handles = vec![
            tokio::spawn(courses_actor.run()),
            tokio::spawn(reviews_actor.run()),
            tokio::spawn(user_actor.run()),
            tokio::spawn(creator_actor.run()),
            tokio::spawn(search_actor.run()),
        ];

        Self {
            store: CourseStore {
                courses,
                reviews,
                current_user,
                creator_courses,
            },
            search,
            auth: AuthClient::new(fetcher),
            courses_hook,
            reviews_hook,
            current_user_hook,
            creator_hook: Some(creator_hook),
            watcher: None,
            handles,
        }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn search(&self) -> &SearchHandle {
        &self.search
    }

    /// Activates every hook.
    ///
    /// Returns the fetches started for the untriggered slices. The creator
    /// slice follows the current-user slice from here on; a second call is a
    /// no-op for hooks already active.
    #[instrument(skip(self))]
    pub async fn mount(&mut self) -> Result<Vec<SyncTask>, SystemError> {
        let mut tasks = Vec::new();
        tasks.extend(self.courses_hook.activate(()).await?.into_task());
        tasks.extend(self.reviews_hook.activate(()).await?.into_task());
        tasks.extend(self.current_user_hook.activate(()).await?.into_task());

        if let Some(hook) = self.creator_hook.take() {
            let users = self.store.current_user.subscribe().await?;
            self.watcher = Some(tokio::spawn(follow_creator(hook, users)));
        }

        info!(started = tasks.len(), "Mounted");
        Ok(tasks)
    }

    /// Signs in and re-syncs the current user.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, SystemError> {
        let result = self
            .auth
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await;
        self.signed_in(result).await
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&mut self, request: SignupRequest) -> Result<User, SystemError> {
        let result = self.auth.signup(request).await;
        self.signed_in(result).await
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn google_signup(&mut self, request: GoogleAuthRequest) -> Result<User, SystemError> {
        let result = self.auth.google_signup(request).await;
        self.signed_in(result).await
    }

    /// Re-fetches the signed-in user and waits for the slice write.
    ///
    /// Creator courses follow through the watcher. When the backend reports
    /// nobody signed in, that slice keeps its last value.
    #[instrument(skip(self))]
    pub async fn refresh_current_user(&mut self) -> Result<Option<User>, SystemError> {
        let status = if self.current_user_hook.trigger().is_some() {
            self.current_user_hook.refresh().await?
        } else {
            self.current_user_hook.activate(()).await?
        };
        if let Some(task) = status.into_task() {
            task.finished().await?;
        }
        Ok(self.store.current_user.get().await?)
    }

    /// On success, waits for the `currentUser` slice to pick up the new session.
    async fn signed_in(&mut self, result: ResourceResult<User>) -> Result<User, SystemError> {
        let user = result.into_result()?;
        info!(user = %user.id, "Signed in");
        self.refresh_current_user().await?;
        Ok(user)
    }

    /// Stops every actor and waits for them to finish.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        if let Some(watcher) = self.watcher {
            watcher.abort();
            let _ = watcher.await;
        }

        drop(self.store);
        drop(self.search);
        drop(self.auth);
        drop(self.courses_hook);
        drop(self.reviews_hook);
        drop(self.current_user_hook);
        drop(self.creator_hook);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

/// Re-keys the creator slice on every change of the signed-in user.
async fn follow_creator(
    mut hook: SyncHook<CreatorCourses>,
    mut users: watch::Receiver<Option<User>>,
) {
    loop {
        let trigger = users.borrow_and_update().as_ref().map(|user| user.id.clone());
        if let Err(e) = hook.activate(trigger).await {
            warn!(error = %e, "Creator sync stopped");
            return;
        }
        if users.changed().await.is_err() {
            return;
        }
    }
}
