//! services/api/src/web/generate_task.rs
//!
//! This module contains the asynchronous "worker" function responsible for
//! handling a single generation request: tier and quota resolution, credential
//! lookup, prompt composition, the provider call and usage accounting.

use crate::web::state::{AppState, EditorSession};
use archstudio_core::{
    domain::{ImageData, Requester, SessionHistoryEntry},
    ports::{OutputOptions, PortError},
    prompt::{self, EditorMode, InteriorSource, PromptRequest, Selections},
    quota,
};
use chrono::{Local, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

/// The parsed inputs for one generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateParams {
    pub mode: EditorMode,
    pub interior_source: InteriorSource,
    pub premium_requested: bool,
    pub description: String,
    pub edit_command: String,
    pub selections: Selections,
}

/// Represents the outcome of the `generate_process` task.
#[derive(Debug)]
pub enum GenerateOutcome {
    /// The provider returned an image and the session was updated.
    Completed {
        image: ImageData,
        prompt: String,
        timestamp: String,
        /// Advisory text, e.g. when the premium tier was silently downgraded.
        notice: Option<String>,
    },
    /// The request was cancelled before completion. No session state changed.
    Cancelled,
}

/// The failure taxonomy surfaced to the client.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("The API key was rejected by the provider")]
    ProviderAuth,
    #[error("The provider is rate limiting requests, try again shortly")]
    RateLimited,
    #[error("The model returned no image")]
    EmptyResult,
    #[error("Generation failed: {0}")]
    Provider(String),
}

/// Resolves the API key for this request: the per-session override wins,
/// then the server-configured key, then the stored global key.
async fn resolve_api_key(
    app_state: &AppState,
    override_key: Option<&str>,
) -> Result<String, GenerateError> {
    if let Some(key) = override_key {
        if !key.trim().is_empty() {
            return Ok(key.to_string());
        }
    }
    if let Some(key) = &app_state.config.gemini_api_key {
        return Ok(key.clone());
    }
    match app_state.directory.get_global_settings().await {
        Ok(Some(settings)) => Ok(settings.gemini_api_key),
        Ok(None) => Err(GenerateError::Config(
            "No API key is configured. Set one in admin settings or provide an override."
                .to_string(),
        )),
        Err(e) => Err(GenerateError::Provider(e.to_string())),
    }
}

fn map_provider_error(e: PortError) -> GenerateError {
    match e {
        // The provider reports a bad or unentitled key as a missing entity,
        // so not-found lands in the same bucket as an outright rejection.
        PortError::Unauthorized | PortError::NotFound(_) => GenerateError::ProviderAuth,
        PortError::RateLimited(_) => GenerateError::RateLimited,
        PortError::EmptyResponse => GenerateError::EmptyResult,
        PortError::Unexpected(msg) => GenerateError::Provider(msg),
    }
}

/// The exterior tab accepts a fully empty form nowhere: something must steer
/// the render.
fn validate(params: &GenerateParams, has_input: bool, has_reference: bool) -> Result<(), GenerateError> {
    if params.mode == EditorMode::Exterior
        && params.description.trim().is_empty()
        && params.selections.arch_style.is_none()
        && params.selections.exterior_scene.is_none()
        && !has_input
        && !has_reference
    {
        return Err(GenerateError::Validation(
            "Provide a description, a style, a scene or an image to generate from.".to_string(),
        ));
    }
    Ok(())
}

/// The main asynchronous task for handling a single generation request.
pub async fn generate_process(
    app_state: Arc<AppState>,
    session_state_lock: Arc<Mutex<EditorSession>>,
    params: GenerateParams,
    token: CancellationToken,
) -> Result<GenerateOutcome, GenerateError> {
    let today = Utc::now().date_naive();

    // --- 1. Refresh the requester and resolve the effective tier ---
    let (requester, override_key, input_image, reference_image) = {
        let session = session_state_lock.lock().await;
        (
            session.requester.clone(),
            session.override_api_key.clone(),
            session
                .active_input(!params.edit_command.trim().is_empty())
                .cloned(),
            session.reference_image.clone(),
        )
    };

    let requester = match &requester {
        Requester::Admin => Requester::Admin,
        Requester::Member(user) => {
            let fresh = app_state
                .directory
                .get_user_by_id(user.id)
                .await
                .map_err(|e| GenerateError::Provider(e.to_string()))?;
            if !fresh.is_active || fresh.expiry_date < Utc::now() {
                return Err(GenerateError::Validation(
                    "This account is inactive or expired.".to_string(),
                ));
            }
            Requester::Member(fresh)
        }
    };

    let mut notice = None;
    let premium = if params.premium_requested {
        // A personal key of plausible length unlocks the premium tier even
        // when the daily allowance is spent.
        if quota::has_premium_allowance(&requester, today)
            || quota::is_plausible_override_key(override_key.as_deref())
        {
            true
        } else {
            notice = Some(
                "Daily premium quota reached. Falling back to standard quality.".to_string(),
            );
            false
        }
    } else {
        false
    };

    // --- 2. Validate and resolve credentials ---
    validate(&params, input_image.is_some(), reference_image.is_some())?;
    let api_key = resolve_api_key(&app_state, override_key.as_deref()).await?;

    // --- 3. Compose the prompt ---
    let prompt_text = prompt::compose(&PromptRequest {
        mode: params.mode,
        interior_source: params.interior_source,
        selections: &params.selections,
        description: &params.description,
        edit_command: &params.edit_command,
        has_input_image: input_image.is_some(),
        has_reference_image: reference_image.is_some(),
    });

    let options = OutputOptions {
        high_resolution: premium,
        // Widescreen only when generating from scratch; an input image keeps
        // its own framing.
        widescreen: premium && input_image.is_none(),
    };

    let mut images = Vec::new();
    if let Some(image) = &input_image {
        images.push(image.clone());
    }
    if let Some(image) = &reference_image {
        images.push(image.clone());
    }

    let model = if premium {
        &app_state.config.premium_model
    } else {
        &app_state.config.standard_model
    };

    // --- 4. Call the provider, racing against cancellation ---
    if token.is_cancelled() {
        return Ok(GenerateOutcome::Cancelled);
    }
    info!(model = %model, premium, "Dispatching generation request");

    let result = tokio::select! {
        _ = token.cancelled() => return Ok(GenerateOutcome::Cancelled),
        result = app_state.generator.generate_image(
            &api_key,
            model,
            &prompt_text,
            &images,
            options,
        ) => result,
    };
    let image = result.map_err(map_provider_error)?;

    if token.is_cancelled() {
        return Ok(GenerateOutcome::Cancelled);
    }

    // --- 5. Commit the result to the session ---
    let timestamp = Local::now().format("%H:%M").to_string();
    let history_prompt = if !params.edit_command.trim().is_empty() {
        params.edit_command.clone()
    } else if !params.description.trim().is_empty() {
        params.description.clone()
    } else {
        "Generated Image".to_string()
    };

    {
        let mut session = session_state_lock.lock().await;
        session.generated_image = Some(image.clone());
        session.history.push(image.clone());
        session.session_history.insert(
            0,
            SessionHistoryEntry {
                id: Uuid::new_v4(),
                image: image.clone(),
                timestamp: timestamp.clone(),
                prompt: history_prompt.clone(),
            },
        );
    }

    // --- 6. Record premium usage for metered members ---
    // Any personal override key means the member burned their own credits,
    // so the daily counter is left alone.
    let has_override = override_key
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty());
    if premium && !has_override {
        if let Some(user) = requester.member() {
            match app_state.directory.get_user_by_id(user.id).await {
                Ok(fresh) => {
                    let rolled =
                        quota::rolled_usage(fresh.usage_count, fresh.last_usage_date, today);
                    if let Err(e) = app_state.directory.write_usage(user.id, rolled, today).await {
                        warn!("Failed to record premium usage for {}: {}", user.id, e);
                    }
                }
                Err(e) => warn!("Failed to re-read user {} for usage: {}", user.id, e),
            }
        }
    }

    Ok(GenerateOutcome::Completed {
        image,
        prompt: history_prompt,
        timestamp,
        notice,
    })
}

/// The instruction prefix for the plan-reading vision call.
const PLAN_ANALYSIS_INSTRUCTION: &str = "You are an expert interior designer and architect. \
Analyze this 2D floor plan image carefully. Describe the layout in detail: every room, its \
purpose, its approximate dimensions and its position relative to the other rooms. Note the \
locations of doors, windows, walls and any fixtures shown. Read the architectural symbols \
precisely and distinguish windows from doors: a quarter-circle arc on a wall opening marks \
a swing door and its swing path; a rectangle inside the wall thickness, or a plain line \
closing a gap with no arc, marks a window; two overlapping lines or arrows in an opening, \
usually leading to a balcony or outside, mark a sliding door. Write the result as a single \
detailed prompt that an image generation model could use to render a photorealistic 3D \
interior visualization that exactly matches this plan.";

/// Runs the plan-reading vision call against the uploaded floor plan and
/// returns the generated layout description.
pub async fn analyze_process(
    app_state: Arc<AppState>,
    session_state_lock: Arc<Mutex<EditorSession>>,
    interior_style: Option<String>,
) -> Result<String, GenerateError> {
    let (override_key, plan) = {
        let session = session_state_lock.lock().await;
        (session.override_api_key.clone(), session.main_image.clone())
    };
    let plan = plan.ok_or_else(|| {
        GenerateError::Validation("Upload a floor plan image before analyzing.".to_string())
    })?;

    let api_key = resolve_api_key(&app_state, override_key.as_deref()).await?;

    let instruction = match interior_style {
        Some(style) if !style.trim().is_empty() => format!(
            "{} Style the interior as {}.",
            PLAN_ANALYSIS_INSTRUCTION, style
        ),
        _ => PLAN_ANALYSIS_INSTRUCTION.to_string(),
    };

    app_state
        .generator
        .describe_plan(&api_key, &app_state.config.analysis_model, &instruction, &plan)
        .await
        .map_err(map_provider_error)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::web::protocol::ImageSlot;
    use archstudio_core::domain::{GlobalSettings, UserRecord};
    use archstudio_core::ports::{
        ImageGenerationService, PortResult, UserDirectoryService, UserSnapshots,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, NaiveDate};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    fn png(tag: u8) -> ImageData {
        ImageData::new("image/png", vec![tag])
    }

    fn member(daily_quota: u32, usage_count: u32, last_usage_date: NaiveDate) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: "studio-user".to_string(),
            password: "secret".to_string(),
            is_active: true,
            expiry_date: Utc::now() + Duration::days(30),
            created_at: Utc::now(),
            daily_quota,
            usage_count,
            last_usage_date,
        }
    }

    struct MockDirectory {
        user: Option<UserRecord>,
        global_key: Option<String>,
        usage_writes: StdMutex<Vec<(Uuid, u32, NaiveDate)>>,
    }

    impl MockDirectory {
        fn new(user: Option<UserRecord>) -> Self {
            Self {
                user,
                global_key: None,
                usage_writes: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserDirectoryService for MockDirectory {
        async fn create_user(
            &self,
            _username: &str,
            _password: &str,
            _daily_quota: u32,
            _duration_days: i64,
        ) -> PortResult<UserRecord> {
            unimplemented!()
        }

        async fn list_users(&self) -> PortResult<Vec<UserRecord>> {
            Ok(self.user.clone().into_iter().collect())
        }

        async fn get_user_by_id(&self, id: Uuid) -> PortResult<UserRecord> {
            self.user
                .clone()
                .filter(|u| u.id == id)
                .ok_or_else(|| PortError::NotFound(format!("User {} not found", id)))
        }

        async fn set_active(&self, _id: Uuid, _active: bool) -> PortResult<()> {
            unimplemented!()
        }

        async fn delete_user(&self, _id: Uuid) -> PortResult<()> {
            unimplemented!()
        }

        async fn update_password(&self, _id: Uuid, _password: &str) -> PortResult<()> {
            unimplemented!()
        }

        async fn update_quota(&self, _id: Uuid, _daily_quota: u32) -> PortResult<()> {
            unimplemented!()
        }

        async fn update_expiry(&self, _id: Uuid, _expiry_date: DateTime<Utc>) -> PortResult<()> {
            unimplemented!()
        }

        async fn write_usage(
            &self,
            id: Uuid,
            usage_count: u32,
            last_usage_date: NaiveDate,
        ) -> PortResult<()> {
            self.usage_writes
                .lock()
                .unwrap()
                .push((id, usage_count, last_usage_date));
            Ok(())
        }

        async fn get_global_settings(&self) -> PortResult<Option<GlobalSettings>> {
            Ok(self.global_key.clone().map(|k| GlobalSettings {
                gemini_api_key: k,
                updated_at: Utc::now(),
            }))
        }

        async fn upsert_global_api_key(&self, _api_key: &str) -> PortResult<GlobalSettings> {
            unimplemented!()
        }

        fn subscribe_users(&self) -> UserSnapshots {
            Box::pin(futures::stream::empty())
        }
    }

    struct MockGenerator {
        calls: AtomicUsize,
        last_key: StdMutex<Option<String>>,
        last_options: StdMutex<Option<OutputOptions>>,
        /// First byte of each input image, in call order.
        last_image_tags: StdMutex<Vec<u8>>,
        last_instruction: StdMutex<Option<String>>,
    }

    impl MockGenerator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_key: StdMutex::new(None),
                last_options: StdMutex::new(None),
                last_image_tags: StdMutex::new(Vec::new()),
                last_instruction: StdMutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ImageGenerationService for MockGenerator {
        async fn generate_image(
            &self,
            api_key: &str,
            _model: &str,
            _prompt: &str,
            images: &[ImageData],
            options: OutputOptions,
        ) -> PortResult<ImageData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_key.lock().unwrap() = Some(api_key.to_string());
            *self.last_options.lock().unwrap() = Some(options);
            *self.last_image_tags.lock().unwrap() = images.iter().map(|i| i.data[0]).collect();
            Ok(png(42))
        }

        async fn describe_plan(
            &self,
            _api_key: &str,
            _model: &str,
            instruction: &str,
            _plan: &ImageData,
        ) -> PortResult<String> {
            *self.last_instruction.lock().unwrap() = Some(instruction.to_string());
            Ok("a detailed layout".to_string())
        }
    }

    /// A generator that signals when it is called and blocks until released.
    struct GatedGenerator {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl ImageGenerationService for GatedGenerator {
        async fn generate_image(
            &self,
            _api_key: &str,
            _model: &str,
            _prompt: &str,
            _images: &[ImageData],
            _options: OutputOptions,
        ) -> PortResult<ImageData> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(png(42))
        }

        async fn describe_plan(
            &self,
            _api_key: &str,
            _model: &str,
            _instruction: &str,
            _plan: &ImageData,
        ) -> PortResult<String> {
            unimplemented!()
        }
    }

    fn test_config(server_key: Option<&str>) -> Config {
        Config {
            bind_address: "127.0.0.1:0".parse().unwrap(),
            database_url: "postgres://unused".to_string(),
            log_level: tracing::Level::INFO,
            cors_origin: "http://localhost:5173".to_string(),
            gemini_api_key: server_key.map(str::to_string),
            standard_model: "standard-model".to_string(),
            premium_model: "premium-model".to_string(),
            analysis_model: "analysis-model".to_string(),
        }
    }

    struct Harness {
        app_state: Arc<AppState>,
        directory: Arc<MockDirectory>,
        generator: Arc<MockGenerator>,
    }

    fn harness(directory: MockDirectory, config: Config) -> Harness {
        let directory = Arc::new(directory);
        let generator = Arc::new(MockGenerator::new());
        let app_state = Arc::new(AppState {
            directory: directory.clone(),
            generator: generator.clone(),
            config: Arc::new(config),
        });
        Harness {
            app_state,
            directory,
            generator,
        }
    }

    fn session(requester: Requester) -> Arc<Mutex<EditorSession>> {
        Arc::new(Mutex::new(EditorSession::new(requester)))
    }

    fn exterior_params(description: &str) -> GenerateParams {
        GenerateParams {
            description: description.to_string(),
            ..GenerateParams::default()
        }
    }

    fn premium_params(description: &str) -> GenerateParams {
        GenerateParams {
            premium_requested: true,
            description: description.to_string(),
            ..GenerateParams::default()
        }
    }

    fn edit_params(edit_command: &str) -> GenerateParams {
        GenerateParams {
            edit_command: edit_command.to_string(),
            ..GenerateParams::default()
        }
    }

    #[tokio::test]
    async fn empty_exterior_request_fails_before_the_provider_call() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));

        let result = generate_process(
            h.app_state.clone(),
            session(Requester::Admin),
            exterior_params(""),
            CancellationToken::new(),
        )
        .await;

        assert!(matches!(result, Err(GenerateError::Validation(_))));
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn premium_usage_rolls_the_counter_on_the_same_day() {
        let today = Utc::now().date_naive();
        let user = member(10, 3, today);
        let user_id = user.id;
        let h = harness(
            MockDirectory::new(Some(user.clone())),
            test_config(Some("server-key")),
        );

        let outcome = generate_process(
            h.app_state.clone(),
            session(Requester::Member(user)),
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert!(matches!(
            outcome,
            GenerateOutcome::Completed { notice: None, .. }
        ));
        let writes = h.directory.usage_writes.lock().unwrap().clone();
        assert_eq!(writes, vec![(user_id, 4, today)]);
    }

    #[tokio::test]
    async fn premium_usage_resets_after_a_stale_date() {
        let today = Utc::now().date_naive();
        let yesterday = today.pred_opt().unwrap();
        let user = member(10, 9, yesterday);
        let user_id = user.id;
        let h = harness(
            MockDirectory::new(Some(user.clone())),
            test_config(Some("server-key")),
        );

        generate_process(
            h.app_state.clone(),
            session(Requester::Member(user)),
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let writes = h.directory.usage_writes.lock().unwrap().clone();
        assert_eq!(writes, vec![(user_id, 1, today)]);
    }

    #[tokio::test]
    async fn exhausted_quota_downgrades_with_a_notice_and_skips_usage() {
        let today = Utc::now().date_naive();
        let user = member(5, 5, today);
        let h = harness(
            MockDirectory::new(Some(user.clone())),
            test_config(Some("server-key")),
        );

        let outcome = generate_process(
            h.app_state.clone(),
            session(Requester::Member(user)),
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        match outcome {
            GenerateOutcome::Completed { notice, .. } => assert!(notice.is_some()),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(h.directory.usage_writes.lock().unwrap().is_empty());
        let options = h.generator.last_options.lock().unwrap().unwrap();
        assert!(!options.high_resolution);
    }

    #[tokio::test]
    async fn plausible_override_key_skips_usage_recording() {
        let today = Utc::now().date_naive();
        let user = member(10, 0, today);
        let h = harness(
            MockDirectory::new(Some(user.clone())),
            test_config(Some("server-key")),
        );
        let session_lock = session(Requester::Member(user));
        session_lock.lock().await.override_api_key =
            Some("user-supplied-override-key".to_string());

        generate_process(
            h.app_state.clone(),
            session_lock,
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert!(h.directory.usage_writes.lock().unwrap().is_empty());
        assert_eq!(
            h.generator.last_key.lock().unwrap().as_deref(),
            Some("user-supplied-override-key")
        );
    }

    #[tokio::test]
    async fn override_credential_keeps_premium_when_quota_is_exhausted() {
        let today = Utc::now().date_naive();
        let user = member(0, 0, today);
        let h = harness(
            MockDirectory::new(Some(user.clone())),
            test_config(Some("server-key")),
        );
        let session_lock = session(Requester::Member(user));
        session_lock.lock().await.override_api_key =
            Some("user-supplied-override-key".to_string());

        let outcome = generate_process(
            h.app_state.clone(),
            session_lock,
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert!(matches!(
            outcome,
            GenerateOutcome::Completed { notice: None, .. }
        ));
        let options = h.generator.last_options.lock().unwrap().unwrap();
        assert!(options.high_resolution);
        assert!(h.directory.usage_writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn any_personal_key_leaves_the_daily_counter_alone() {
        let today = Utc::now().date_naive();
        let user = member(10, 0, today);
        let h = harness(
            MockDirectory::new(Some(user.clone())),
            test_config(Some("server-key")),
        );
        let session_lock = session(Requester::Member(user));
        session_lock.lock().await.override_api_key = Some("abc".to_string());

        generate_process(
            h.app_state.clone(),
            session_lock,
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert!(h.directory.usage_writes.lock().unwrap().is_empty());
        assert_eq!(h.generator.last_key.lock().unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn text_only_regeneration_keeps_widescreen_framing() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));
        let session_lock = session(Requester::Admin);

        generate_process(
            h.app_state.clone(),
            session_lock.clone(),
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();
        generate_process(
            h.app_state.clone(),
            session_lock,
            premium_params("a glass house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let options = h.generator.last_options.lock().unwrap().unwrap();
        assert!(options.widescreen);
        assert!(h.generator.last_image_tags.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_command_chains_the_previous_output() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));
        let session_lock = session(Requester::Admin);
        session_lock
            .lock()
            .await
            .store_upload(ImageSlot::Main, png(1));

        generate_process(
            h.app_state.clone(),
            session_lock.clone(),
            exterior_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(*h.generator.last_image_tags.lock().unwrap(), vec![1]);

        generate_process(
            h.app_state.clone(),
            session_lock.clone(),
            edit_params("add a pool"),
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(*h.generator.last_image_tags.lock().unwrap(), vec![42]);

        // A plain description starts over from the uploaded image.
        generate_process(
            h.app_state.clone(),
            session_lock,
            exterior_params("a stone house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(*h.generator.last_image_tags.lock().unwrap(), vec![1]);
    }

    #[test]
    fn provider_not_found_reads_as_a_key_problem() {
        assert!(matches!(
            map_provider_error(PortError::NotFound("entity was not found".to_string())),
            GenerateError::ProviderAuth
        ));
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits_without_touching_the_session() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));
        let session_lock = session(Requester::Admin);
        let token = CancellationToken::new();
        token.cancel();

        let outcome = generate_process(
            h.app_state.clone(),
            session_lock.clone(),
            exterior_params("a brick house"),
            token,
        )
        .await
        .unwrap();

        assert!(matches!(outcome, GenerateOutcome::Cancelled));
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
        let session = session_lock.lock().await;
        assert!(session.generated_image.is_none());
        assert!(session.session_history.is_empty());
    }

    #[tokio::test]
    async fn cancelling_mid_flight_discards_a_late_provider_result() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let app_state = Arc::new(AppState {
            directory: Arc::new(MockDirectory::new(None)),
            generator: Arc::new(GatedGenerator {
                started: started.clone(),
                release: release.clone(),
            }),
            config: Arc::new(test_config(Some("server-key"))),
        });
        let session_lock = session(Requester::Admin);
        let token = CancellationToken::new();

        let task = tokio::spawn(generate_process(
            app_state,
            session_lock.clone(),
            exterior_params("a brick house"),
            token.clone(),
        ));

        // Cancel while the provider call is pending, then let it resolve.
        started.notified().await;
        release.notify_one();
        token.cancel();

        let outcome = task.await.unwrap().unwrap();
        assert!(matches!(outcome, GenerateOutcome::Cancelled));
        let session = session_lock.lock().await;
        assert!(session.generated_image.is_none());
        assert!(session.history.is_empty());
        assert!(session.session_history.is_empty());
    }

    #[tokio::test]
    async fn global_settings_key_is_used_when_nothing_else_is_configured() {
        let mut directory = MockDirectory::new(None);
        directory.global_key = Some("stored-global-key".to_string());
        let h = harness(directory, test_config(None));

        generate_process(
            h.app_state.clone(),
            session(Requester::Admin),
            exterior_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            h.generator.last_key.lock().unwrap().as_deref(),
            Some("stored-global-key")
        );
    }

    #[tokio::test]
    async fn missing_keys_everywhere_is_a_config_error() {
        let h = harness(MockDirectory::new(None), test_config(None));

        let result = generate_process(
            h.app_state.clone(),
            session(Requester::Admin),
            exterior_params("a brick house"),
            CancellationToken::new(),
        )
        .await;

        assert!(matches!(result, Err(GenerateError::Config(_))));
    }

    #[tokio::test]
    async fn premium_without_input_requests_widescreen_high_resolution() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));

        generate_process(
            h.app_state.clone(),
            session(Requester::Admin),
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let options = h.generator.last_options.lock().unwrap().unwrap();
        assert!(options.high_resolution);
        assert!(options.widescreen);
    }

    #[tokio::test]
    async fn premium_with_an_input_image_preserves_source_framing() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));
        let session_lock = session(Requester::Admin);
        session_lock
            .lock()
            .await
            .store_upload(ImageSlot::Main, png(1));

        generate_process(
            h.app_state.clone(),
            session_lock,
            premium_params("a brick house"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let options = h.generator.last_options.lock().unwrap().unwrap();
        assert!(options.high_resolution);
        assert!(!options.widescreen);
    }

    #[tokio::test]
    async fn successful_generation_chains_onto_the_canvas() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));
        let session_lock = session(Requester::Admin);
        session_lock
            .lock()
            .await
            .store_upload(ImageSlot::Main, png(1));

        generate_process(
            h.app_state.clone(),
            session_lock.clone(),
            exterior_params("add a pool"),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let session = session_lock.lock().await;
        assert!(session.generated_image.is_some());
        assert_eq!(session.history.len(), 2);
        assert_eq!(session.session_history.len(), 1);
        assert_eq!(session.session_history[0].prompt, "add a pool");
    }

    #[tokio::test]
    async fn analyze_requires_an_uploaded_plan() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));

        let result = analyze_process(h.app_state.clone(), session(Requester::Admin), None).await;
        assert!(matches!(result, Err(GenerateError::Validation(_))));
    }

    #[tokio::test]
    async fn analyze_returns_the_plan_description() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));
        let session_lock = session(Requester::Admin);
        session_lock
            .lock()
            .await
            .store_upload(ImageSlot::Main, png(7));

        let description = analyze_process(
            h.app_state.clone(),
            session_lock,
            Some("minimalist".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(description, "a detailed layout");
    }

    #[tokio::test]
    async fn plan_analysis_explains_the_door_and_window_symbols() {
        let h = harness(MockDirectory::new(None), test_config(Some("server-key")));
        let session_lock = session(Requester::Admin);
        session_lock
            .lock()
            .await
            .store_upload(ImageSlot::Main, png(7));

        analyze_process(h.app_state.clone(), session_lock, None)
            .await
            .unwrap();

        let instruction = h.generator.last_instruction.lock().unwrap().clone().unwrap();
        assert!(instruction.contains("quarter-circle arc"));
        assert!(instruction.contains("sliding door"));
    }
}
