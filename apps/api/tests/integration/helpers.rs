use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use blog_moderation::{
    application::moderation::{
        context::ModerationContext, pipeline::ModerationPipeline, registry::SpamFilterRegistry,
        settings::ModerationSettings,
    },
    config::Config,
    domain::{
        comment::entity::{Comment, NewComment},
        moderation::{custom_filter::SpamFilter, filter_rule::FilterRule},
    },
    infrastructure::{
        repositories::{
            memory_comment_repository::InMemoryCommentRepository,
            memory_filter_store::InMemoryFilterStore,
        },
        security::rate_limiter::CommentThrottle,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "AdminPassword123!";

/// A custom filter with a fixed answer that counts how often it is consulted.
pub struct SpyFilter {
    full_name: &'static str,
    name: &'static str,
    verdict: bool,
    initializes: bool,
    fails: bool,
    checks: AtomicUsize,
    reports: AtomicUsize,
}

impl SpyFilter {
    pub fn new(full_name: &'static str, name: &'static str, verdict: bool) -> Self {
        Self {
            full_name,
            name,
            verdict,
            initializes: true,
            fails: false,
            checks: AtomicUsize::new(0),
            reports: AtomicUsize::new(0),
        }
    }

    pub fn spam(name: &'static str) -> Arc<Self> {
        Arc::new(Self::new(name, name, true))
    }

    pub fn ham(name: &'static str) -> Arc<Self> {
        Arc::new(Self::new(name, name, false))
    }

    pub fn uninitialized(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            initializes: false,
            ..Self::new(name, name, true)
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            fails: true,
            ..Self::new(name, name, true)
        })
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn reports(&self) -> usize {
        self.reports.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpamFilter for SpyFilter {
    fn full_name(&self) -> &'static str {
        self.full_name
    }

    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> bool {
        self.initializes
    }

    async fn check(&self, _comment: &Comment) -> anyhow::Result<bool> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.fails {
            anyhow::bail!("upstream spam service unavailable");
        }
        Ok(self.verdict)
    }

    async fn report(&self, _comment: &Comment) -> anyhow::Result<()> {
        self.reports.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn registry_of(filters: &[Arc<SpyFilter>]) -> SpamFilterRegistry {
    filters.iter().fold(SpamFilterRegistry::new(), |registry, filter| {
        registry.with_filter(filter.clone() as Arc<dyn SpamFilter>)
    })
}

pub fn new_comment(email: &str, ip: &str, content: &str) -> Comment {
    Comment::new(NewComment {
        post_id: Uuid::now_v7(),
        author: "Reader".to_string(),
        email: email.to_string(),
        ip: ip.to_string(),
        content: content.to_string(),
        ..NewComment::default()
    })
}

/// A stored comment from an earlier visit, approved or rejected.
pub fn past_comment(email: &str, ip: &str, approved: bool) -> Comment {
    let mut comment = new_comment(email, ip, "an older comment");
    comment.is_approved = approved;
    comment.is_spam = !approved;
    comment
}

pub struct PipelineHarness {
    pub comments: Arc<InMemoryCommentRepository>,
    pub store: Arc<InMemoryFilterStore>,
    pub context: Arc<ModerationContext>,
    pub pipeline: Arc<ModerationPipeline>,
}

pub async fn pipeline_with(
    history: Vec<Comment>,
    rules: Vec<FilterRule>,
    filters: &[Arc<SpyFilter>],
    settings: ModerationSettings,
) -> PipelineHarness {
    let comments = Arc::new(InMemoryCommentRepository::with_comments(history));
    let store = Arc::new(InMemoryFilterStore::with_rules(rules));
    let context = Arc::new(
        ModerationContext::load(store.clone(), registry_of(filters))
            .await
            .expect("failed to load moderation context"),
    );
    let pipeline = Arc::new(ModerationPipeline::new(
        context.clone(),
        comments.clone(),
        settings,
    ));

    PipelineHarness {
        comments,
        store,
        context,
        pipeline,
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        redis_url: None,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password_hash: bcrypt::hash(ADMIN_PASSWORD, 4)
            .expect("failed to hash admin password"),
        enable_comments_moderation: true,
        trust_authenticated_users: true,
        comment_white_list_count: 10,
        comment_black_list_count: 10,
        add_ip_to_allow_list_on_approval: false,
        add_ip_to_block_list_on_rejection: false,
        comment_rate_limit_seconds: 30,
        max_comment_length: 5000,
        ignore_missing_migrations: true,
    }
}

pub struct TestApp {
    pub app: Router,
    pub comments: Arc<InMemoryCommentRepository>,
    pub state: AppState,
}

pub async fn spawn_app_with(config: Config, filters: &[Arc<SpyFilter>]) -> TestApp {
    spawn_app_with_throttle(config, filters, CommentThrottle::disabled()).await
}

pub async fn spawn_app_with_throttle(
    config: Config,
    filters: &[Arc<SpyFilter>],
    throttle: CommentThrottle,
) -> TestApp {
    let comments = Arc::new(InMemoryCommentRepository::new());
    let state = AppState::build(
        config,
        comments.clone(),
        Arc::new(InMemoryFilterStore::default()),
        registry_of(filters),
        throttle,
    )
    .await
    .expect("failed to build app state");

    TestApp {
        app: create_router(state.clone()),
        comments,
        state,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(), &[]).await
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "203.0.113.7");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    panic!(
        "expected status {}, got {}: {}",
        expected,
        actual,
        String::from_utf8_lossy(&bytes)
    );
}

pub async fn admin_token(app: &Router) -> String {
    let req = json_request(
        "POST",
        "/api/v1/admin/login",
        None,
        &serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    );
    let res = expect_status(send(app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    body["token"]
        .as_str()
        .expect("missing admin token")
        .to_string()
}
