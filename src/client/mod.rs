//! Client layer: owns the gateway session and orchestrates login/send calls.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{
    Credential, MessageQuality, OutboundMessage, Password, SendResponse, Username,
    ValidationError,
};

#[cfg(test)]
pub(crate) mod fake;

const LOGIN_PATH: &str = "login";
const SEND_PATH: &str = "sms";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;

    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut request = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Account used to open a gateway session.
pub struct Account {
    username: Username,
    password: Password,
}

impl Account {
    /// Create an [`Account`] and validate that both parts are non-empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

#[derive(Debug, thiserror::Error)]
/// Failure of a single HTTP exchange with the gateway.
pub enum RequestError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code returned by the gateway.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// Request payload could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[source] BoxError),
}

impl RequestError {
    /// `true` when the gateway answered HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 401, .. })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SkebbyClient`] and its configuration helpers.
pub enum SkebbyError {
    /// The login exchange failed; the cached credential was left untouched.
    #[error("login failed: {0}")]
    Login(#[source] RequestError),

    /// The send exchange failed; the cached credential was left untouched.
    #[error("send failed: {0}")]
    Send(#[source] RequestError),

    /// The underlying HTTP client could not be constructed.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The configured gateway base URL is not a valid absolute URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// A required environment variable is not set.
    #[error("missing environment variable: {name}")]
    MissingEnv { name: &'static str },

    /// An optional setting holds a value that cannot be interpreted.
    #[error("invalid value for {name}: {value:?}")]
    InvalidSetting { name: &'static str, value: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SkebbyClient`].
///
/// Use this when you need a quality tier other than high, a request timeout,
/// or automatic re-login when the gateway rejects a cached session.
pub struct SkebbyClientBuilder {
    base_url: String,
    account: Account,
    quality: MessageQuality,
    refresh_on_unauthorized: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SkebbyClientBuilder {
    pub fn new(base_url: impl Into<String>, account: Account) -> Self {
        Self {
            base_url: base_url.into(),
            account,
            quality: MessageQuality::default(),
            refresh_on_unauthorized: false,
            timeout: None,
            user_agent: None,
        }
    }

    /// Message class used for every send (defaults to [`MessageQuality::High`]).
    pub fn quality(mut self, quality: MessageQuality) -> Self {
        self.quality = quality;
        self
    }

    /// When enabled, an HTTP 401 from the send endpoint discards the cached
    /// credential, logs in again and retries the send once.
    ///
    /// Disabled by default: a rejected send keeps the cached credential and
    /// the next send reuses it.
    pub fn refresh_on_unauthorized(mut self, enabled: bool) -> Self {
        self.refresh_on_unauthorized = enabled;
        self
    }

    /// Set an HTTP client timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SkebbyClient`] with a fresh, unauthenticated session.
    pub fn build(self) -> Result<SkebbyClient, SkebbyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SkebbyError::Transport(Box::new(err)))?;

        SkebbyClient::assemble(
            &self.base_url,
            self.account,
            self.quality,
            self.refresh_on_unauthorized,
            Arc::new(ReqwestTransport { client }),
        )
    }
}

#[derive(Clone)]
/// Session-holding gateway client.
///
/// The credential pair is acquired lazily on the first send and reused until
/// the client is dropped; clones share the same session. The whole
/// check-login-send sequence runs under one lock, so concurrent sends on a
/// shared client are serialized and a cold client logs in once.
pub struct SkebbyClient {
    account: Account,
    login_endpoint: String,
    send_endpoint: String,
    quality: MessageQuality,
    refresh_on_unauthorized: bool,
    http: Arc<dyn HttpTransport>,
    session: Arc<Mutex<Option<Credential>>>,
}

impl SkebbyClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`SkebbyClient::builder`].
    pub fn new(base_url: impl AsRef<str>, account: Account) -> Result<Self, SkebbyError> {
        Self::assemble(
            base_url.as_ref(),
            account,
            MessageQuality::default(),
            false,
            Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        )
    }

    /// Start building a client with custom settings.
    pub fn builder(base_url: impl Into<String>, account: Account) -> SkebbyClientBuilder {
        SkebbyClientBuilder::new(base_url, account)
    }

    fn assemble(
        base_url: &str,
        account: Account,
        quality: MessageQuality,
        refresh_on_unauthorized: bool,
        http: Arc<dyn HttpTransport>,
    ) -> Result<Self, SkebbyError> {
        Ok(Self {
            account,
            login_endpoint: endpoint(base_url, LOGIN_PATH)?,
            send_endpoint: endpoint(base_url, SEND_PATH)?,
            quality,
            refresh_on_unauthorized,
            http,
            session: Arc::new(Mutex::new(None)),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_fake(
        transport: fake::FakeTransport,
        refresh_on_unauthorized: bool,
    ) -> Self {
        Self::assemble(
            "https://example.invalid/API/v1.0/REST/",
            Account::new("user", "pass").unwrap(),
            MessageQuality::High,
            refresh_on_unauthorized,
            Arc::new(transport),
        )
        .unwrap()
    }

    /// Message class used for every send.
    pub fn quality(&self) -> MessageQuality {
        self.quality
    }

    /// Snapshot of the cached credential, if a login has succeeded.
    pub async fn credential(&self) -> Option<Credential> {
        self.session.lock().await.clone()
    }

    /// Forget the cached credential; the next send logs in again.
    pub async fn invalidate(&self) {
        *self.session.lock().await = None;
    }

    /// Exchange the configured username/password for a new credential.
    ///
    /// On success the credential replaces any cached one. On failure the
    /// cached credential (possibly none) is left as it was.
    pub async fn login(&self) -> Result<Credential, SkebbyError> {
        let mut session = self.session.lock().await;
        self.login_locked(&mut session).await
    }

    /// Send one SMS through the gateway and return its JSON reply verbatim.
    ///
    /// Logs in first when no credential is cached; a failed login aborts the
    /// send before anything reaches the send endpoint.
    ///
    /// Errors:
    /// - [`SkebbyError::Login`] when the implicit login fails,
    /// - [`SkebbyError::Send`] for transport failures, non-2xx statuses, or a
    ///   non-JSON reply.
    pub async fn send_message(
        &self,
        message: &OutboundMessage,
    ) -> Result<SendResponse, SkebbyError> {
        let body = crate::transport::encode_send_sms_json(self.quality, message)
            .map_err(|err| SkebbyError::Send(RequestError::Encode(Box::new(err))))?;

        let mut session = self.session.lock().await;
        let credential = match session.clone() {
            Some(credential) => credential,
            None => self.login_locked(&mut session).await?,
        };

        debug!(
            endpoint = %self.send_endpoint,
            recipient = %message.recipient().raw(),
            quality = self.quality.code(),
            "sending message"
        );

        match self.post_message(&credential, &body).await {
            Ok(response) => Ok(response),
            Err(err) if self.refresh_on_unauthorized && err.is_unauthorized() => {
                warn!("gateway rejected cached session, logging in again");
                *session = None;
                let credential = self.login_locked(&mut session).await?;
                self.post_message(&credential, &body).await.map_err(|err| {
                    warn!(error = %err, "send failed after re-login");
                    SkebbyError::Send(err)
                })
            }
            Err(err) => {
                warn!(error = %err, "send failed");
                Err(SkebbyError::Send(err))
            }
        }
    }

    async fn login_locked(
        &self,
        session: &mut Option<Credential>,
    ) -> Result<Credential, SkebbyError> {
        debug!(
            endpoint = %self.login_endpoint,
            username = %self.account.username.as_str(),
            "logging in"
        );

        match self.fetch_credential().await {
            Ok(credential) => {
                info!(
                    user_key = %credential.user_key.as_str(),
                    "gateway session established"
                );
                *session = Some(credential.clone());
                Ok(credential)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                Err(SkebbyError::Login(err))
            }
        }
    }

    async fn fetch_credential(&self) -> Result<Credential, RequestError> {
        let params = crate::transport::encode_login_query(
            &self.account.username,
            &self.account.password,
        );
        let url = Url::parse_with_params(&self.login_endpoint, &params)
            .map_err(|err| RequestError::Transport(Box::new(err)))?;

        let response = self
            .http
            .get(url.as_str())
            .await
            .map_err(RequestError::Transport)?;
        let body = success_body(response)?;

        crate::transport::decode_login_response(&body)
            .map_err(|err| RequestError::Parse(Box::new(err)))
    }

    async fn post_message(
        &self,
        credential: &Credential,
        body: &str,
    ) -> Result<SendResponse, RequestError> {
        let headers = crate::transport::encode_session_headers(credential);
        let response = self
            .http
            .post_json(&self.send_endpoint, headers, body.to_owned())
            .await
            .map_err(RequestError::Transport)?;
        let body = success_body(response)?;

        crate::transport::decode_send_sms_json_response(&body)
            .map_err(|err| RequestError::Parse(Box::new(err)))
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<String, SkebbyError> {
    let joined = format!("{}/{}", base_url.trim().trim_end_matches('/'), path);
    Url::parse(&joined)?;
    Ok(joined)
}

fn success_body(response: HttpResponse) -> Result<String, RequestError> {
    if !(200..=299).contains(&response.status) {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(RequestError::HttpStatus {
            status: response.status,
            body,
        });
    }
    Ok(response.body)
}
