//! Authenticated connection to one org.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Sensitive parameters are skipped in tracing spans
//! - Error bodies are sanitized before they reach an error message

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::{DEFAULT_API_VERSION, USER_AGENT};

/// An authenticated handle to one org.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its pool.
#[derive(Clone)]
pub struct Connection {
    http: reqwest::Client,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Create a connection with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let instance_url = instance_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&instance_url)?;

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            instance_url,
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Create a connection from loaded credentials, keeping their API version.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        Ok(Self::new(credentials.instance_url(), credentials.access_token())?
            .with_api_version(credentials.api_version()))
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the full URL for a path.
    ///
    /// If the path starts with `/`, it's appended to the instance URL.
    /// Otherwise, it's assumed to be a full URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url, path)
        } else {
            format!("{}/{}", self.instance_url, path)
        }
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("query")` -> `{instance}/services/data/v62.0/query`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    /// Build the Metadata API URL (SOAP endpoint) for an API version.
    pub fn metadata_url(&self, api_version: &str) -> String {
        format!("{}/services/Soap/m/{}", self.instance_url, api_version)
    }

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_response(status, &body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }

    /// POST a SOAP envelope and return the response body.
    ///
    /// SOAP faults arrive with a 500 status; those bodies are returned so the
    /// caller can decode the fault. Any other failure status is an error.
    #[instrument(skip(self, envelope), fields(url = %url))]
    pub async fn post_soap(&self, url: &str, soap_action: &str, envelope: String) -> Result<String> {
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|e| Error::new(ErrorKind::Other(format!("invalid access token: {e}"))))?;
        let action = HeaderValue::from_str(soap_action)
            .map_err(|e| Error::new(ErrorKind::Other(format!("invalid SOAP action: {e}"))))?;

        let response = self
            .http
            .post(self.url(url))
            .header(CONTENT_TYPE, HeaderValue::from_static("text/xml;charset=UTF-8"))
            .header("soapaction", action)
            .header(AUTHORIZATION, bearer)
            .body(envelope)
            .send()
            .await?;

        let status = response.status().as_u16();
        let success = response.status().is_success();
        let body = response.text().await?;

        if !success && !body.contains("faultcode") {
            return Err(parse_error_response(status, &body));
        }
        Ok(body)
    }

    /// Execute a SOQL query via REST API, returning the first page.
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let encoded = urlencoding::encode(soql);
        let url = format!("{}?q={}", self.rest_url("query"), encoded);
        self.get_json(&url).await
    }

    /// Execute a SOQL query and automatically fetch all pages.
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        let mut result: QueryResult<T> = self.query(soql).await?;
        let mut all_records = std::mem::take(&mut result.records);

        while let Some(ref next_url) = result.next_records_url {
            result = self.get_json(next_url).await?;
            all_records.append(&mut result.records);
        }

        Ok(all_records)
    }

    /// Get the API versions the org supports.
    #[instrument(skip(self))]
    pub async fn versions(&self) -> Result<Vec<ApiVersion>> {
        self.get_json("/services/data").await
    }

    /// Get the highest API version the org supports.
    pub async fn latest_api_version(&self) -> Result<String> {
        let versions = self.versions().await?;
        versions
            .into_iter()
            .filter_map(|v| v.numeric().map(|n| (n, v.version)))
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, version)| version)
            .ok_or_else(|| Error::new(ErrorKind::Other("org reported no API versions".to_string())))
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl")]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}

/// API version information.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ApiVersion {
    pub version: String,
    pub label: String,
    pub url: String,
}

impl ApiVersion {
    fn numeric(&self) -> Option<f64> {
        self.version.parse().ok()
    }
}

/// Salesforce API error response format.
#[derive(Debug, serde::Deserialize)]
struct SalesforceErrorResponse {
    #[serde(alias = "errorCode")]
    error_code: String,
    message: String,
}

/// Parse an error response body and convert to the matching error kind.
fn parse_error_response(status: u16, body: &str) -> Error {
    let parsed = serde_json::from_str::<Vec<SalesforceErrorResponse>>(body)
        .ok()
        .and_then(|errors| errors.into_iter().next())
        .or_else(|| serde_json::from_str::<SalesforceErrorResponse>(body).ok());

    if let Some(err) = parsed {
        if status == 401 {
            return Error::new(ErrorKind::Authentication(sanitize_error_message(&err.message)));
        }
        return Error::new(ErrorKind::SalesforceApi {
            error_code: err.error_code,
            message: sanitize_error_message(&err.message),
        });
    }

    let sanitized = sanitize_error_message(body);
    match status {
        401 => Error::new(ErrorKind::Authentication(sanitized)),
        _ => Error::new(ErrorKind::Http {
            status,
            message: sanitized,
        }),
    }
}

/// Strip anything resembling an access token or session id and cap the length.
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    if let Ok(token_pattern) = regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+") {
        sanitized = token_pattern
            .replace_all(&sanitized, "[REDACTED_TOKEN]")
            .to_string();
    }

    if let Ok(session_pattern) = regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}") {
        sanitized = session_pattern
            .replace_all(&sanitized, "sid=[REDACTED]")
            .to_string();
    }

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
