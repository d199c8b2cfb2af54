//! Udemy API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};

use crate::api::auth::Credential;
use crate::api::types::*;
use crate::course::CurriculumItem;
use crate::error::{Error, Result};

/// Udemy API base URL.
pub const API_BASE: &str = "https://www.udemy.com/api-2.0";

/// Page size for the subscribed-courses listing (single page only).
pub const COURSES_PAGE_SIZE: u32 = 100;

/// Page size for the curriculum listing (single page only).
pub const CURRICULUM_PAGE_SIZE: u32 = 1400;

/// Remote operations the download pipeline depends on.
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// Lightweight probe that the credential is accepted.
    async fn verify_credential(&self) -> Result<()>;

    /// Subscribed courses, most recently accessed first.
    async fn subscribed_courses(&self) -> Result<Vec<Course>>;

    /// Curriculum of a course in curriculum order.
    ///
    /// Returns `Error::CourseNotFound` when the course id is unknown.
    async fn curriculum(&self, course_id: u64) -> Result<Vec<CurriculumItem>>;

    /// Stream and download links of one asset.
    async fn asset_streams(&self, asset_id: u64) -> Result<AssetStreams>;

    /// Raw HTML of a course landing page.
    async fn course_page(&self, url: &str) -> Result<String>;
}

/// Udemy API client holding the session credential.
pub struct UdemyApi {
    client: Client,
    credential: Credential,
    base_url: String,
    request_timeout: Duration,
}

impl UdemyApi {
    /// Create a new API client against the public endpoint.
    pub fn new(credential: Credential, request_timeout: Duration) -> Result<Self> {
        Self::with_base_url(credential, API_BASE, request_timeout)
    }

    /// Create a new API client against a custom base URL.
    pub fn with_base_url(
        credential: Credential,
        base_url: &str,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(request_timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, credential, base_url, request_timeout))
    }

    /// Create a new API client on top of an existing HTTP client.
    pub fn with_client(
        client: Client,
        credential: Credential,
        base_url: &str,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client,
            credential,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
        }
    }

    /// Underlying HTTP client, shared with the downloader.
    pub fn http_client(&self) -> Client {
        self.client.clone()
    }

    /// URL of the subscribed-courses listing; also used for the credential probe.
    pub fn courses_url(&self) -> String {
        format!(
            "{}/users/me/subscribed-courses/?ordering=-last_accessed&fields[course]=@min,title,id&page=1&page_size={}",
            self.base_url, COURSES_PAGE_SIZE
        )
    }

    /// URL of the curriculum listing for a course.
    pub fn curriculum_url(&self, course_id: u64) -> String {
        format!(
            "{}/courses/{}/subscriber-curriculum-items/?page_size={}&fields[lecture]=title,object_index,asset,supplementary_assets&fields[chapter]=title,object_index&fields[asset]=filename,asset_type&caching_intent=True",
            self.base_url, course_id, CURRICULUM_PAGE_SIZE
        )
    }

    /// URL of the stream info for an asset.
    pub fn asset_url(&self, asset_id: u64) -> String {
        format!(
            "{}/assets/{}?fields[asset]=@min,status,asset_type,time_estimation,stream_urls,download_urls",
            self.base_url, asset_id
        )
    }

    /// Build an authenticated request.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, self.credential.header_value())
            .timeout(self.request_timeout)
    }

    /// Make an authenticated request and log the outcome.
    async fn send(&self, method: Method, url: &str) -> Result<Response> {
        tracing::debug!("{} {}", method, url);

        let response = self.request(method, url).send().await?;
        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }

    /// Read a JSON body, keeping a snippet of the payload on parse failure.
    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: Response,
        what: &str,
    ) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse {}: {} - Response: {}",
                what,
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl CourseApi for UdemyApi {
    async fn verify_credential(&self) -> Result<()> {
        let url = self.courses_url();
        let response = self.send(Method::HEAD, &url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Authentication(format!(
                "Invalid access token (HTTP {})",
                status
            )));
        }

        Ok(())
    }

    async fn subscribed_courses(&self) -> Result<Vec<Course>> {
        let url = self.courses_url();
        let response = self.send(Method::GET, &url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Error fetching courses (HTTP {}), try to open link in your browser\n{}",
                status, url
            )));
        }

        let page: Page<Course> = Self::parse_json(response, "courses").await?;
        Ok(page.results)
    }

    async fn curriculum(&self, course_id: u64) -> Result<Vec<CurriculumItem>> {
        let url = self.curriculum_url(course_id);
        let response = self.send(Method::GET, &url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::CourseNotFound(course_id.to_string()));
        }

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Error fetching course lectures (HTTP {}), try to open link in your browser\n{}",
                status, url
            )));
        }

        let page: Page<CurriculumEntry> = Self::parse_json(response, "curriculum").await?;
        if page.next.is_some() {
            tracing::warn!(
                "Curriculum has more than {} items, later items are ignored",
                CURRICULUM_PAGE_SIZE
            );
        }

        Ok(page.results.into_iter().map(CurriculumItem::from).collect())
    }

    async fn asset_streams(&self, asset_id: u64) -> Result<AssetStreams> {
        let url = self.asset_url(asset_id);
        let response = self.send(Method::GET, &url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to get stream info for asset {}: HTTP {}",
                asset_id, status
            )));
        }

        Self::parse_json(response, "asset streams").await
    }

    async fn course_page(&self, url: &str) -> Result<String> {
        let response = self.send(Method::GET, url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to load course page {}: HTTP {}",
                url, status
            )));
        }

        Ok(response.text().await?)
    }
}
