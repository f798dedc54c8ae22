use admin_types::{AuthToken, CreateUserRequest, ErrorBody, LoginRequest, LoginResponse, User};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, Result};

/// HTTP client for the admin REST API, rooted at `<origin>/api/`.
///
/// A client is a snapshot: the `Authorization` header of every request it
/// sends comes from the token it was built with. Session changes produce a new
/// snapshot through [`ApiClient::with_token`] instead of mutating this one.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<AuthToken>,
}

impl ApiClient {
    pub const API_PREFIX: &'static str = "api/";

    pub fn new(origin: &str) -> Result<Self> {
        let mut originUrl = Url::parse(origin)?;
        if !originUrl.path().ends_with('/') {
            let path = format!("{}/", originUrl.path());
            originUrl.set_path(&path);
        }
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: originUrl.join(Self::API_PREFIX)?,
            token: None,
        })
    }

    pub fn with_token(&self, token: Option<AuthToken>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// The `Authorization` value attached to outgoing requests, if any.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(AuthToken::bearer)
    }

    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{method} {url}");
        let builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        Ok(match self.authorization() {
            Some(value) => builder.header(header::AUTHORIZATION, value),
            None => builder,
        })
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .request(Method::POST, &["login"])?
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn current_user(&self) -> Result<User> {
        let response = self.request(Method::GET, &["users", "me"])?.send().await?;
        decode(response).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let response = self.request(Method::GET, &["users"])?.send().await?;
        decode(response).await
    }

    /// Only `201 Created` counts as success.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        let response = self
            .request(Method::POST, &["users"])?
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() && status != StatusCode::CREATED {
            return Err(ApiError::UnexpectedStatus(status));
        }
        decode(response).await
    }

    pub async fn delete_user(&self, uuid: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &["users", uuid])?
            .send()
            .await?;
        check(response).await.map(|_| ())
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message);
    debug!("API replied {status}: {text}");
    Err(ApiError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check(response).await?;
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_is_fixed_under_api() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/api/");

        let nested = ApiClient::new("http://localhost:3000/admin").unwrap();
        assert_eq!(nested.base_url().as_str(), "http://localhost:3000/admin/api/");
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.endpoint(&["users", "me"]).unwrap().as_str(),
            "http://localhost:3000/api/users/me"
        );
        assert_eq!(
            client.endpoint(&["users", "a/b c"]).unwrap().as_str(),
            "http://localhost:3000/api/users/a%2Fb%20c"
        );
    }

    #[test]
    fn authorization_tracks_token_snapshot() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.authorization(), None);

        let authed = client.with_token(Some(AuthToken::new("t-1")));
        assert_eq!(authed.authorization().as_deref(), Some("Bearer t-1"));
        assert_eq!(client.authorization(), None);

        assert_eq!(authed.with_token(None).authorization(), None);
    }
}
