use crate::types::auth_response::AuthResponse;
use crate::types::profile_update::ProfileUpdate;
use crate::types::register_request::RegisterRequest;
use crate::types::role_switch_response::RoleSwitchResponse;
use crate::{ApiError, ApiResult, AuthApi, ProfileApi};

use cf_core::{AccountRole, Credential, UserId, UserRecord};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client for the platform REST API.
pub struct HttpApiClient {
    base_url: String,
    client: ReqwestClient,
}

impl HttpApiClient {
    /// Create a client against `base_url` with a per-request timeout.
    ///
    /// Every request carries the timeout; no session operation blocks
    /// indefinitely on the network.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::network)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build a request with optional bearer credential
    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(credential) = credential {
            req = req.bearer_auth(credential.as_str());
        }

        req
    }

    /// Execute request and decode the response body
    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ApiResult<T> {
        let response = req.send().await.map_err(ApiError::network)?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(ApiError::decode);
        }

        let (code, message) = Self::read_error_envelope(response).await;
        Err(Self::status_error(status, code, message))
    }

    /// Execute request, discarding any response body
    async fn execute_empty(&self, req: reqwest::RequestBuilder) -> ApiResult<()> {
        let response = req.send().await.map_err(ApiError::network)?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let (code, message) = Self::read_error_envelope(response).await;
        Err(Self::status_error(status, code, message))
    }

    /// Read the `{"error": {"code", "message"}}` envelope, with
    /// generic fallbacks when the body is not in that shape.
    async fn read_error_envelope(response: reqwest::Response) -> (String, String) {
        match response.json::<serde_json::Value>().await {
            Ok(body) => {
                let code = body
                    .get("error")
                    .and_then(|e| e.get("code"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("UNKNOWN")
                    .to_string();
                let message = body
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown error")
                    .to_string();
                (code, message)
            }
            Err(_) => ("UNKNOWN".to_string(), "Unknown error".to_string()),
        }
    }

    #[track_caller]
    fn status_error(status: StatusCode, code: String, message: String) -> ApiError {
        match status.as_u16() {
            401 => ApiError::unauthorized(message),
            404 => ApiError::not_found(message),
            s if s >= 500 => ApiError::server(s, message),
            _ => ApiError::bad_request(code, message),
        }
    }
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let req = self
            .request(Method::POST, "/api/v1/auth/register", None)
            .json(request);
        self.execute(req).await
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let body = LoginRequest { email, password };
        let req = self
            .request(Method::POST, "/api/v1/auth/login", None)
            .json(&body);
        self.execute(req).await
    }

    async fn whoami(&self, credential: &Credential) -> ApiResult<UserRecord> {
        let req = self.request(Method::GET, "/api/v1/auth/whoami", Some(credential));
        self.execute(req).await
    }

    async fn logout(&self, credential: &Credential) -> ApiResult<()> {
        let req = self.request(Method::POST, "/api/v1/auth/logout", Some(credential));
        self.execute_empty(req).await
    }
}

#[async_trait]
impl ProfileApi for HttpApiClient {
    async fn update_profile(
        &self,
        credential: &Credential,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> ApiResult<UserRecord> {
        let req = self
            .request(
                Method::PATCH,
                &format!("/api/v1/users/{}", user_id),
                Some(credential),
            )
            .json(update);
        self.execute(req).await
    }

    async fn switch_role(
        &self,
        credential: &Credential,
        new_role: AccountRole,
    ) -> ApiResult<RoleSwitchResponse> {
        #[derive(Serialize)]
        struct SwitchRoleRequest {
            #[serde(rename = "newRole")]
            new_role: AccountRole,
        }

        let body = SwitchRoleRequest { new_role };
        let req = self
            .request(Method::POST, "/api/v1/users/switch-type", Some(credential))
            .json(&body);
        self.execute(req).await
    }
}
