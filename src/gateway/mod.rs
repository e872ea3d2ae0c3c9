use crate::error::{Result, SyncError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A user record as the remote API ships it, before enrichment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: u64,
    pub email: String,
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "lastName")]
    pub last_name: String,
    pub avatar: String,
}

/// One page of the remote collection, as returned by the list endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ListUsersPage {
    pub data: Vec<RawUser>,
    pub page: u32,
    pub total_pages: u32,
}

/// The editable identity fields submitted on update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// The remote's echo of a successful update.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdatedRecord {
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Callback invoked when the remote rejects our credentials (401-class).
/// Owned by the authentication collaborator, injected at construction.
pub type LogoutHook = Arc<dyn Fn() + Send + Sync>;

/// Remote CRUD surface the store synchronizes against.
///
/// Every failure carries a displayable message. Auth failures additionally
/// fire the logout hook before resolving as ordinary errors.
#[async_trait]
pub trait RemoteSyncGateway: Send + Sync {
    async fn list_users(&self, page: u32) -> Result<ListUsersPage>;
    async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<UpdatedRecord>;
    async fn delete_user(&self, id: u64) -> Result<()>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    on_auth_expired: Option<LogoutHook>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            token: None,
            on_auth_expired: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_logout_hook(mut self, hook: LogoutHook) -> Self {
        self.on_auth_expired = Some(hook);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn fail_for_status(&self, resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "An error occurred".to_string());
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("credentials rejected by the directory API");
            if let Some(hook) = &self.on_auth_expired {
                hook();
            }
            return Err(SyncError::auth(message));
        }
        Err(SyncError::request(status.as_u16(), message))
    }
}

#[async_trait]
impl RemoteSyncGateway for HttpGateway {
    async fn list_users(&self, page: u32) -> Result<ListUsersPage> {
        let req = self.client.get(self.url(&format!("/users?page={}", page)));
        let resp = self.authorize(req).send().await.map_err(transport_error)?;
        let resp = self.fail_for_status(resp).await?;
        resp.json::<ListUsersPage>().await.map_err(transport_error)
    }

    async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<UpdatedRecord> {
        let req = self.client.put(self.url(&format!("/users/{}", id))).json(update);
        let resp = self.authorize(req).send().await.map_err(transport_error)?;
        let resp = self.fail_for_status(resp).await?;
        resp.json::<UpdatedRecord>().await.map_err(transport_error)
    }

    async fn delete_user(&self, id: u64) -> Result<()> {
        let req = self.client.delete(self.url(&format!("/users/{}", id)));
        let resp = self.authorize(req).send().await.map_err(transport_error)?;
        self.fail_for_status(resp).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> SyncError {
    if err.is_connect() || err.is_timeout() {
        SyncError::network("Network error. Please check your connection.")
    } else {
        SyncError::network("An unexpected error occurred.")
    }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_is_normalized() {
		let gw = HttpGateway::new("https://reqres.in/api/");
		assert_eq!(gw.url("/users?page=2"), "https://reqres.in/api/users?page=2");

		let gw = HttpGateway::new("  https://reqres.in/api  ");
		assert_eq!(gw.url("/users/7"), "https://reqres.in/api/users/7");
	}

	#[test]
	fn raw_user_accepts_both_key_spellings() {
		let snake: RawUser = serde_json::from_str(
			r#"{"id":1,"email":"a@b.io","first_name":"Ada","last_name":"Byron","avatar":"x.png"}"#,
		)
		.unwrap();
		let camel: RawUser = serde_json::from_str(
			r#"{"id":1,"email":"a@b.io","firstName":"Ada","lastName":"Byron","avatar":"x.png"}"#,
		)
		.unwrap();
		assert_eq!(snake, camel);
		assert_eq!(snake.first_name, "Ada");
	}

	#[test]
	fn list_page_parses_remote_shape() {
		let page: ListUsersPage = serde_json::from_str(
			r#"{
				"page": 2,
				"per_page": 6,
				"total": 12,
				"total_pages": 2,
				"data": [
					{"id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael", "last_name": "Lawson", "avatar": "https://reqres.in/img/faces/7-image.jpg"}
				]
			}"#,
		)
		.unwrap();
		assert_eq!(page.page, 2);
		assert_eq!(page.total_pages, 2);
		assert_eq!(page.data.len(), 1);
		assert_eq!(page.data[0].id, 7);
	}
}
