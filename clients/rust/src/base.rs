use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tally_domain::ID;

/// How requests are authenticated
#[derive(Clone)]
enum Credentials {
    None,
    /// Secret api key of an account admin
    ApiKey(String),
    /// A json web token issued to a user of the account
    UserToken { account_id: ID, token: String },
}

pub(crate) struct BaseClient {
    address: String,
    client: Client,
    credentials: Credentials,
}

#[derive(Debug)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    TooManyRequests,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
}

impl APIError {
    pub fn status(&self) -> Option<StatusCode> {
        let status = match self.variant {
            APIErrorVariant::BadClientData => StatusCode::BAD_REQUEST,
            APIErrorVariant::Unauthorized => StatusCode::UNAUTHORIZED,
            APIErrorVariant::Forbidden => StatusCode::FORBIDDEN,
            APIErrorVariant::NotFound => StatusCode::NOT_FOUND,
            APIErrorVariant::Conflict => StatusCode::CONFLICT,
            APIErrorVariant::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            _ => return None,
        };
        Some(status)
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
            credentials: Credentials::None,
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.credentials = Credentials::ApiKey(api_key);
    }

    pub fn set_user_token(&mut self, account_id: ID, token: String) {
        self.credentials = Credentials::UserToken { account_id, token };
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        let builder = self.client.request(method, &url);

        match &self.credentials {
            Credentials::None => builder,
            Credentials::ApiKey(api_key) => builder.header("x-api-key", api_key),
            Credentials::UserToken { account_id, token } => builder
                .header("tally-account", account_id.to_string())
                .bearer_auth(token),
        }
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let status = res.status();
        if status != expected_status_code {
            let variant = match status {
                StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
                StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthorized,
                StatusCode::FORBIDDEN => APIErrorVariant::Forbidden,
                StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
                StatusCode::CONFLICT => APIErrorVariant::Conflict,
                StatusCode::TOO_MANY_REQUESTS => APIErrorVariant::TooManyRequests,
                _ => APIErrorVariant::UnexpectedStatusCode,
            };
            return Err(APIError {
                variant,
                message: res.text().await.unwrap_or_default(),
            });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            message: e.to_string(),
        })
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        builder: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = builder.send().await.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            message: e.to_string(),
        })?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::GET, path), expected_status_code)
            .await
    }

    pub async fn get_with_query<T: for<'de> Deserialize<'de>, Q: Serialize>(
        &self,
        query: &Q,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::GET, path).query(query);
        self.send(builder, expected_status_code).await
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::DELETE, path), expected_status_code)
            .await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::PUT, path).json(&body);
        self.send(builder, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let builder = self.get_client(Method::POST, path).json(&body);
        self.send(builder, expected_status_code).await
    }
}
