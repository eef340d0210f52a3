use std::collections::BTreeMap;

use anyhow::Context as _;
use infrastructure::{bearer_auth, new_json_api_client};
use reqwest::{Method, StatusCode, Url, header};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::core::{ApiFailure, ApiResult, AwayState, BearerToken, Home};
use crate::port::NestApi;

#[derive(Debug, Clone)]
pub struct NestHttpClient {
    client: ClientWithMiddleware,
    base_url: Url,
    max_redirects: usize,
}

impl NestHttpClient {
    pub fn new(url: &str, max_redirects: usize) -> anyhow::Result<Self> {
        let client = new_json_api_client()?;
        let base_url = Url::parse(url).with_context(|| format!("Invalid Nest API URL {}", url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("Nest API URL {} cannot be used as base URL", url);
        }

        Ok(Self {
            client,
            base_url,
            max_redirects,
        })
    }
}

impl NestApi for NestHttpClient {
    #[tracing::instrument(skip(self))]
    async fn list_homes(&self, token: &BearerToken) -> ApiResult<Vec<Home>> {
        let url = self.url(&["structures"]);
        let (status, body) = self.send(Method::GET, url, None, token).await?;

        let structures: StructuresDto = parse_response(status, &body, "Error listing Nest structures")?;
        Ok(structures.into())
    }

    #[tracing::instrument(skip(self))]
    async fn get_away_state(&self, home_id: &str, token: &BearerToken) -> ApiResult<AwayState> {
        let url = self.url(&["structures", home_id, "away"]);
        let (status, body) = self.send(Method::GET, url, None, token).await?;

        let away: AwayDto = parse_response(
            status,
            &body,
            &format!("Error reading away state of Nest structure {}", home_id),
        )?;
        Ok(away.into())
    }

    #[tracing::instrument(skip(self))]
    async fn set_away_state(&self, home_id: &str, state: AwayState, token: &BearerToken) -> ApiResult<AwayState> {
        let url = self.url(&["structures", home_id]);
        let payload = json!({ "away": state });
        let (status, body) = self.send(Method::PUT, url, Some(&payload), token).await?;

        let away: AwayDto = parse_response(
            status,
            &body,
            &format!("Error setting away state of Nest structure {}", home_id),
        )?;
        Ok(away.into())
    }
}

impl NestHttpClient {
    // base_url is checked to be usable as base in new()
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // Nest answers with 307 pointing to the API server that owns the account. The same request
    // is reissued there with the same token until a final status arrives.
    async fn send(
        &self,
        method: Method,
        mut url: Url,
        body: Option<&serde_json::Value>,
        token: &BearerToken,
    ) -> ApiResult<(StatusCode, String)> {
        let auth = bearer_auth(token.expose())
            .map_err(|_| ApiFailure::without_status("Bearer token is not a valid HTTP header value"))?;
        let mut redirects = 0;

        loop {
            let mut request = self
                .client
                .request(method.clone(), url.clone())
                .header(header::AUTHORIZATION, auth.clone());

            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|e| ApiFailure::without_status(e.to_string()))?;
            let status = response.status();

            if status != StatusCode::TEMPORARY_REDIRECT {
                let text = response
                    .text()
                    .await
                    .map_err(|e| ApiFailure::without_status(e.to_string()))?;
                return Ok((status, text));
            }

            if redirects >= self.max_redirects {
                return Err(ApiFailure::upstream(
                    status.as_u16(),
                    format!("Giving up after {} redirects, last location was {}", redirects, url),
                ));
            }

            url = redirect_target(&url, &response)?;
            redirects += 1;
            tracing::debug!("Following redirect #{} of {} request to {}", redirects, method, url);
        }
    }
}

fn redirect_target(current: &Url, response: &reqwest::Response) -> ApiResult<Url> {
    let status = response.status().as_u16();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiFailure::upstream(status, "Redirect without Location header"))?;

    current
        .join(location)
        .map_err(|e| ApiFailure::upstream(status, format!("Invalid redirect location {}: {}", location, e)))
}

fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str, fallback_message: &str) -> ApiResult<T> {
    if status != StatusCode::OK {
        let message = error_message(body).unwrap_or_else(|| fallback_message.to_owned());
        return Err(ApiFailure::upstream(status.as_u16(), message));
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Unexpected response body from Nest ({}): {}", e, body);
        ApiFailure::upstream(status.as_u16(), fallback_message)
    })
}

// Nest errors look like {"error": "...", "type": "...", "message": "..."}
fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.message.or(parsed.error)
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum StructuresDto {
    ById(BTreeMap<String, StructureDto>),
    List(Vec<StructureDto>),
}

#[derive(Deserialize, Debug)]
struct StructureDto {
    structure_id: String,
    name: String,
}

impl From<StructuresDto> for Vec<Home> {
    fn from(value: StructuresDto) -> Self {
        let structures: Vec<StructureDto> = match value {
            StructuresDto::ById(by_id) => by_id.into_values().collect(),
            StructuresDto::List(list) => list,
        };

        structures
            .into_iter()
            .map(|s| Home::new(s.structure_id, s.name))
            .collect()
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum AwayDto {
    Plain(AwayState),
    Structure { away: AwayState },
}

impl From<AwayDto> for AwayState {
    fn from(value: AwayDto) -> Self {
        match value {
            AwayDto::Plain(state) | AwayDto::Structure { away: state } => state,
        }
    }
}
