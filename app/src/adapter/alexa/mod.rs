mod http_server;

use serde::{Deserialize, Serialize};

use crate::core::{BearerToken, PowerState};
use crate::port::NestApi;
use crate::skill::AwaySkill;

pub mod namespace {
    pub const ALEXA: &str = "Alexa";
    pub const DISCOVERY: &str = "Alexa.Discovery";
    pub const POWER_CONTROLLER: &str = "Alexa.PowerController";
}

pub fn new_web_service<A: NestApi + 'static>(skill: AwaySkill<A>) -> actix_web::Scope {
    http_server::new_actix_web_scope(skill)
}

//
// INBOUND
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveMessage {
    pub directive: Directive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directive {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    #[serde(default)]
    pub payload: DirectivePayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectivePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl Directive {
    /// Discovery carries the token in the payload, all endpoint directives in the endpoint.
    pub fn token(&self) -> Option<BearerToken> {
        self.endpoint
            .as_ref()
            .and_then(|endpoint| endpoint.scope.as_ref())
            .or(self.payload.scope.as_ref())
            .map(|scope| BearerToken::new(scope.token.clone()))
    }

    pub fn endpoint_id(&self) -> Option<&str> {
        self.endpoint.as_ref().map(|endpoint| endpoint.endpoint_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub namespace: String,
    pub name: String,
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    pub endpoint_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<serde_json::Value>,
}

impl Endpoint {
    pub fn id_only(endpoint_id: impl Into<String>) -> Self {
        Self {
            scope: None,
            endpoint_id: endpoint_id.into(),
            cookie: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "type")]
    pub scope_type: String,
    pub token: String,
}

//
// OUTBOUND
//

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub namespace: String,
    pub name: String,
    pub value: PowerState,
    pub time_of_sample: String,
    pub uncertainty_in_milliseconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    Discovery {
        endpoints: Vec<DiscoveredEndpoint>,
    },
    Error {
        #[serde(rename = "type")]
        error_type: ErrorType,
        message: String,
    },
    Empty {},
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredEndpoint {
    pub endpoint_id: String,
    pub manufacturer_name: String,
    pub friendly_name: String,
    pub description: String,
    pub display_categories: Vec<DisplayCategory>,
    pub capabilities: Vec<Capability>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayCategory {
    Switch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capability {
    #[serde(rename = "type")]
    pub capability_type: String,
    pub interface: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    pub supported: Vec<SupportedProperty>,
    pub proactively_reported: bool,
    pub retrievable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportedProperty {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    InvalidAuthorizationCredential,
    NoSuchEndpoint,
    RateLimitExceeded,
    InternalError,
}
