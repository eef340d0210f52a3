use chrono::{DateTime, SecondsFormat, Utc};

use crate::adapter::alexa::namespace::{ALEXA, DISCOVERY, POWER_CONTROLLER};
use crate::adapter::alexa::{
    Capability, CapabilityProperties, Context, Directive, DiscoveredEndpoint, DisplayCategory, Endpoint, ErrorType,
    Event, EventPayload, Header, Property, ResponseEnvelope, SupportedProperty,
};
use crate::core::{ApiFailure, AwayState, Home};

const MESSAGE_ID_SUFFIX: &str = "-R";
const UNCERTAINTY_IN_MILLISECONDS: u32 = 300;
const POWER_STATE: &str = "powerState";

/// Answer to a power-control or state-report directive, carrying the confirmed state as
/// `powerState` in the context.
pub fn power_state(directive: &Directive, name: &str, state: AwayState, sampled_at: DateTime<Utc>) -> ResponseEnvelope {
    ResponseEnvelope {
        context: Some(Context {
            properties: vec![Property {
                namespace: POWER_CONTROLLER.to_string(),
                name: POWER_STATE.to_string(),
                value: state.into(),
                time_of_sample: sampled_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                uncertainty_in_milliseconds: UNCERTAINTY_IN_MILLISECONDS,
            }],
        }),
        event: Event {
            header: response_header(&directive.header, ALEXA, name),
            endpoint: directive.endpoint.clone(),
            payload: EventPayload::Empty {},
        },
    }
}

pub fn discovery(header: &Header, homes: &[Home]) -> ResponseEnvelope {
    ResponseEnvelope {
        context: None,
        event: Event {
            header: response_header(header, DISCOVERY, "Discover.Response"),
            endpoint: None,
            payload: EventPayload::Discovery {
                endpoints: homes.iter().map(discovered_endpoint).collect(),
            },
        },
    }
}

pub fn error(directive: &Directive, failure: &ApiFailure) -> ResponseEnvelope {
    ResponseEnvelope {
        context: None,
        event: Event {
            header: response_header(&directive.header, ALEXA, "ErrorResponse"),
            endpoint: directive.endpoint_id().map(Endpoint::id_only),
            payload: EventPayload::Error {
                error_type: error_type(failure.status_code),
                message: failure.message.clone(),
            },
        },
    }
}

pub fn error_type(status_code: Option<u16>) -> ErrorType {
    match status_code {
        Some(401) => ErrorType::InvalidAuthorizationCredential,
        Some(404) => ErrorType::NoSuchEndpoint,
        Some(429) => ErrorType::RateLimitExceeded,
        _ => ErrorType::InternalError,
    }
}

fn response_header(header: &Header, namespace: &str, name: &str) -> Header {
    Header {
        namespace: namespace.to_string(),
        name: name.to_string(),
        message_id: format!("{}{}", header.message_id, MESSAGE_ID_SUFFIX),
        ..header.clone()
    }
}

fn discovered_endpoint(home: &Home) -> DiscoveredEndpoint {
    DiscoveredEndpoint {
        endpoint_id: home.id.clone(),
        manufacturer_name: "Nest".to_string(),
        friendly_name: format!("Nest {}", home.display_name),
        description: format!("Away mode of {}", home.display_name),
        display_categories: vec![DisplayCategory::Switch],
        capabilities: vec![
            Capability {
                capability_type: "AlexaInterface".to_string(),
                interface: ALEXA.to_string(),
                version: "3".to_string(),
                properties: None,
            },
            Capability {
                capability_type: "AlexaInterface".to_string(),
                interface: POWER_CONTROLLER.to_string(),
                version: "3".to_string(),
                properties: Some(CapabilityProperties {
                    supported: vec![SupportedProperty {
                        name: POWER_STATE.to_string(),
                    }],
                    proactively_reported: false,
                    retrievable: true,
                }),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::alexa::DirectiveMessage;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn directive(namespace: &str, name: &str) -> Directive {
        let message: DirectiveMessage = serde_json::from_value(json!({
            "directive": {
                "header": {
                    "namespace": namespace,
                    "name": name,
                    "payloadVersion": "3",
                    "messageId": "abc-123",
                    "correlationToken": "corr-1"
                },
                "endpoint": {
                    "scope": { "type": "BearerToken", "token": "secret" },
                    "endpointId": "s1",
                    "cookie": {}
                },
                "payload": {}
            }
        }))
        .unwrap();

        message.directive
    }

    fn sample_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T10:15:30.250Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn state_report_for_away_home_is_off() {
        let response = power_state(
            &directive(ALEXA, "ReportState"),
            "StateReport",
            AwayState::Away,
            sample_time(),
        );

        assert_json_eq!(
            response,
            json!({
                "context": {
                    "properties": [{
                        "namespace": "Alexa.PowerController",
                        "name": "powerState",
                        "value": "OFF",
                        "timeOfSample": "2024-03-01T10:15:30.250Z",
                        "uncertaintyInMilliseconds": 300
                    }]
                },
                "event": {
                    "header": {
                        "namespace": "Alexa",
                        "name": "StateReport",
                        "payloadVersion": "3",
                        "messageId": "abc-123-R",
                        "correlationToken": "corr-1"
                    },
                    "endpoint": {
                        "scope": { "type": "BearerToken", "token": "secret" },
                        "endpointId": "s1",
                        "cookie": {}
                    },
                    "payload": {}
                }
            })
        );
    }

    #[test]
    fn power_response_for_home_is_on() {
        let response = power_state(
            &directive(POWER_CONTROLLER, "TurnOn"),
            "Response",
            AwayState::Home,
            sample_time(),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["context"]["properties"][0]["value"], json!("ON"));
        assert_eq!(value["event"]["header"]["name"], json!("Response"));
        assert_eq!(value["event"]["header"]["namespace"], json!("Alexa"));
    }

    #[test]
    fn discovery_lists_one_switch_per_home() {
        let header = Header {
            namespace: DISCOVERY.to_string(),
            name: "Discover".to_string(),
            message_id: "disc-1".to_string(),
            payload_version: Some("3".to_string()),
            correlation_token: None,
        };
        let homes = vec![Home::new("s1", "Lake House"), Home::new("s2", "Cabin")];

        let response = discovery(&header, &homes);
        let value = serde_json::to_value(&response).unwrap();

        assert_json_eq!(
            value["event"]["header"],
            json!({
                "namespace": "Alexa.Discovery",
                "name": "Discover.Response",
                "payloadVersion": "3",
                "messageId": "disc-1-R"
            })
        );
        assert!(value.get("context").is_none());

        let endpoints = value["event"]["payload"]["endpoints"].as_array().unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0]["endpointId"], json!("s1"));
        assert_eq!(endpoints[0]["friendlyName"], json!("Nest Lake House"));
        assert_eq!(endpoints[1]["friendlyName"], json!("Nest Cabin"));
        assert_eq!(endpoints[1]["displayCategories"], json!(["SWITCH"]));
        assert_json_eq!(
            endpoints[1]["capabilities"][1],
            json!({
                "type": "AlexaInterface",
                "interface": "Alexa.PowerController",
                "version": "3",
                "properties": {
                    "supported": [{ "name": "powerState" }],
                    "proactivelyReported": false,
                    "retrievable": true
                }
            })
        );
    }

    #[test]
    fn error_response_for_missing_structure() {
        let response = error(
            &directive(POWER_CONTROLLER, "TurnOff"),
            &ApiFailure::upstream(404, "no such structure"),
        );

        assert_json_eq!(
            response,
            json!({
                "event": {
                    "header": {
                        "namespace": "Alexa",
                        "name": "ErrorResponse",
                        "payloadVersion": "3",
                        "messageId": "abc-123-R",
                        "correlationToken": "corr-1"
                    },
                    "endpoint": { "endpointId": "s1" },
                    "payload": {
                        "type": "NO_SUCH_ENDPOINT",
                        "message": "no such structure"
                    }
                }
            })
        );
    }

    #[test]
    fn error_type_by_status_code() {
        assert_eq!(error_type(Some(401)), ErrorType::InvalidAuthorizationCredential);
        assert_eq!(error_type(Some(404)), ErrorType::NoSuchEndpoint);
        assert_eq!(error_type(Some(429)), ErrorType::RateLimitExceeded);
        assert_eq!(error_type(Some(500)), ErrorType::InternalError);
        assert_eq!(error_type(Some(307)), ErrorType::InternalError);
        assert_eq!(error_type(Some(403)), ErrorType::InternalError);
        assert_eq!(error_type(None), ErrorType::InternalError);
    }
}
