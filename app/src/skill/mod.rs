mod redact;
mod response;

#[cfg(test)]
pub mod fake;

pub use redact::{loggable, redacted};

use chrono::Utc;

use crate::adapter::alexa::namespace::{ALEXA, DISCOVERY, POWER_CONTROLLER};
use crate::adapter::alexa::{Directive, DirectiveMessage, Header, ResponseEnvelope};
use crate::core::{ApiFailure, ApiResult, AwayState, BearerToken};
use crate::port::NestApi;

/// Exactly one of success or failure envelope per recognized directive.
pub type SkillOutcome = Result<ResponseEnvelope, ResponseEnvelope>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Discover,
    SetPower(AwayState),
    ReportState,
}

impl Route {
    fn of(header: &Header) -> Option<Self> {
        match (header.namespace.as_str(), header.name.as_str()) {
            (DISCOVERY, "Discover") => Some(Route::Discover),
            (POWER_CONTROLLER, "TurnOn") => Some(Route::SetPower(AwayState::Home)),
            (POWER_CONTROLLER, "TurnOff") => Some(Route::SetPower(AwayState::Away)),
            (ALEXA, "ReportState") => Some(Route::ReportState),
            _ => None,
        }
    }
}

/// Translates Alexa smart home directives into Nest away mode calls.
#[derive(Debug, Clone)]
pub struct AwaySkill<A> {
    nest: A,
}

impl<A: NestApi> AwaySkill<A> {
    pub fn new(nest: A) -> Self {
        Self { nest }
    }

    /// Returns `None` for directives the skill does not know. Those are dropped without any
    /// answer, neither success nor failure.
    pub async fn handle(&self, message: DirectiveMessage) -> Option<SkillOutcome> {
        let directive = message.directive;

        let Some(route) = Route::of(&directive.header) else {
            tracing::debug!(
                "Ignoring unsupported directive {}.{}",
                directive.header.namespace,
                directive.header.name
            );
            return None;
        };

        tracing::info!("Handling directive {}", redacted(&directive));

        let result = match route {
            Route::Discover => self.discover(&directive).await,
            Route::SetPower(target) => self.set_power(&directive, target).await,
            Route::ReportState => self.report_state(&directive).await,
        };

        let outcome = result.map_err(|failure| {
            tracing::error!(
                "Directive {} failed: {}",
                directive.header.message_id,
                loggable(&failure)
            );
            response::error(&directive, &failure)
        });

        match &outcome {
            Ok(envelope) => tracing::debug!("Responding with {}", redacted(envelope)),
            Err(envelope) => tracing::debug!("Responding with error {}", redacted(envelope)),
        }

        Some(outcome)
    }

    async fn discover(&self, directive: &Directive) -> ApiResult<ResponseEnvelope> {
        let token = required_token(directive)?;
        let homes = self.nest.list_homes(&token).await?;

        tracing::info!("Discovered {} Nest structures", homes.len());

        Ok(response::discovery(&directive.header, &homes))
    }

    async fn set_power(&self, directive: &Directive, target: AwayState) -> ApiResult<ResponseEnvelope> {
        let token = required_token(directive)?;
        let home_id = required_endpoint_id(directive)?;

        let confirmed = self.nest.set_away_state(home_id, target, &token).await?;

        if confirmed != target {
            tracing::warn!(
                "Requested away state {} for {}, but Nest confirmed {}",
                target,
                home_id,
                confirmed
            );
        }

        Ok(response::power_state(directive, "Response", confirmed, Utc::now()))
    }

    async fn report_state(&self, directive: &Directive) -> ApiResult<ResponseEnvelope> {
        let token = required_token(directive)?;
        let home_id = required_endpoint_id(directive)?;

        let state = self.nest.get_away_state(home_id, &token).await?;

        Ok(response::power_state(directive, "StateReport", state, Utc::now()))
    }
}

fn required_token(directive: &Directive) -> ApiResult<BearerToken> {
    directive
        .token()
        .ok_or_else(|| ApiFailure::without_status("Directive carries no bearer token"))
}

fn required_endpoint_id(directive: &Directive) -> ApiResult<&str> {
    directive
        .endpoint_id()
        .ok_or_else(|| ApiFailure::without_status("Directive carries no endpoint"))
}
