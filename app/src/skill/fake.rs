use std::sync::Mutex;

use crate::core::{ApiFailure, ApiResult, AwayState, BearerToken, Home};
use crate::port::NestApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestCall {
    ListHomes(String),
    GetAwayState(String, String),
    SetAwayState(String, AwayState, String),
}

/// In-memory Nest that records every call. `set_away_state` echoes the requested state unless
/// `confirmed_state` overrides it.
#[derive(Debug)]
pub struct FakeNest {
    pub homes: ApiResult<Vec<Home>>,
    pub away_state: ApiResult<AwayState>,
    pub confirmed_state: Option<AwayState>,
    pub set_failure: Option<ApiFailure>,
    pub(crate) calls: Mutex<Vec<NestCall>>,
}

impl Default for FakeNest {
    fn default() -> Self {
        Self {
            homes: Ok(vec![]),
            away_state: Ok(AwayState::Home),
            confirmed_state: None,
            set_failure: None,
            calls: Mutex::new(vec![]),
        }
    }
}

impl Clone for FakeNest {
    fn clone(&self) -> Self {
        Self {
            homes: self.homes.clone(),
            away_state: self.away_state.clone(),
            confirmed_state: self.confirmed_state,
            set_failure: self.set_failure.clone(),
            calls: Mutex::new(self.calls()),
        }
    }
}

impl FakeNest {
    pub fn calls(&self) -> Vec<NestCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: NestCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl NestApi for FakeNest {
    async fn list_homes(&self, token: &BearerToken) -> ApiResult<Vec<Home>> {
        self.record(NestCall::ListHomes(token.expose().to_string()));
        self.homes.clone()
    }

    async fn get_away_state(&self, home_id: &str, token: &BearerToken) -> ApiResult<AwayState> {
        self.record(NestCall::GetAwayState(home_id.to_string(), token.expose().to_string()));
        self.away_state.clone()
    }

    async fn set_away_state(&self, home_id: &str, state: AwayState, token: &BearerToken) -> ApiResult<AwayState> {
        self.record(NestCall::SetAwayState(
            home_id.to_string(),
            state,
            token.expose().to_string(),
        ));

        match &self.set_failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.confirmed_state.unwrap_or(state)),
        }
    }
}
