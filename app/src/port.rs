#![allow(async_fn_in_trait)]

use crate::core::{ApiResult, AwayState, BearerToken, Home};

/// Operations the skill needs from the Nest API. Every call authenticates with the token of
/// the directive being handled.
pub trait NestApi {
    async fn list_homes(&self, token: &BearerToken) -> ApiResult<Vec<Home>>;

    async fn get_away_state(&self, home_id: &str, token: &BearerToken) -> ApiResult<AwayState>;

    /// Resolves to the state confirmed by Nest, which is what actually took effect.
    async fn set_away_state(&self, home_id: &str, state: AwayState, token: &BearerToken) -> ApiResult<AwayState>;
}
