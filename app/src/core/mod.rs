mod failure;
mod home;
mod token;

pub use failure::{ApiFailure, ApiResult};
pub use home::{AwayState, Home, PowerState};
pub use token::BearerToken;
