use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Claim {
    pub uid: i32,
    pub exp: i64,
}

pub trait Tokener {
    fn verify_token(&self, token: &str) -> Result<Claim, Error>;
}
