use crate::core::ports::tokener::{Claim, Tokener};
use crate::error::Error;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

pub struct JWT {
    secret: Vec<u8>,
}

impl JWT {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl Tokener for JWT {
    fn verify_token(&self, token: &str) -> Result<Claim, Error> {
        let data = decode::<Claim>(token, &DecodingKey::from_secret(&self.secret), &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }
}
