use crate::context::UserInfo;
use crate::core::ports::tokener::Tokener;
use crate::impls::tokener::jwt::JWT;
use actix_web::{
    dev::{Service, ServiceRequest, Transform},
    error::ErrorUnauthorized,
    Error, HttpMessage,
};
use log::debug;
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::rc::Rc;

pub struct JWTMiddleware {
    tokener: Rc<JWT>,
}

impl JWTMiddleware {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { tokener: Rc::new(JWT::new(secret)) }
    }
}

impl<S> Transform<S, ServiceRequest> for JWTMiddleware
where
    S: Service<ServiceRequest> + 'static,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Error = Error;
    type Response = S::Response;
    type Transform = JWTService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JWTService {
            tokener: self.tokener.clone(),
            next_service: service,
        }))
    }
}

pub struct JWTService<S> {
    tokener: Rc<JWT>,
    next_service: S,
}

fn bearer(req: &ServiceRequest) -> Option<&str> {
    let value = req.headers().get("Authorization")?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

impl<S> Service<ServiceRequest> for JWTService<S>
where
    S: Service<ServiceRequest>,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Response = S::Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx).map_err(|e| e.into())
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claim = match bearer(&req).map(|token| self.tokener.verify_token(token)) {
            Some(Ok(claim)) => claim,
            Some(Err(e)) => {
                debug!("rejected token: {}", e);
                return Box::pin(async move { Err(ErrorUnauthorized("invalid token")) });
            }
            None => return Box::pin(async move { Err(ErrorUnauthorized("no token in header")) }),
        };
        req.extensions_mut().insert(UserInfo { id: claim.uid });
        let res_fut = self.next_service.call(req);
        Box::pin(async move { res_fut.await.map_err(|e| e.into()) })
    }
}
