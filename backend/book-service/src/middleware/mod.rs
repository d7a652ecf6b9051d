/// HTTP middleware for book-service
///
/// Provides HTTP Basic authentication: credentials are checked against the
/// configured username and argon2 password hash.
use crate::config::AuthConfig;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, HttpMessage};
use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use base64::Engine;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Authenticated username stored in request extensions after auth
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// Actix middleware enforcing HTTP Basic auth
pub struct BasicAuthMiddleware {
    auth: Arc<AuthConfig>,
}

impl BasicAuthMiddleware {
    pub fn new(auth: Arc<AuthConfig>) -> Self {
        Self { auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddlewareService {
            service: Rc::new(service),
            auth: self.auth.clone(),
        }))
    }
}

pub struct BasicAuthMiddlewareService<S> {
    service: Rc<S>,
    auth: Arc<AuthConfig>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let auth = self.auth.clone();

        Box::pin(async move {
            let header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

            let (username, password) = parse_basic_credentials(header)
                .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))?;

            if username != auth.username
                || !verify_password(&password, &auth.password_hash)
                    .map_err(ErrorUnauthorized)?
            {
                return Err(ErrorUnauthorized("Incorrect username or password"));
            }

            req.extensions_mut().insert(AuthenticatedUser(username));

            service.call(req).await
        })
    }
}

/// Decode `Basic base64(user:pass)` into its parts
fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Verify a password against its argon2 PHC hash
fn verify_password(password: &str, password_hash: &str) -> Result<bool, String> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| format!("Invalid password hash format: {e}"))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(format!("Password verification failed: {e}")),
    }
}
