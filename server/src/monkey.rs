//! Chaos monkey
//!
//! Perturbs canned responses according to the configured behaviour
//! profiles: one profile (or none) is selected per request and its delay,
//! status, body and garbage effects are applied before the response is
//! written.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use mockingjay_common::behaviour::{select, BehaviourProfile, RandomSource, ThreadRandom};
use mockingjay_common::types::{FakeEndpoint, Headers};
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A response about to be written back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedResponse {
    /// Status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Raw body
    pub body: Vec<u8>,
}

impl From<&FakeEndpoint> for CannedResponse {
    fn from(endpoint: &FakeEndpoint) -> Self {
        Self {
            status: endpoint.response.code,
            headers: endpoint.response.headers.clone(),
            body: endpoint.response.body.clone().into_bytes(),
        }
    }
}

impl IntoResponse for CannedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            // The body may have been rewritten, let the server compute the length
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => warn!(header = %name, "Skipping invalid response header"),
            }
        }

        response
    }
}

/// Applies behaviour profiles to responses.
///
/// Cheap to clone; the profile list is shared and never mutated.
#[derive(Clone, Debug, Default)]
pub struct Monkey {
    profiles: Arc<Vec<BehaviourProfile>>,
}

impl Monkey {
    /// Creates a monkey over the given profiles.
    pub fn new(profiles: Vec<BehaviourProfile>) -> Self {
        Self {
            profiles: Arc::new(profiles),
        }
    }

    /// Configured profiles in declaration order.
    pub fn profiles(&self) -> &[BehaviourProfile] {
        &self.profiles
    }

    /// Logs every configured profile, one line each.
    pub fn log_profiles(&self) {
        if self.profiles.is_empty() {
            return;
        }
        info!(count = self.profiles.len(), "Monkey config loaded");
        for profile in self.profiles() {
            info!("{}", profile);
        }
    }

    /// Selects a profile with one draw from `random`.
    pub fn choose<R>(&self, random: &mut R) -> Option<&BehaviourProfile>
    where
        R: RandomSource + ?Sized,
    {
        select(&self.profiles, random)
    }

    /// Selects a profile with the thread-local generator and applies it.
    pub async fn apply(&self, response: CannedResponse) -> CannedResponse {
        let profile = self.choose(&mut ThreadRandom).cloned();
        match profile {
            Some(profile) if !profile.is_noop() => {
                debug!(behaviour = %profile, "Monkey perturbing response");
                perturb(&profile, response).await
            }
            _ => response,
        }
    }
}

/// Applies one profile: waits out the delay, then overrides status and body
/// and appends garbage bytes. Zero/empty fields leave the response alone.
pub async fn perturb(profile: &BehaviourProfile, mut response: CannedResponse) -> CannedResponse {
    if profile.delay > 0 {
        tokio::time::sleep(Duration::from_millis(profile.delay)).await;
    }

    if profile.status != 0 {
        response.status = profile.status;
    }

    if !profile.body.is_empty() {
        response.body = profile.body.clone().into_bytes();
    }

    if profile.garbage > 0 {
        response.body.extend(garbage_bytes(profile.garbage));
    }

    response
}

fn garbage_bytes(count: usize) -> Vec<u8> {
    let mut garbage = vec![0u8; count];
    rand::thread_rng().fill_bytes(&mut garbage);
    garbage
}
