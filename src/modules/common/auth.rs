// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::{
    modules::{
        donation::lifecycle::{Actor, ActorRole},
        error::{code::ErrorCode, FoodLinkResult},
    },
    raise_error,
};
use poem::{
    web::RealIp, Endpoint, FromRequest, Middleware, Request, RequestBody, Result,
};
use std::{net::IpAddr, sync::Arc};

use super::create_api_error_response;

/// Identity headers injected by the auth gateway in front of this service.
/// The gateway terminates the user-facing session (passwords, OAuth, token
/// refresh) and forwards only the verified actor.
pub const AUTH_USER_HEADER: &str = "X-Auth-User-Id";
pub const AUTH_ROLE_HEADER: &str = "X-Auth-Role";

pub struct ApiGuard;

pub struct ApiGuardEndpoint<E> {
    ep: E,
}

impl<E: Endpoint> Middleware<E> for ApiGuard {
    type Output = ApiGuardEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ApiGuardEndpoint { ep }
    }
}

impl<E: Endpoint> Endpoint for ApiGuardEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, mut req: Request) -> Result<Self::Output> {
        let context = extract_client_context(&req).await?;
        req.set_data(Arc::new(context));
        self.ep.call(req).await
    }
}

#[derive(Clone, Debug)]
pub struct ClientContext {
    pub ip_addr: Option<IpAddr>,
    pub actor: Actor,
}

impl ClientContext {
    pub fn require_role(&self, allowed: &[ActorRole]) -> FoodLinkResult<()> {
        if allowed.contains(&self.actor.role) {
            Ok(())
        } else {
            Err(raise_error!(
                format!(
                    "A {} is not allowed to perform this operation.",
                    self.actor.role
                ),
                ErrorCode::PermissionDenied
            ))
        }
    }
}

impl<'a> FromRequest<'a> for ClientContext {
    async fn from_request(req: &'a Request, _body: &mut RequestBody) -> Result<Self> {
        extract_client_context(req).await
    }
}

pub async fn extract_client_context(req: &Request) -> Result<ClientContext> {
    let ip_addr = RealIp::from_request_without_body(req)
        .await
        .ok()
        .and_then(|real_ip| real_ip.0);

    let user_id = req
        .header(AUTH_USER_HEADER)
        .and_then(|v| v.parse::<u64>().ok())
        .ok_or_else(|| {
            create_api_error_response(
                "Missing or invalid authenticated user id",
                ErrorCode::PermissionDenied,
            )
        })?;

    let role = req
        .header(AUTH_ROLE_HEADER)
        .and_then(ActorRole::parse)
        .ok_or_else(|| {
            create_api_error_response(
                "Missing or invalid actor role (expected one of: donor, ngo, rider)",
                ErrorCode::PermissionDenied,
            )
        })?;

    Ok(ClientContext {
        ip_addr,
        actor: Actor { id: user_id, role },
    })
}
