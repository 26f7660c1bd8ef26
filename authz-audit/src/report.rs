//! 审计报告

use hrm_auth_core::{AuthorizationGate, PermissionRequirement, Principal, RouteAuthorizationMap};
use hrm_errors::ProblemDetails;
use serde::Serialize;

/// 单条路由的判定
#[derive(Debug, Serialize)]
pub struct RouteVerdict<'a> {
    pub route: &'a str,
    pub mapped: bool,
    pub requirement: &'a PermissionRequirement,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<ProblemDetails>,
}

pub fn route_report<'a>(
    routes: &'a RouteAuthorizationMap,
    principal: &Principal,
) -> Vec<RouteVerdict<'a>> {
    routes
        .entries()
        .into_iter()
        .map(|(route, _)| check_route(routes, principal, route))
        .collect()
}

pub fn check_route<'a>(
    routes: &'a RouteAuthorizationMap,
    principal: &Principal,
    route: &'a str,
) -> RouteVerdict<'a> {
    let requirement = routes.requirement_for(route);
    let problem = AuthorizationGate::require(principal, requirement)
        .err()
        .map(|e| e.to_problem_details().with_instance(route));

    RouteVerdict {
        route,
        mapped: routes.contains(route),
        requirement,
        allowed: problem.is_none(),
        problem,
    }
}
