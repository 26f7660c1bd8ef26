//! 路由权限表
//!
//! 启动时构造一次，之后只读，可在并发读者间共享。
//! 按路由键精确匹配，不支持通配符/前缀；未登记的路由默认公开。

use std::collections::HashMap;

use hrm_config::RouteRule;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::AuthzError;
use crate::evaluator;
use crate::permissions::*;
use crate::principal::Principal;
use crate::requirement::PermissionRequirement;

static PUBLIC: PermissionRequirement = PermissionRequirement::None;

/// 内置 HR 路由清单，全部为 AnyOf
const HR_ROUTE_TABLE: &[(&str, &[&str])] = &[
    ("/employees", &[EMPLOYEES_VIEW, EMPLOYEES_EDIT]),
    ("/employees/create", &[EMPLOYEES_CREATE]),
    ("/employees/edit", &[EMPLOYEES_EDIT]),
    ("/departments", &[DEPARTMENTS_VIEW, DEPARTMENTS_MANAGE]),
    ("/attendance", &[ATTENDANCE_VIEW, ATTENDANCE_MANAGE]),
    ("/attendance/clock", &[ATTENDANCE_CLOCK]),
    ("/attendance/reports", &[ATTENDANCE_MANAGE]),
    ("/payroll", &[PAYROLL_VIEW, PAYROLL_PROCESS]),
    ("/payroll/run", &[PAYROLL_PROCESS]),
    ("/payroll/payslips", &[PAYROLL_PAYSLIPS, PAYROLL_PROCESS]),
    ("/leaves", &[LEAVES_VIEW, LEAVES_APPLY, LEAVES_APPROVE]),
    ("/leaves/apply", &[LEAVES_APPLY]),
    ("/leaves/approvals", &[LEAVES_APPROVE]),
    ("/leaves/types", &[LEAVES_TYPES_MANAGE]),
    ("/recruitment", &[RECRUITMENT_VIEW, RECRUITMENT_JOBS_MANAGE]),
    ("/recruitment/jobs", &[RECRUITMENT_JOBS_MANAGE]),
    ("/recruitment/candidates", &[RECRUITMENT_CANDIDATES_MANAGE]),
    ("/messages", &[MESSAGING_VIEW, MESSAGING_SEND]),
    ("/messages/compose", &[MESSAGING_SEND]),
    ("/settings", &[SETTINGS_VIEW, SETTINGS_MANAGE]),
    ("/settings/roles", &[ROLES_MANAGE]),
];

static HR_DEFAULT: Lazy<RouteAuthorizationMap> = Lazy::new(|| RouteAuthorizationMap {
    entries: HR_ROUTE_TABLE
        .iter()
        .map(|(key, permissions)| {
            (
                (*key).to_string(),
                PermissionRequirement::AnyOf(permissions.iter().map(|p| p.to_string()).collect()),
            )
        })
        .collect(),
});

/// 路由键 -> 权限需求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteAuthorizationMap {
    entries: HashMap<String, PermissionRequirement>,
}

impl RouteAuthorizationMap {
    pub fn builder() -> RouteAuthorizationMapBuilder {
        RouteAuthorizationMapBuilder::default()
    }

    /// 内置 HR 路由表 (进程内只构造一次)
    pub fn hr_default() -> &'static RouteAuthorizationMap {
        &HR_DEFAULT
    }

    /// 从配置规则构造
    pub fn from_rules(rules: &[RouteRule]) -> Result<Self, AuthzError> {
        rules
            .iter()
            .try_fold(Self::builder(), |builder, rule| {
                builder.route(rule.key.clone(), requirement_from_rule(rule)?)
            })
            .map(RouteAuthorizationMapBuilder::build)
    }

    /// 查询路由需求，未登记返回 `None` (公开)
    pub fn requirement_for(&self, route_key: &str) -> &PermissionRequirement {
        self.entries.get(route_key).unwrap_or(&PUBLIC)
    }

    pub fn is_authorized(&self, principal: &Principal, route_key: &str) -> bool {
        let allowed = evaluator::satisfies(principal, self.requirement_for(route_key));
        debug!(
            route = route_key,
            mapped = self.contains(route_key),
            allowed,
            "Route authorization checked"
        );
        allowed
    }

    pub fn contains(&self, route_key: &str) -> bool {
        self.entries.contains_key(route_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按路由键排序的条目
    pub fn entries(&self) -> Vec<(&str, &PermissionRequirement)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, req)| (key.as_str(), req))
            .collect();
        entries.sort_unstable_by_key(|(key, _)| *key);
        entries
    }
}

/// 路由表构造器
#[derive(Debug, Default)]
pub struct RouteAuthorizationMapBuilder {
    entries: HashMap<String, PermissionRequirement>,
}

impl RouteAuthorizationMapBuilder {
    pub fn route(
        mut self,
        key: impl Into<String>,
        requirement: PermissionRequirement,
    ) -> Result<Self, AuthzError> {
        let key = key.into();
        if key.is_empty() {
            return Err(AuthzError::EmptyRouteKey);
        }
        if self.entries.contains_key(&key) {
            return Err(AuthzError::DuplicateRoute(key));
        }
        self.entries.insert(key, requirement);
        Ok(self)
    }

    pub fn build(self) -> RouteAuthorizationMap {
        RouteAuthorizationMap {
            entries: self.entries,
        }
    }
}

fn requirement_from_rule(rule: &RouteRule) -> Result<PermissionRequirement, AuthzError> {
    let invalid = |reason: String| AuthzError::InvalidRouteRule {
        key: rule.key.clone(),
        reason,
    };

    let requirement = match (&rule.permission, &rule.any_of, &rule.all_of, &rule.module) {
        (None, None, None, None) => Ok(PermissionRequirement::None),
        (Some(permission), None, None, None) => PermissionRequirement::single(permission.clone()),
        (None, Some(permissions), None, None) => {
            PermissionRequirement::any_of(permissions.iter().cloned())
        }
        (None, None, Some(permissions), None) => {
            PermissionRequirement::all_of(permissions.iter().cloned())
        }
        (None, None, None, Some(module)) => PermissionRequirement::module(module.clone()),
        _ => {
            return Err(invalid(
                "at most one of permission, any_of, all_of, module may be set".to_string(),
            ));
        }
    };

    requirement.map_err(|e| invalid(e.to_string()))
}
