//! 片段级鉴权闸门
//!
//! 两种调用方式共用同一判定:
//! - 页面级: [`AuthorizationGate::require`] 返回 `Forbidden`，由宿主渲染拒绝页
//! - 片段级: [`AuthorizationGate::guard`] 选择内容或静默的回退内容

use derive_more::Display;
use hrm_errors::{AppError, AppResult};
use metrics::counter;
use tracing::debug;

use crate::evaluator;
use crate::principal::Principal;
use crate::requirement::PermissionRequirement;

/// 闸门决策
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GateDecision {
    #[display("allowed")]
    Allowed,
    #[display("denied")]
    Denied,
}

impl GateDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }

    /// 按决策选取两个值之一
    pub fn select<T>(self, allowed: T, denied: T) -> T {
        match self {
            Self::Allowed => allowed,
            Self::Denied => denied,
        }
    }
}

impl From<bool> for GateDecision {
    fn from(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }
}

pub struct AuthorizationGate;

impl AuthorizationGate {
    pub fn evaluate(principal: &Principal, requirement: &PermissionRequirement) -> GateDecision {
        let decision = GateDecision::from(evaluator::satisfies(principal, requirement));
        counter!("authz_gate_decisions_total", "decision" => decision.to_string()).increment(1);
        decision
    }

    /// 片段级: 允许时执行 `on_allowed`，否则执行 `on_denied`
    pub fn guard<T>(
        principal: &Principal,
        requirement: &PermissionRequirement,
        on_allowed: impl FnOnce() -> T,
        on_denied: impl FnOnce() -> T,
    ) -> T {
        match Self::evaluate(principal, requirement) {
            GateDecision::Allowed => on_allowed(),
            GateDecision::Denied => on_denied(),
        }
    }

    /// 片段级: 拒绝时不产生内容
    pub fn render_if<T>(
        principal: &Principal,
        requirement: &PermissionRequirement,
        content: impl FnOnce() -> T,
    ) -> Option<T> {
        Self::guard(principal, requirement, || Some(content()), || None)
    }

    /// 页面级: 拒绝时返回 `AppError::Forbidden`
    pub fn require(principal: &Principal, requirement: &PermissionRequirement) -> AppResult<()> {
        match Self::evaluate(principal, requirement) {
            GateDecision::Allowed => Ok(()),
            GateDecision::Denied => {
                debug!(?requirement, "Access denied by gate");
                Err(AppError::forbidden(denial_message(requirement)))
            }
        }
    }
}

fn denial_message(requirement: &PermissionRequirement) -> String {
    match requirement {
        PermissionRequirement::None => "Access denied".to_string(),
        PermissionRequirement::Single(p) => format!("Missing permission: {}", p),
        PermissionRequirement::AnyOf(list) => {
            format!("Requires any of: {}", list.join(", "))
        }
        PermissionRequirement::AllOf(list) => {
            format!("Requires all of: {}", list.join(", "))
        }
        PermissionRequirement::Module(prefix) => format!("No access to module: {}", prefix),
    }
}

/// 权限检查宏
///
/// 主体缺少权限时提前返回 `AppError::Forbidden`
#[macro_export]
macro_rules! require_permission {
    ($principal:expr, $permission:expr) => {
        $crate::gate::AuthorizationGate::require(
            &$principal,
            &$crate::requirement::PermissionRequirement::Single(($permission).to_string()),
        )?
    };
}

/// 模块访问检查宏
#[macro_export]
macro_rules! require_module {
    ($principal:expr, $module:expr) => {
        $crate::gate::AuthorizationGate::require(
            &$principal,
            &$crate::requirement::PermissionRequirement::Module(($module).to_string()),
        )?
    };
}
