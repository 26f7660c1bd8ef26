//! 权限判定
//!
//! 纯函数，无副作用。超级管理员在每个判定中最先检查；
//! 任何畸形输入 (空权限标识、空模块前缀) 都判为不满足。

use crate::principal::Principal;
use crate::requirement::PermissionRequirement;

/// 是否持有单个权限
pub fn has_permission(principal: &Principal, permission: &str) -> bool {
    principal.is_super_admin || principal.permissions.contains(permission)
}

/// 是否持有其中任一权限；空列表为 false
pub fn has_any_permission<S: AsRef<str>>(principal: &Principal, permissions: &[S]) -> bool {
    principal.is_super_admin
        || permissions
            .iter()
            .any(|p| principal.permissions.contains(p.as_ref()))
}

/// 是否持有全部权限；空列表为 true
pub fn has_all_permissions<S: AsRef<str>>(principal: &Principal, permissions: &[S]) -> bool {
    principal.is_super_admin
        || permissions
            .iter()
            .all(|p| principal.permissions.contains(p.as_ref()))
}

/// 模块级可见性: 持有任一 `{module_prefix}.` 开头的权限
pub fn can_access_module(principal: &Principal, module_prefix: &str) -> bool {
    if principal.is_super_admin {
        return true;
    }
    if module_prefix.is_empty() {
        return false;
    }
    let prefix = format!("{}.", module_prefix);
    principal.permissions.any_with_prefix(&prefix)
}

/// 统一入口，上层组件只通过此函数判定
pub fn satisfies(principal: &Principal, requirement: &PermissionRequirement) -> bool {
    match requirement {
        PermissionRequirement::None => true,
        PermissionRequirement::Single(permission) => has_permission(principal, permission),
        PermissionRequirement::AnyOf(permissions) => {
            has_any_permission(principal, permissions.as_slice())
        }
        PermissionRequirement::AllOf(permissions) => {
            has_all_permissions(principal, permissions.as_slice())
        }
        PermissionRequirement::Module(prefix) => can_access_module(principal, prefix),
    }
}
