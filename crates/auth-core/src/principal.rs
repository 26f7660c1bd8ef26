//! 鉴权主体
//!
//! 每次导航/渲染周期独立构造，不可变，不跨请求缓存

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// 权限标识集合
///
/// 只支持成员判断与前缀扫描；空字符串在构造时被丢弃
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, permission: &str) -> bool {
        !permission.is_empty() && self.0.contains(permission)
    }

    /// 是否持有以 `prefix` 开头的任一权限
    pub fn any_with_prefix(&self, prefix: &str) -> bool {
        self.0.iter().any(|p| p.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// 排序后的权限列表 (用于稳定输出)
    pub fn sorted(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.iter().collect();
        slugs.sort_unstable();
        slugs
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(permissions: Vec<String>) -> Self {
        permissions.into_iter().collect()
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        let mut permissions: Vec<String> = set.0.into_iter().collect();
        permissions.sort_unstable();
        permissions
    }
}

/// 鉴权主体：超级管理员标记 + 权限集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl Principal {
    pub fn new(is_super_admin: bool, permissions: PermissionSet) -> Self {
        Self {
            is_super_admin,
            permissions,
        }
    }

    /// 无任何权限的匿名主体 (fail closed 的默认值)
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn super_admin() -> Self {
        Self {
            is_super_admin: true,
            permissions: PermissionSet::new(),
        }
    }

    pub fn with_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_super_admin: false,
            permissions: permissions.into_iter().collect(),
        }
    }
}
