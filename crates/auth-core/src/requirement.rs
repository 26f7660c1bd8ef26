//! 权限需求
//!
//! 资源在声明处构造一次需求，此后只有 [`crate::evaluator::satisfies`] 按形状分支

use serde::{Deserialize, Serialize};

use crate::error::AuthzError;

/// 访问受保护资源所需的权限
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PermissionRequirement {
    /// 无需求，总是满足
    #[default]
    None,
    /// 持有指定权限
    Single(String),
    /// 至少持有其中之一；空列表永不满足
    AnyOf(Vec<String>),
    /// 持有全部；空列表恒满足
    AllOf(Vec<String>),
    /// 持有该模块下任一权限 (`{module}.*`)
    Module(String),
}

impl PermissionRequirement {
    pub fn single(permission: impl Into<String>) -> Result<Self, AuthzError> {
        Ok(Self::Single(non_empty_slug(permission.into())?))
    }

    pub fn any_of<I, S>(permissions: I) -> Result<Self, AuthzError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::AnyOf(non_empty_list(permissions)?))
    }

    pub fn all_of<I, S>(permissions: I) -> Result<Self, AuthzError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::AllOf(non_empty_list(permissions)?))
    }

    pub fn module(prefix: impl Into<String>) -> Result<Self, AuthzError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(AuthzError::EmptyModulePrefix);
        }
        Ok(Self::Module(prefix))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

fn non_empty_slug(permission: String) -> Result<String, AuthzError> {
    if permission.is_empty() {
        return Err(AuthzError::EmptyPermissionSlug);
    }
    Ok(permission)
}

fn non_empty_list<I, S>(permissions: I) -> Result<Vec<String>, AuthzError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let permissions = permissions
        .into_iter()
        .map(|p| non_empty_slug(p.into()))
        .collect::<Result<Vec<_>, _>>()?;
    if permissions.is_empty() {
        return Err(AuthzError::EmptyPermissionList);
    }
    Ok(permissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_reject_degenerate_input() {
        assert_eq!(
            PermissionRequirement::any_of(Vec::<String>::new()),
            Err(AuthzError::EmptyPermissionList)
        );
        assert_eq!(
            PermissionRequirement::all_of(["payroll.view", ""]),
            Err(AuthzError::EmptyPermissionSlug)
        );
        assert_eq!(
            PermissionRequirement::single(""),
            Err(AuthzError::EmptyPermissionSlug)
        );
        assert_eq!(
            PermissionRequirement::module(""),
            Err(AuthzError::EmptyModulePrefix)
        );
    }

    #[test]
    fn test_constructors_keep_order() {
        let req = PermissionRequirement::any_of(["employees.create", "employees.edit"]).unwrap();
        assert_eq!(
            req,
            PermissionRequirement::AnyOf(vec![
                "employees.create".to_string(),
                "employees.edit".to_string()
            ])
        );
    }

    #[test]
    fn test_json_shape() {
        let req: PermissionRequirement =
            serde_json::from_str(r#"{"kind": "single", "value": "leaves.apply"}"#).unwrap();
        assert_eq!(req, PermissionRequirement::Single("leaves.apply".to_string()));

        let req: PermissionRequirement = serde_json::from_str(r#"{"kind": "none"}"#).unwrap();
        assert!(req.is_none());
    }
}
