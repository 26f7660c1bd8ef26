use hrm_errors::AppError;
use thiserror::Error;

/// 鉴权声明/配置错误 (构造期)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("Permission list must not be empty")]
    EmptyPermissionList,
    #[error("Permission slug must not be empty")]
    EmptyPermissionSlug,
    #[error("Module prefix must not be empty")]
    EmptyModulePrefix,
    #[error("Route key must not be empty")]
    EmptyRouteKey,
    #[error("Duplicate route entry: {0}")]
    DuplicateRoute(String),
    #[error("Invalid rule for route {key}: {reason}")]
    InvalidRouteRule { key: String, reason: String },
}

/// 资源树结构错误
///
/// 属于调用方的数据缺陷，不是正常的鉴权结果
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTreeError {
    #[error("Node {id} exceeds the maximum tree depth of {max_depth}")]
    DepthExceeded { id: String, max_depth: usize },
    #[error("Node {id} appears on its own ancestor path")]
    Cycle { id: String },
}

impl From<AuthzError> for AppError {
    fn from(error: AuthzError) -> Self {
        AppError::Validation(error.to_string())
    }
}

impl From<MalformedTreeError> for AppError {
    fn from(error: MalformedTreeError) -> Self {
        AppError::Internal(error.to_string())
    }
}
