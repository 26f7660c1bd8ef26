//! hrm-auth-core - 鉴权核心库
//!
//! 权限判定、资源树过滤、路由权限表与片段闸门。
//! 所有判定都是纯函数，显式接收 [`Principal`]，不读取任何全局身份。

pub mod error;
pub mod evaluator;
pub mod gate;
pub mod navigation;
pub mod permissions;
pub mod principal;
pub mod requirement;
pub mod resolver;
pub mod route;
pub mod session;
pub mod tree;

pub use error::{AuthzError, MalformedTreeError};
pub use evaluator::{
    can_access_module, has_all_permissions, has_any_permission, has_permission, satisfies,
};
pub use gate::{AuthorizationGate, GateDecision};
pub use navigation::{MenuEntry, MenuNode, hr_navigation};
pub use principal::{PermissionSet, Principal};
pub use requirement::PermissionRequirement;
pub use resolver::{
    CachedPrincipalSource, PrincipalResolver, PrincipalSnapshot, PrincipalSource, Resolution,
    ResolvedPrincipal, StaticPrincipalSource, TokenPrincipalSource,
};
pub use route::{RouteAuthorizationMap, RouteAuthorizationMapBuilder};
pub use session::{SessionClaims, SessionTokenVerifier};
pub use tree::{AuthorizableNode, DEFAULT_MAX_DEPTH, TreeAuthorizationFilter};
