//! 主体解析
//!
//! 按显式优先级依次询问各来源 (权威来源在前，缓存在后):
//! - `Known` 立即采用，即使权限集合为空
//! - `Unknown` 才继续询问下一个来源
//! - 来源出错则停止并返回匿名主体，不会退回到可能过期的缓存
//! - 全部 `Unknown` 返回匿名主体

use chrono::{DateTime, Duration, Utc};
use hrm_errors::AppResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::principal::Principal;
use crate::session::SessionTokenVerifier;

/// 单个来源的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Known(Principal),
    Unknown,
}

/// 主体来源
#[cfg_attr(test, mockall::automock)]
pub trait PrincipalSource: Send + Sync {
    /// 来源名称 (日志用)
    fn name(&self) -> &'static str;

    fn resolve(&self) -> AppResult<Resolution>;
}

/// 解析结果及其来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrincipal {
    pub principal: Principal,
    /// 采用的来源；`None` 表示回退为匿名主体
    pub source: Option<&'static str>,
}

/// 有序主体解析器
#[derive(Default)]
pub struct PrincipalResolver {
    sources: Vec<Box<dyn PrincipalSource>>,
}

impl PrincipalResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加来源，先追加的优先级更高
    pub fn with_source(mut self, source: impl PrincipalSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn resolve(&self) -> Principal {
        self.resolve_detailed().principal
    }

    pub fn resolve_detailed(&self) -> ResolvedPrincipal {
        for source in &self.sources {
            match source.resolve() {
                Ok(Resolution::Known(principal)) => {
                    debug!(
                        source = source.name(),
                        super_admin = principal.is_super_admin,
                        permissions = principal.permissions.len(),
                        "Principal resolved"
                    );
                    return ResolvedPrincipal {
                        principal,
                        source: Some(source.name()),
                    };
                }
                Ok(Resolution::Unknown) => {
                    debug!(source = source.name(), "Principal source reported unknown");
                }
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Principal source failed, falling back to anonymous"
                    );
                    return ResolvedPrincipal {
                        principal: Principal::anonymous(),
                        source: None,
                    };
                }
            }
        }

        ResolvedPrincipal {
            principal: Principal::anonymous(),
            source: None,
        }
    }
}

/// 固定结果的来源
#[derive(Debug, Clone)]
pub struct StaticPrincipalSource {
    resolution: Resolution,
}

impl StaticPrincipalSource {
    pub fn known(principal: Principal) -> Self {
        Self {
            resolution: Resolution::Known(principal),
        }
    }

    pub fn unknown() -> Self {
        Self {
            resolution: Resolution::Unknown,
        }
    }
}

impl PrincipalSource for StaticPrincipalSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn resolve(&self) -> AppResult<Resolution> {
        Ok(self.resolution.clone())
    }
}

/// 持久化的主体快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalSnapshot {
    pub principal: Principal,
    pub stored_at: DateTime<Utc>,
}

impl PrincipalSnapshot {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            stored_at: Utc::now(),
        }
    }
}

/// 本地缓存来源
///
/// 快照缺失、超过 `max_age` 或时间戳晚于当前时间时报告 `Unknown`
#[derive(Debug, Clone)]
pub struct CachedPrincipalSource {
    snapshot: Option<PrincipalSnapshot>,
    max_age: Duration,
}

impl CachedPrincipalSource {
    pub fn new(snapshot: Option<PrincipalSnapshot>, max_age: Duration) -> Self {
        Self { snapshot, max_age }
    }

    pub fn resolve_at(&self, now: DateTime<Utc>) -> Resolution {
        match &self.snapshot {
            Some(snapshot) if snapshot.stored_at > now => {
                debug!(stored_at = %snapshot.stored_at, "Cached principal stored in the future");
                Resolution::Unknown
            }
            Some(snapshot) if now - snapshot.stored_at <= self.max_age => {
                Resolution::Known(snapshot.principal.clone())
            }
            Some(snapshot) => {
                debug!(stored_at = %snapshot.stored_at, "Cached principal expired");
                Resolution::Unknown
            }
            None => Resolution::Unknown,
        }
    }
}

impl PrincipalSource for CachedPrincipalSource {
    fn name(&self) -> &'static str {
        "local-cache"
    }

    fn resolve(&self) -> AppResult<Resolution> {
        Ok(self.resolve_at(Utc::now()))
    }
}

/// 会话令牌来源
///
/// 无令牌 -> `Unknown`；令牌无效 -> 错误
#[derive(Clone)]
pub struct TokenPrincipalSource {
    verifier: SessionTokenVerifier,
    token: Option<String>,
}

impl TokenPrincipalSource {
    pub fn new(verifier: SessionTokenVerifier, token: Option<String>) -> Self {
        Self { verifier, token }
    }
}

impl PrincipalSource for TokenPrincipalSource {
    fn name(&self) -> &'static str {
        "session-token"
    }

    fn resolve(&self) -> AppResult<Resolution> {
        match &self.token {
            Some(token) => {
                let claims = self.verifier.verify_access_token(token)?;
                Ok(Resolution::Known(claims.to_principal()))
            }
            None => Ok(Resolution::Unknown),
        }
    }
}
