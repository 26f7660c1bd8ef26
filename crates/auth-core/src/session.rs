//! 会话令牌
//!
//! 身份服务签发的 HS256 JWT，携带权限集合与超级管理员标记

use chrono::{Duration, Utc};
use hrm_config::SessionConfig;
use hrm_errors::{AppError, AppResult};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::principal::{PermissionSet, Principal};

/// 超级管理员角色代码
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// 会话 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Audience
    #[serde(default)]
    pub aud: String,
    /// Token type (access or refresh)
    #[serde(default)]
    pub token_type: String,
    /// Permissions
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// 显式超级管理员标记
    #[serde(default)]
    pub is_super_admin: bool,
}

impl SessionClaims {
    pub fn is_access_token(&self) -> bool {
        self.token_type == "access"
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 显式标记或 `super_admin` 角色
    pub fn is_super_admin(&self) -> bool {
        self.is_super_admin || self.has_role(SUPER_ADMIN_ROLE)
    }

    pub fn to_principal(&self) -> Principal {
        Principal::new(
            self.is_super_admin(),
            self.permissions.iter().cloned().collect::<PermissionSet>(),
        )
    }
}

/// 会话令牌校验器
#[derive(Clone)]
pub struct SessionTokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl SessionTokenVerifier {
    pub fn new(secret: &str, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.secret.expose_secret(),
            config.issuer.clone(),
            config.audience.clone(),
        )
    }

    /// 签发访问令牌 (测试与本地调试使用)
    pub fn issue_access_token(
        &self,
        subject: &str,
        permissions: Vec<String>,
        roles: Vec<String>,
        expires_in_secs: i64,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: subject.to_string(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            token_type: "access".to_string(),
            permissions,
            roles,
            is_super_admin: false,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
    }

    /// 校验访问令牌
    pub fn verify_access_token(&self, token: &str) -> AppResult<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {}", e)))?
            .claims;

        if claims.jti.is_empty() {
            return Err(AppError::unauthorized("Token ID (jti) missing"));
        }
        if !claims.is_access_token() {
            return Err(AppError::unauthorized("Not an access token"));
        }

        Ok(claims)
    }
}
