//! 资源树鉴权过滤
//!
//! 深度优先、后序遍历，自底向上构造新树，从不修改输入:
//! 1. 先递归过滤子节点
//! 2. 节点自身需求不满足 -> 整棵子树丢弃 (子节点的权限不能复活父节点)
//! 3. 原本有子节点但过滤后为空 -> 丢弃；叶子节点保留
//!
//! 超级管理员直接返回输入的副本，不遍历节点。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MalformedTreeError;
use crate::evaluator;
use crate::principal::Principal;
use crate::requirement::PermissionRequirement;

/// 默认递归深度上限
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// 可鉴权的树节点
///
/// `payload` 为调用方数据 (菜单标题、路径等)，过滤时原样携带
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct AuthorizableNode<T = ()> {
    pub id: String,
    #[serde(default)]
    pub requirement: PermissionRequirement,
    pub payload: T,
    #[serde(default)]
    pub children: Vec<AuthorizableNode<T>>,
}

impl<T> AuthorizableNode<T> {
    pub fn new(id: impl Into<String>, requirement: PermissionRequirement, payload: T) -> Self {
        Self {
            id: id.into(),
            requirement,
            payload,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<AuthorizableNode<T>>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 子树节点总数 (含自身)
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

impl AuthorizableNode<()> {
    /// 无 payload 的节点
    pub fn bare(id: impl Into<String>, requirement: PermissionRequirement) -> Self {
        Self::new(id, requirement, ())
    }
}

/// 森林节点总数
pub fn forest_size<T>(forest: &[AuthorizableNode<T>]) -> usize {
    forest.iter().map(AuthorizableNode::node_count).sum()
}

/// 树过滤器
#[derive(Debug, Clone, Copy)]
pub struct TreeAuthorizationFilter {
    max_depth: usize,
}

impl Default for TreeAuthorizationFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl TreeAuthorizationFilter {
    /// `max_depth` 不超过 [`hrm_config::MAX_TREE_DEPTH`]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.min(hrm_config::MAX_TREE_DEPTH),
        }
    }

    pub fn from_config(config: &hrm_config::TreeConfig) -> Self {
        Self::new(config.max_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// 过滤森林，返回主体可见的新森林
    pub fn filter<T: Clone>(
        &self,
        principal: &Principal,
        forest: &[AuthorizableNode<T>],
    ) -> Result<Vec<AuthorizableNode<T>>, MalformedTreeError> {
        if principal.is_super_admin {
            debug!(roots = forest.len(), "Super admin bypass, tree returned unfiltered");
            return Ok(forest.to_vec());
        }

        let mut ancestors = Vec::new();
        let mut kept = Vec::with_capacity(forest.len());
        for root in forest {
            if let Some(node) = self.filter_node(principal, root, 1, &mut ancestors)? {
                kept.push(node);
            }
        }

        debug!(
            input_nodes = forest_size(forest),
            kept_nodes = forest_size(&kept),
            "Tree filtered"
        );
        Ok(kept)
    }

    fn filter_node<'a, T: Clone>(
        &self,
        principal: &Principal,
        node: &'a AuthorizableNode<T>,
        depth: usize,
        ancestors: &mut Vec<&'a str>,
    ) -> Result<Option<AuthorizableNode<T>>, MalformedTreeError> {
        if depth > self.max_depth {
            return Err(MalformedTreeError::DepthExceeded {
                id: node.id.clone(),
                max_depth: self.max_depth,
            });
        }
        if ancestors.contains(&node.id.as_str()) {
            return Err(MalformedTreeError::Cycle {
                id: node.id.clone(),
            });
        }

        ancestors.push(&node.id);
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            if let Some(kept) = self.filter_node(principal, child, depth + 1, ancestors)? {
                children.push(kept);
            }
        }
        ancestors.pop();

        if !evaluator::satisfies(principal, &node.requirement) {
            return Ok(None);
        }
        // 分组内已无可见项
        if !node.children.is_empty() && children.is_empty() {
            return Ok(None);
        }

        Ok(Some(AuthorizableNode {
            id: node.id.clone(),
            requirement: node.requirement.clone(),
            payload: node.payload.clone(),
            children,
        }))
    }
}
