//! 内置 HR 侧边栏导航

use serde::{Deserialize, Serialize};

use crate::permissions::*;
use crate::requirement::PermissionRequirement;
use crate::tree::AuthorizableNode;

/// 菜单项数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    /// 分组没有路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

pub type MenuNode = AuthorizableNode<MenuEntry>;

fn group(id: &str, label: &str, requirement: PermissionRequirement, items: Vec<MenuNode>) -> MenuNode {
    AuthorizableNode::new(
        id,
        requirement,
        MenuEntry {
            label: label.to_string(),
            path: None,
        },
    )
    .with_children(items)
}

fn item(id: &str, label: &str, path: &str, requirement: PermissionRequirement) -> MenuNode {
    AuthorizableNode::new(
        id,
        requirement,
        MenuEntry {
            label: label.to_string(),
            path: Some(path.to_string()),
        },
    )
}

fn any(permissions: &[&str]) -> PermissionRequirement {
    PermissionRequirement::AnyOf(permissions.iter().map(|p| p.to_string()).collect())
}

fn module(prefix: &str) -> PermissionRequirement {
    PermissionRequirement::Module(prefix.to_string())
}

/// HR 侧边栏
///
/// 分组以模块可见性把关，菜单项的需求与 [`crate::route::RouteAuthorizationMap::hr_default`] 对应
pub fn hr_navigation() -> Vec<MenuNode> {
    vec![
        item("dashboard", "Dashboard", "/dashboard", PermissionRequirement::None),
        group(
            "people",
            "People",
            PermissionRequirement::None,
            vec![
                item("employees", "Employees", "/employees", any(&[EMPLOYEES_VIEW, EMPLOYEES_EDIT])),
                item("employees-create", "Add Employee", "/employees/create", any(&[EMPLOYEES_CREATE])),
                item(
                    "departments",
                    "Departments",
                    "/departments",
                    any(&[DEPARTMENTS_VIEW, DEPARTMENTS_MANAGE]),
                ),
            ],
        ),
        group(
            "attendance",
            "Attendance",
            module(MODULE_ATTENDANCE),
            vec![
                item("attendance-clock", "Clock In/Out", "/attendance/clock", any(&[ATTENDANCE_CLOCK])),
                item(
                    "attendance-log",
                    "Attendance Log",
                    "/attendance",
                    any(&[ATTENDANCE_VIEW, ATTENDANCE_MANAGE]),
                ),
                item("attendance-reports", "Reports", "/attendance/reports", any(&[ATTENDANCE_MANAGE])),
            ],
        ),
        group(
            "leaves",
            "Leaves",
            module(MODULE_LEAVES),
            vec![
                item("leaves-apply", "Apply for Leave", "/leaves/apply", any(&[LEAVES_APPLY])),
                item("leaves-approvals", "Approvals", "/leaves/approvals", any(&[LEAVES_APPROVE])),
                item("leaves-types", "Leave Types", "/leaves/types", any(&[LEAVES_TYPES_MANAGE])),
            ],
        ),
        group(
            "payroll",
            "Payroll",
            module(MODULE_PAYROLL),
            vec![
                item("payroll-overview", "Overview", "/payroll", any(&[PAYROLL_VIEW, PAYROLL_PROCESS])),
                item("payroll-run", "Run Payroll", "/payroll/run", any(&[PAYROLL_PROCESS])),
                item(
                    "payroll-payslips",
                    "Payslips",
                    "/payroll/payslips",
                    any(&[PAYROLL_PAYSLIPS, PAYROLL_PROCESS]),
                ),
            ],
        ),
        group(
            "recruitment",
            "Recruitment",
            module(MODULE_RECRUITMENT),
            vec![
                item("recruitment-jobs", "Job Openings", "/recruitment/jobs", any(&[RECRUITMENT_JOBS_MANAGE])),
                item(
                    "recruitment-candidates",
                    "Candidates",
                    "/recruitment/candidates",
                    any(&[RECRUITMENT_CANDIDATES_MANAGE]),
                ),
            ],
        ),
        item("messages", "Messages", "/messages", any(&[MESSAGING_VIEW, MESSAGING_SEND])),
        group(
            "settings",
            "Settings",
            module(MODULE_SETTINGS),
            vec![
                item("settings-general", "General", "/settings", any(&[SETTINGS_VIEW, SETTINGS_MANAGE])),
                item("settings-roles", "Roles & Permissions", "/settings/roles", any(&[ROLES_MANAGE])),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Principal;
    use crate::route::RouteAuthorizationMap;
    use crate::tree::TreeAuthorizationFilter;

    fn paths(forest: &[MenuNode]) -> Vec<String> {
        let mut out = Vec::new();
        for node in forest {
            if let Some(path) = &node.payload.path {
                out.push(path.clone());
            }
            out.extend(paths(&node.children));
        }
        out
    }

    #[test]
    fn test_menu_items_agree_with_route_table() {
        let routes = RouteAuthorizationMap::hr_default();
        fn walk(nodes: &[MenuNode], routes: &RouteAuthorizationMap) {
            for node in nodes {
                if let Some(path) = &node.payload.path {
                    assert_eq!(
                        &node.requirement,
                        routes.requirement_for(path),
                        "menu item {} disagrees with route table",
                        node.id
                    );
                }
                walk(&node.children, routes);
            }
        }
        walk(&hr_navigation(), routes);
    }

    #[test]
    fn test_employee_self_service_menu() {
        let employee = Principal::with_permissions([LEAVES_APPLY, ATTENDANCE_CLOCK]);
        let menu = TreeAuthorizationFilter::default()
            .filter(&employee, &hr_navigation())
            .unwrap();

        let ids: Vec<&str> = menu.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["dashboard", "attendance", "leaves"]);
        assert_eq!(
            paths(&menu),
            vec!["/dashboard", "/attendance/clock", "/leaves/apply"]
        );
    }

    #[test]
    fn test_module_group_with_no_visible_items_is_dropped() {
        // 持有 payroll 模块下的权限，但不足以看到任何菜单项
        let principal = Principal::with_permissions(["payroll.export"]);
        let menu = TreeAuthorizationFilter::default()
            .filter(&principal, &hr_navigation())
            .unwrap();
        assert!(menu.iter().all(|n| n.id != "payroll"));
    }

    #[test]
    fn test_menu_loads_from_json() {
        let json = r#"[
            {
                "id": "leaves",
                "requirement": { "kind": "module", "value": "leaves" },
                "payload": { "label": "Leaves" },
                "children": [
                    {
                        "id": "leave-apply",
                        "requirement": { "kind": "any_of", "value": ["leaves.apply"] },
                        "payload": { "label": "Apply", "path": "/leaves/apply" }
                    }
                ]
            }
        ]"#;
        let menu: Vec<MenuNode> = serde_json::from_str(json).unwrap();
        assert_eq!(menu[0].payload.path, None);
        assert!(menu[0].children[0].children.is_empty());

        let employee = Principal::with_permissions([LEAVES_APPLY]);
        let visible = TreeAuthorizationFilter::default()
            .filter(&employee, &menu)
            .unwrap();
        assert_eq!(paths(&visible), vec!["/leaves/apply"]);
    }
}
