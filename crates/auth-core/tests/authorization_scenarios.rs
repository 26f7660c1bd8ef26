//! 鉴权场景测试

use hrm_auth_core::{
    AuthorizableNode, AuthorizationGate, GateDecision, PermissionRequirement, Principal,
    RouteAuthorizationMap, TreeAuthorizationFilter, has_any_permission, has_permission,
    satisfies,
};

fn single(p: &str) -> PermissionRequirement {
    PermissionRequirement::Single(p.to_string())
}

fn filter(principal: &Principal, forest: &[AuthorizableNode]) -> Vec<AuthorizableNode> {
    TreeAuthorizationFilter::default()
        .filter(principal, forest)
        .expect("well-formed tree")
}

fn group_g_with_item_x() -> Vec<AuthorizableNode> {
    vec![
        AuthorizableNode::bare("group", single("g"))
            .with_children(vec![AuthorizableNode::bare("item-x", single("x"))]),
    ]
}

#[test]
fn test_single_permission_is_satisfied() {
    let principal = Principal::with_permissions(["employees.view"]);
    assert!(satisfies(&principal, &single("employees.view")));
    assert_eq!(
        has_permission(&principal, "employees.view"),
        satisfies(&principal, &single("employees.view"))
    );
}

#[test]
fn test_any_of_without_overlap_is_denied() {
    let principal = Principal::with_permissions(["employees.view"]);
    let requirement =
        PermissionRequirement::any_of(["employees.create", "employees.edit"]).unwrap();
    assert!(!satisfies(&principal, &requirement));
    assert!(!has_any_permission(
        &principal,
        &["employees.create", "employees.edit"]
    ));
}

#[test]
fn test_group_keeps_permitted_items() {
    let forest = vec![
        AuthorizableNode::bare("group", PermissionRequirement::None).with_children(vec![
            AuthorizableNode::bare("item-a", single("a")),
            AuthorizableNode::bare("item-b", single("b")),
        ]),
    ];
    let filtered = filter(&Principal::with_permissions(["a"]), &forest);

    let expected = vec![
        AuthorizableNode::bare("group", PermissionRequirement::None)
            .with_children(vec![AuthorizableNode::bare("item-a", single("a"))]),
    ];
    assert_eq!(filtered, expected);
}

#[test]
fn test_denied_group_discards_subtree() {
    let filtered = filter(&Principal::anonymous(), &group_g_with_item_x());
    assert!(filtered.is_empty());
}

#[test]
fn test_group_pruned_to_empty_is_dropped() {
    let filtered = filter(&Principal::with_permissions(["g"]), &group_g_with_item_x());
    assert!(filtered.is_empty());
}

#[test]
fn test_deny_is_not_overridden_by_children() {
    // 子节点单独可见，但父节点被拒绝
    let filtered = filter(&Principal::with_permissions(["x"]), &group_g_with_item_x());
    assert!(filtered.is_empty());
}

#[test]
fn test_leaf_with_satisfied_requirement_always_appears() {
    let forest = vec![AuthorizableNode::bare("profile", single("g"))];
    let filtered = filter(&Principal::with_permissions(["g"]), &forest);
    assert_eq!(filtered, forest);
    assert!(filtered[0].children.is_empty());
}

#[test]
fn test_filter_does_not_mutate_input_and_is_idempotent() {
    let forest = vec![
        AuthorizableNode::bare("root", PermissionRequirement::None).with_children(vec![
            AuthorizableNode::bare("a", single("a")).with_children(vec![
                AuthorizableNode::bare("a1", single("a1")),
                AuthorizableNode::bare("a2", single("a2")),
            ]),
            AuthorizableNode::bare("b", single("b")),
        ]),
    ];
    let snapshot = forest.clone();
    let principal = Principal::with_permissions(["a", "a2"]);

    let once = filter(&principal, &forest);
    assert_eq!(forest, snapshot);

    let twice = filter(&principal, &once);
    assert_eq!(once, twice);

    // 第二次调用结果一致
    assert_eq!(filter(&principal, &forest), once);
}

#[test]
fn test_unmapped_route_is_authorized_for_anyone() {
    let map = RouteAuthorizationMap::hr_default();
    assert_eq!(
        map.requirement_for("/dashboard/blank"),
        &PermissionRequirement::None
    );
    for principal in [
        Principal::anonymous(),
        Principal::with_permissions(["leaves.apply"]),
        Principal::super_admin(),
    ] {
        assert!(map.is_authorized(&principal, "/dashboard/blank"));
    }
}

#[test]
fn test_gate_and_route_agree() {
    let map = RouteAuthorizationMap::hr_default();
    let principal = Principal::with_permissions(["payroll.view"]);
    for route in ["/payroll", "/payroll/run", "/leaves", "/nowhere"] {
        let decision = AuthorizationGate::evaluate(&principal, map.requirement_for(route));
        assert_eq!(
            decision == GateDecision::Allowed,
            map.is_authorized(&principal, route),
            "route {route}"
        );
    }
}

#[test]
fn test_menu_json_round_trips_through_filter() {
    let json = r#"[
        {
            "id": "people",
            "requirement": { "kind": "module", "value": "employees" },
            "payload": { "label": "People" },
            "children": [
                {
                    "id": "employees",
                    "requirement": { "kind": "any_of", "value": ["employees.view"] },
                    "payload": { "label": "Employees", "path": "/employees" }
                }
            ]
        }
    ]"#;
    let menu: Vec<hrm_auth_core::MenuNode> = serde_json::from_str(json).unwrap();

    let visible = TreeAuthorizationFilter::default()
        .filter(&Principal::with_permissions(["employees.view"]), &menu)
        .unwrap();
    assert_eq!(visible, menu);

    let hidden = TreeAuthorizationFilter::default()
        .filter(&Principal::with_permissions(["employees.export"]), &menu)
        .unwrap();
    assert!(hidden.is_empty());
}
