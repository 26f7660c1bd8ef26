//! HR 权限标识常量
//!
//! 权限标识格式为 `{module}.{action}`，模块前缀用于 [`crate::evaluator::can_access_module`]

// =============================================================================
// 模块前缀
// =============================================================================

pub const MODULE_EMPLOYEES: &str = "employees";
pub const MODULE_DEPARTMENTS: &str = "departments";
pub const MODULE_ATTENDANCE: &str = "attendance";
pub const MODULE_PAYROLL: &str = "payroll";
pub const MODULE_LEAVES: &str = "leaves";
pub const MODULE_RECRUITMENT: &str = "recruitment";
pub const MODULE_MESSAGING: &str = "messaging";
pub const MODULE_SETTINGS: &str = "settings";

// =============================================================================
// 员工
// =============================================================================

pub const EMPLOYEES_VIEW: &str = "employees.view";
pub const EMPLOYEES_CREATE: &str = "employees.create";
pub const EMPLOYEES_EDIT: &str = "employees.edit";
pub const EMPLOYEES_DELETE: &str = "employees.delete";

// =============================================================================
// 部门
// =============================================================================

pub const DEPARTMENTS_VIEW: &str = "departments.view";
pub const DEPARTMENTS_MANAGE: &str = "departments.manage";

// =============================================================================
// 考勤
// =============================================================================

pub const ATTENDANCE_VIEW: &str = "attendance.view";
pub const ATTENDANCE_CLOCK: &str = "attendance.clock";
pub const ATTENDANCE_MANAGE: &str = "attendance.manage";

// =============================================================================
// 薪资
// =============================================================================

pub const PAYROLL_VIEW: &str = "payroll.view";
pub const PAYROLL_PROCESS: &str = "payroll.process";
pub const PAYROLL_PAYSLIPS: &str = "payroll.payslips";

// =============================================================================
// 休假
// =============================================================================

pub const LEAVES_VIEW: &str = "leaves.view";
pub const LEAVES_APPLY: &str = "leaves.apply";
pub const LEAVES_APPROVE: &str = "leaves.approve";
pub const LEAVES_TYPES_MANAGE: &str = "leaves.types_manage";

// =============================================================================
// 招聘
// =============================================================================

pub const RECRUITMENT_VIEW: &str = "recruitment.view";
pub const RECRUITMENT_JOBS_MANAGE: &str = "recruitment.jobs_manage";
pub const RECRUITMENT_CANDIDATES_MANAGE: &str = "recruitment.candidates_manage";

// =============================================================================
// 消息
// =============================================================================

pub const MESSAGING_VIEW: &str = "messaging.view";
pub const MESSAGING_SEND: &str = "messaging.send";

// =============================================================================
// 系统设置
// =============================================================================

pub const SETTINGS_VIEW: &str = "settings.view";
pub const SETTINGS_MANAGE: &str = "settings.manage";
pub const ROLES_MANAGE: &str = "settings.roles_manage";
