//! Static menu registries, one per dashboard role.
//!
//! Registries are built once and only ever borrowed; filtering produces new
//! trees and never touches these.

use once_cell::sync::Lazy;

use crate::domain::models::{MenuItem, Role};

/// Path of the admin page that edits tenant module settings
pub const MODULE_SETTINGS_PATH: &str = "/admin/settings/modules";

/// Module settings page under a manager's own area; `None` for roles that
/// may not edit module settings
pub fn module_settings_path(role: Role) -> Option<String> {
    role.can_manage_modules().then(|| format!("/{}/settings/modules", role.slug()))
}

static SUPER_ADMIN_MENU: Lazy<Vec<MenuItem>> = Lazy::new(super_admin_menu);
static ADMIN_MENU: Lazy<Vec<MenuItem>> = Lazy::new(admin_menu);
static EMPLOYEE_MENU: Lazy<Vec<MenuItem>> = Lazy::new(employee_menu);
static CLIENT_MENU: Lazy<Vec<MenuItem>> = Lazy::new(client_menu);

/// The unfiltered menu of a role
pub fn registry(role: Role) -> &'static [MenuItem] {
    match role {
        Role::SuperAdmin => &SUPER_ADMIN_MENU,
        Role::Admin => &ADMIN_MENU,
        Role::Employee => &EMPLOYEE_MENU,
        Role::Client => &CLIENT_MENU,
    }
}

fn super_admin_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("Dashboard", "📊", "/super-admin/dashboard"),
        MenuItem::leaf("Companies", "🏢", "/super-admin/companies"),
        MenuItem::leaf("Packages", "📦", "/super-admin/packages"),
        MenuItem::parent(
            "Billing",
            "💳",
            "/super-admin/billing",
            vec![
                MenuItem::leaf("Subscriptions", "🔁", "/super-admin/billing/subscriptions"),
                MenuItem::leaf("Invoices", "🧾", "/super-admin/billing/invoices"),
            ],
        ),
        MenuItem::parent(
            "Settings",
            "⚙️",
            "/super-admin/settings",
            vec![
                MenuItem::leaf("Platform", "🛠️", "/super-admin/settings/platform"),
                MenuItem::leaf("Modules", "🧩", "/super-admin/settings/modules"),
            ],
        ),
    ]
}

fn admin_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("Dashboard", "📊", "/admin/dashboard"),
        MenuItem::divider("CRM"),
        MenuItem::leaf("Leads", "🎯", "/admin/leads").in_section("CRM"),
        MenuItem::leaf("Clients", "🤝", "/admin/clients").in_section("CRM"),
        MenuItem::divider("Work"),
        MenuItem::parent(
            "Projects",
            "📁",
            "/admin/work",
            vec![
                MenuItem::leaf("Projects", "📁", "/admin/work/projects"),
                MenuItem::leaf("Tasks", "✅", "/admin/work/tasks"),
                MenuItem::leaf("Timesheets", "⏱️", "/admin/work/timesheets"),
            ],
        )
        .in_section("Work"),
        MenuItem::divider("Finance"),
        MenuItem::parent(
            "Finance",
            "💰",
            "/admin/finance",
            vec![
                MenuItem::leaf("Invoices", "🧾", "/admin/finance/invoices"),
                MenuItem::leaf("Payments", "💵", "/admin/finance/payments"),
                MenuItem::leaf("Estimates", "📝", "/admin/finance/estimates"),
                MenuItem::leaf("Expenses", "📉", "/admin/finance/expenses"),
            ],
        )
        .in_section("Finance"),
        MenuItem::divider("HR"),
        MenuItem::parent(
            "HR",
            "👥",
            "/admin/hr",
            vec![
                MenuItem::leaf("Employees", "🧑‍💼", "/admin/hr/employees"),
                MenuItem::leaf("Attendance", "🕘", "/admin/hr/attendance"),
                MenuItem::leaf("Leave", "🌴", "/admin/hr/leave"),
                MenuItem::leaf("Shifts", "🔄", "/admin/hr/shifts"),
            ],
        )
        .in_section("HR"),
        MenuItem::leaf("Messages", "💬", "/admin/messages"),
        MenuItem::parent(
            "Settings",
            "⚙️",
            "/admin/settings",
            vec![
                MenuItem::leaf("Company", "🏷️", "/admin/settings/company"),
                MenuItem::leaf("Modules", "🧩", MODULE_SETTINGS_PATH),
            ],
        ),
    ]
}

fn employee_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("Dashboard", "📊", "/employee/dashboard"),
        MenuItem::divider("Work"),
        MenuItem::parent(
            "My Work",
            "🗂️",
            "/employee/work",
            vec![
                MenuItem::leaf("Leads", "🎯", "/employee/work/leads").gated_by("module_leads"),
                MenuItem::leaf("Clients", "🤝", "/employee/work/clients").gated_by("module_clients"),
                MenuItem::leaf("Projects", "📁", "/employee/work/projects").gated_by("module_projects"),
                MenuItem::leaf("Tasks", "✅", "/employee/work/tasks").gated_by("module_tasks"),
                MenuItem::leaf("Timesheets", "⏱️", "/employee/work/timesheets")
                    .gated_by("module_timesheets"),
            ],
        )
        .in_section("Work"),
        MenuItem::divider("HR"),
        MenuItem::parent(
            "HR",
            "👥",
            "/employee/hr",
            vec![
                MenuItem::leaf("Attendance", "🕘", "/employee/hr/attendance").gated_by("module_attendance"),
                MenuItem::leaf("Leave", "🌴", "/employee/hr/leave").gated_by("module_leave"),
                MenuItem::leaf("Shifts", "🔄", "/employee/hr/shifts").gated_by("module_shifts"),
            ],
        )
        .in_section("HR"),
        MenuItem::leaf("Tickets", "🎫", "/employee/tickets").gated_by("module_tickets"),
        MenuItem::leaf("Messages", "💬", "/employee/messages").gated_by("module_messages"),
    ]
}

fn client_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("Dashboard", "📊", "/client/dashboard"),
        MenuItem::divider("Work"),
        MenuItem::leaf("Projects", "📁", "/client/projects")
            .in_section("Work")
            .gated_by("module_projects"),
        MenuItem::leaf("Tasks", "✅", "/client/tasks")
            .in_section("Work")
            .gated_by("module_tasks"),
        MenuItem::divider("Finance"),
        MenuItem::parent(
            "Finance",
            "💰",
            "/client/finance",
            vec![
                MenuItem::leaf("Invoices", "🧾", "/client/finance/invoices").gated_by("module_invoices"),
                MenuItem::leaf("Payments", "💵", "/client/finance/payments").gated_by("module_payments"),
                MenuItem::leaf("Estimates", "📝", "/client/finance/estimates").gated_by("module_estimates"),
            ],
        )
        .in_section("Finance"),
        MenuItem::leaf("Contracts", "📜", "/client/contracts")
            .in_section("Finance")
            .gated_by("module_contracts"),
        MenuItem::divider("Support"),
        MenuItem::leaf("Tickets", "🎫", "/client/tickets")
            .in_section("Support")
            .gated_by("module_tickets"),
        MenuItem::leaf("Messages", "💬", "/client/messages")
            .in_section("Support")
            .gated_by("module_messages"),
    ]
}

/// A node that cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryIssue {
    pub path: String,
    pub reason: &'static str,
}

/// Walk a tree and report every malformed node
pub fn validate_registry(tree: &[MenuItem]) -> Vec<RegistryIssue> {
    let mut issues = Vec::new();
    collect_issues(tree, &mut issues);
    issues
}

fn collect_issues(items: &[MenuItem], issues: &mut Vec<RegistryIssue>) {
    for item in items {
        if let Some(reason) = item.malformation() {
            issues.push(RegistryIssue {
                path: item.path.clone(),
                reason,
            });
        }
        collect_issues(item.children(), issues);
    }
}

/// Every module key referenced anywhere in a tree
pub fn module_keys(tree: &[MenuItem]) -> Vec<&str> {
    let mut keys = Vec::new();
    let mut stack: Vec<&MenuItem> = tree.iter().rev().collect();
    while let Some(item) = stack.pop() {
        if let Some(key) = item.module_key.as_deref() {
            keys.push(key);
        }
        stack.extend(item.children().iter().rev());
    }
    keys
}

/// First node, depth first, whose `path` equals `path`
pub fn find_by_path<'a>(tree: &'a [MenuItem], path: &str) -> Option<&'a MenuItem> {
    tree.iter().find_map(|item| {
        if !item.is_divider() && item.path == path {
            Some(item)
        } else {
            find_by_path(item.children(), path)
        }
    })
}

/// Label shown for a module key, taken from the first item it gates
pub fn module_label(tree: &[MenuItem], key: &str) -> Option<String> {
    tree.iter().find_map(|item| {
        if item.module_key.as_deref() == Some(key) {
            item.label.clone()
        } else {
            module_label(item.children(), key)
        }
    })
}
