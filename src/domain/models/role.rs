use serde::{Deserialize, Serialize};

/// Dashboard role. Each role has its own menu registry and URL prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Employee,
    Client,
}

/// Which of the two per-tenant visibility maps a role reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAudience {
    Client,
    Employee,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Employee, Role::Client];

    /// URL slug, also the first path segment of the role's dashboard
    pub fn slug(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Client => "client",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Employee => "Employee",
            Role::Client => "Client",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "🛡️",
            Role::Admin => "🏢",
            Role::Employee => "👷",
            Role::Client => "🤝",
        }
    }

    pub fn dashboard_path(&self) -> String {
        format!("/{}/dashboard", self.slug())
    }

    /// Visibility map this role is filtered by.
    /// Super-admin and admin always see their full registry.
    pub fn audience(&self) -> Option<MenuAudience> {
        match self {
            Role::SuperAdmin | Role::Admin => None,
            Role::Employee => Some(MenuAudience::Employee),
            Role::Client => Some(MenuAudience::Client),
        }
    }

    /// Roles allowed to change a tenant's module settings
    pub fn can_manage_modules(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    /// Role owning a pathname, from its first segment
    pub fn from_pathname(pathname: &str) -> Option<Role> {
        let first = pathname.trim_start_matches('/').split('/').next()?;
        first.parse().ok()
    }
}

impl MenuAudience {
    pub const ALL: [MenuAudience; 2] = [MenuAudience::Client, MenuAudience::Employee];

    /// Role whose dashboard this audience filters
    pub fn role(&self) -> Role {
        match self {
            MenuAudience::Client => Role::Client,
            MenuAudience::Employee => Role::Employee,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MenuAudience::Client => "Client menus",
            MenuAudience::Employee => "Employee menus",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super-admin" | "superadmin" | "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            "client" => Ok(Role::Client),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}
