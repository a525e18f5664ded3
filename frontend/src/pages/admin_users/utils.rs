use std::cmp::Ordering;

use crate::{
    api::{Role, User},
    utils::sort::SortDirection,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(StatusFilter::Active),
            "inactive" => Some(StatusFilter::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub status: Option<StatusFilter>,
    pub search: String,
}

impl UserFilter {
    pub fn is_active(&self) -> bool {
        self.role.is_some() || self.status.is_some() || !self.search.trim().is_empty()
    }

    pub fn matches(&self, user: &User) -> bool {
        let role_ok = self.role.map_or(true, |role| user.role == role);
        let status_ok = self
            .status
            .map_or(true, |status| user.active == (status == StatusFilter::Active));
        role_ok && status_ok && matches_search(user, &self.search)
    }
}

fn matches_search(user: &User, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [&user.first_name, &user.last_name, &user.email]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSortField {
    #[default]
    FirstName,
    LastName,
    Email,
    Role,
    CreatedAt,
}

impl UserSortField {
    pub const ALL: [UserSortField; 5] = [
        UserSortField::FirstName,
        UserSortField::LastName,
        UserSortField::Email,
        UserSortField::Role,
        UserSortField::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserSortField::FirstName => "firstName",
            UserSortField::LastName => "lastName",
            UserSortField::Email => "email",
            UserSortField::Role => "role",
            UserSortField::CreatedAt => "createdAt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserSortField::FirstName => "First Name",
            UserSortField::LastName => "Last Name",
            UserSortField::Email => "Email",
            UserSortField::Role => "Role",
            UserSortField::CreatedAt => "Date Created",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub total: usize,
    pub employees: usize,
    pub admins: usize,
    pub active: usize,
}

pub fn summarize(users: &[User]) -> UserSummary {
    users.iter().fold(
        UserSummary {
            total: users.len(),
            ..UserSummary::default()
        },
        |mut summary, user| {
            match user.role {
                Role::Employee => summary.employees += 1,
                Role::Admin => summary.admins += 1,
            }
            if user.active {
                summary.active += 1;
            }
            summary
        },
    )
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Text comparisons ignore case.
pub fn filter_and_sort(
    users: &[User],
    filter: &UserFilter,
    field: UserSortField,
    direction: SortDirection,
) -> Vec<User> {
    let mut visible: Vec<User> = users
        .iter()
        .filter(|user| filter.matches(user))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        let ordering = match field {
            UserSortField::FirstName => cmp_ignore_case(&a.first_name, &b.first_name),
            UserSortField::LastName => cmp_ignore_case(&a.last_name, &b.last_name),
            UserSortField::Email => cmp_ignore_case(&a.email, &b.email),
            UserSortField::Role => a.role.as_str().cmp(b.role.as_str()),
            UserSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        direction.apply(ordering)
    });
    visible
}

/// Balances are only meaningful for employees.
pub fn balance_summary(user: &User) -> Option<String> {
    (user.role == Role::Employee).then(|| {
        format!(
            "Annual: {} / Sick: {} / Casual: {}",
            user.annual_leave_balance.unwrap_or(0),
            user.sick_leave_balance.unwrap_or(0),
            user.casual_leave_balance.unwrap_or(0)
        )
    })
}

pub fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, regular_user};

    fn users() -> Vec<User> {
        let mut zed = regular_user();
        zed.id = 3;
        zed.first_name = "zed".into();
        zed.last_name = "Zimmer".into();
        zed.email = "zed@example.com".into();
        zed.active = false;
        vec![regular_user(), admin_user(), zed]
    }

    #[test]
    fn summary_counts_roles_and_activity() {
        let summary = summarize(&users());
        assert_eq!(
            summary,
            UserSummary {
                total: 3,
                employees: 2,
                admins: 1,
                active: 2
            }
        );
    }

    #[test]
    fn filters_combine_role_status_and_search() {
        let all = users();
        let filter = UserFilter {
            role: Some(Role::Employee),
            status: Some(StatusFilter::Inactive),
            search: String::new(),
        };
        let ids: Vec<_> = all.iter().filter(|u| filter.matches(u)).map(|u| u.id).collect();
        assert_eq!(ids, vec![3]);

        let search = UserFilter {
            search: "  ADA ".into(),
            ..UserFilter::default()
        };
        assert!(search.is_active());
        let ids: Vec<_> = all.iter().filter(|u| search.matches(u)).map(|u| u.id).collect();
        assert_eq!(ids, vec![1]);
        assert!(!UserFilter::default().is_active());
    }

    #[test]
    fn sorting_defaults_to_first_name_ignoring_case() {
        let sorted = filter_and_sort(
            &users(),
            &UserFilter::default(),
            UserSortField::default(),
            SortDirection::Asc,
        );
        let names: Vec<_> = sorted.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Emil", "zed"]);

        let sorted = filter_and_sort(
            &users(),
            &UserFilter::default(),
            UserSortField::Role,
            SortDirection::Desc,
        );
        assert_eq!(sorted[0].role, Role::Employee);
    }

    #[test]
    fn balances_hidden_for_admins() {
        assert_eq!(
            balance_summary(&regular_user()).as_deref(),
            Some("Annual: 25 / Sick: 10 / Casual: 5")
        );
        assert!(balance_summary(&admin_user()).is_none());
        assert_eq!(UserSortField::parse("email"), Some(UserSortField::Email));
        assert_eq!(StatusFilter::parse("archived"), None);
    }
}
