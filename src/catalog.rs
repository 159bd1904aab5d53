//! Catalog service holding the policy list and the admin directory
//!
//! The quoting core only reads the catalog. Writes are reserved for admins,
//! whose role is resolved by the caller's identity layer and passed in.
//! Credentials stay with that layer; the directory only records who is an admin.

use crate::error::CatalogError;
use crate::policy::Policy;
use log::info;
use serde::{Deserialize, Serialize};

/// Role of the calling user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Source of policy records
///
/// Implement this trait to back the catalog with another store.
pub trait PolicyCatalog {
    /// All policies in catalog order
    fn list_policies(&self) -> Vec<Policy>;

    /// Look up one policy by id
    fn get(&self, id: u32) -> Option<&Policy>;

    /// Add a policy and return its assigned id
    fn create(&mut self, role: Role, policy: Policy) -> Result<u32, CatalogError>;

    /// Replace the policy stored under `id`
    fn update(&mut self, role: Role, id: u32, policy: Policy) -> Result<(), CatalogError>;

    /// Remove the policy stored under `id`
    fn delete(&mut self, role: Role, id: u32) -> Result<Policy, CatalogError>;
}

fn require_admin(role: Role) -> Result<(), CatalogError> {
    if role.is_admin() {
        Ok(())
    } else {
        Err(CatalogError::Forbidden)
    }
}

/// Next free id after the highest one in use, starting at 1
fn next_id(ids: impl Iterator<Item = u32>) -> Result<u32, CatalogError> {
    match ids.max() {
        None => Ok(1),
        Some(id) => id.checked_add(1).ok_or(CatalogError::IdsExhausted),
    }
}

/// Catalog kept in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    policies: Vec<Policy>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already loaded records, validating each one
    pub fn from_policies(policies: Vec<Policy>) -> Result<Self, CatalogError> {
        for policy in &policies {
            policy.validate()?;
        }
        Ok(Self { policies })
    }

    /// Borrow the records without cloning
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    fn position(&self, id: u32) -> Result<usize, CatalogError> {
        self.policies
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}

impl PolicyCatalog for InMemoryCatalog {
    fn list_policies(&self) -> Vec<Policy> {
        self.policies.clone()
    }

    fn get(&self, id: u32) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id == id)
    }

    fn create(&mut self, role: Role, mut policy: Policy) -> Result<u32, CatalogError> {
        require_admin(role)?;
        policy.id = next_id(self.policies.iter().map(|p| p.id))?;
        policy.validate()?;

        let id = policy.id;
        info!("Policy {} ({}) added", id, policy.name);
        self.policies.push(policy);
        Ok(id)
    }

    fn update(&mut self, role: Role, id: u32, mut policy: Policy) -> Result<(), CatalogError> {
        require_admin(role)?;
        let idx = self.position(id)?;
        policy.id = id;
        policy.validate()?;

        info!("Policy {} updated", id);
        self.policies[idx] = policy;
        Ok(())
    }

    fn delete(&mut self, role: Role, id: u32) -> Result<Policy, CatalogError> {
        require_admin(role)?;
        let idx = self.position(id)?;

        info!("Policy {} deleted", id);
        Ok(self.policies.remove(idx))
    }
}

/// A user holding the admin role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: u32,
    pub username: String,
    pub email: String,
}

/// Admin accounts known to the console, in creation order
#[derive(Debug, Clone, Default)]
pub struct AdminDirectory {
    admins: Vec<AdminAccount>,
}

impl AdminDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new admin and return its id
    ///
    /// Username and email must be non-empty and unique; the email needs an `@`.
    pub fn add_admin(
        &mut self,
        role: Role,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<u32, CatalogError> {
        require_admin(role)?;

        let username = username.into().trim().to_string();
        let email = email.into().trim().to_string();
        if username.is_empty() {
            return Err(CatalogError::invalid_account("username must not be empty"));
        }
        if !email.contains('@') {
            return Err(CatalogError::invalid_account(format!("{:?} is not an email address", email)));
        }
        if self.admins.iter().any(|a| a.username == username) {
            return Err(CatalogError::invalid_account(format!("username {:?} is taken", username)));
        }
        if self.admins.iter().any(|a| a.email.eq_ignore_ascii_case(&email)) {
            return Err(CatalogError::invalid_account(format!("email {:?} is taken", email)));
        }

        let id = next_id(self.admins.iter().map(|a| a.id))?;
        info!("Admin {} ({}) added", id, username);
        self.admins.push(AdminAccount { id, username, email });
        Ok(id)
    }

    /// All admin accounts, visible to admins only
    pub fn list_admins(&self, role: Role) -> Result<Vec<AdminAccount>, CatalogError> {
        require_admin(role)?;
        Ok(self.admins.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RateTable;

    fn seeded() -> InMemoryCatalog {
        InMemoryCatalog::from_policies(vec![
            Policy::new(1, "Jeevan Labh", 8, 59),
            Policy::new(4, "Tech Term", 18, 65),
        ])
        .unwrap()
    }

    #[test]
    fn test_create_assigns_next_id() {
        let mut catalog = seeded();
        let id = catalog
            .create(Role::Admin, Policy::new(0, "Bima Jyoti", 18, 60))
            .unwrap();
        assert_eq!(id, 5);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.list_policies()[2].name, "Bima Jyoti");

        let mut empty = InMemoryCatalog::new();
        assert_eq!(empty.create(Role::Admin, Policy::new(9, "First", 0, 10)).unwrap(), 1);
    }

    #[test]
    fn test_mutation_requires_admin() {
        let mut catalog = seeded();
        assert!(matches!(
            catalog.create(Role::User, Policy::new(0, "Bima Jyoti", 18, 60)),
            Err(CatalogError::Forbidden)
        ));
        assert!(matches!(
            catalog.update(Role::User, 1, Policy::new(1, "Renamed", 8, 59)),
            Err(CatalogError::Forbidden)
        ));
        assert!(matches!(catalog.delete(Role::User, 1), Err(CatalogError::Forbidden)));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_update_keeps_id_and_order() {
        let mut catalog = seeded();
        let table = RateTable::new([(10, 45.0)]).unwrap();
        let edited = Policy::new(99, "Jeevan Labh Plus", 8, 59).with_rate_table(table);
        catalog.update(Role::Admin, 1, edited).unwrap();

        let first = &catalog.policies()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.name, "Jeevan Labh Plus");
        assert!(first.has_calculator());
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let mut catalog = seeded();
        assert!(matches!(
            catalog.update(Role::Admin, 42, Policy::new(42, "Ghost", 0, 10)),
            Err(CatalogError::NotFound(42))
        ));
        assert!(matches!(catalog.delete(Role::Admin, 42), Err(CatalogError::NotFound(42))));
    }

    #[test]
    fn test_delete() {
        let mut catalog = seeded();
        let removed = catalog.delete(Role::Admin, 1).unwrap();
        assert_eq!(removed.name, "Jeevan Labh");
        assert!(catalog.get(1).is_none());
        assert!(catalog.get(4).is_some());
    }

    #[test]
    fn test_writes_are_validated() {
        let mut catalog = seeded();
        assert!(matches!(
            catalog.create(Role::Admin, Policy::new(0, "", 18, 60)),
            Err(CatalogError::InvalidPolicy(_))
        ));
        assert!(matches!(
            catalog.update(Role::Admin, 4, Policy::new(4, "Tech Term", 70, 65)),
            Err(CatalogError::InvalidPolicy(_))
        ));
        assert_eq!(catalog.get(4).map(|p| p.max_age), Some(65));
    }

    #[test]
    fn test_create_fails_when_ids_run_out() {
        let mut catalog =
            InMemoryCatalog::from_policies(vec![Policy::new(u32::MAX, "Max", 0, 10)]).unwrap();
        assert!(matches!(
            catalog.create(Role::Admin, Policy::new(0, "Overflow", 0, 10)),
            Err(CatalogError::IdsExhausted)
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_admin_directory_requires_admin() {
        let mut directory = AdminDirectory::new();
        assert!(matches!(
            directory.add_admin(Role::User, "meera", "meera@example.com"),
            Err(CatalogError::Forbidden)
        ));
        assert!(matches!(directory.list_admins(Role::User), Err(CatalogError::Forbidden)));
    }

    #[test]
    fn test_admin_directory_listing() {
        let mut directory = AdminDirectory::new();
        assert_eq!(directory.add_admin(Role::Admin, "meera", "meera@example.com").unwrap(), 1);
        assert_eq!(directory.add_admin(Role::Admin, " rohit ", "rohit@example.com").unwrap(), 2);

        let admins = directory.list_admins(Role::Admin).unwrap();
        assert_eq!(
            admins.iter().map(|a| a.username.as_str()).collect::<Vec<_>>(),
            vec!["meera", "rohit"]
        );
        assert_eq!(admins[1].id, 2);
    }

    #[test]
    fn test_admin_directory_rejects_bad_accounts() {
        let mut directory = AdminDirectory::new();
        directory.add_admin(Role::Admin, "meera", "meera@example.com").unwrap();

        for (username, email) in [
            ("", "x@example.com"),
            ("asha", "not-an-email"),
            ("meera", "other@example.com"),
            ("asha", "MEERA@example.com"),
        ] {
            assert!(
                matches!(
                    directory.add_admin(Role::Admin, username, email),
                    Err(CatalogError::InvalidAccount(_))
                ),
                "{} / {}",
                username,
                email
            );
        }
        assert_eq!(directory.list_admins(Role::Admin).unwrap().len(), 1);
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(Role::default(), Role::User);
    }
}
