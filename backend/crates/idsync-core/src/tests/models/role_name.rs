use crate::RoleName;

use std::str::FromStr;

#[test]
fn test_role_name_as_str() {
    assert_eq!(RoleName::NormalUser.as_str(), "Normal User");
    assert_eq!(RoleName::Caregiver.as_str(), "Caregiver");
    assert_eq!(RoleName::Organization.as_str(), "Organization");
    assert_eq!(RoleName::Admin.as_str(), "Admin");
}

#[test]
fn test_role_name_from_str_ignores_case_and_padding() {
    assert_eq!(RoleName::from_str("admin").unwrap(), RoleName::Admin);
    assert_eq!(
        RoleName::from_str("  normal user ").unwrap(),
        RoleName::NormalUser
    );
    assert!(RoleName::from_str("Astronaut").is_err());
}

#[test]
fn test_role_name_default() {
    assert_eq!(RoleName::default(), RoleName::NormalUser);
}
