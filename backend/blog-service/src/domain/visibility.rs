use super::models::{Post, UserRole};

/// Which posts a viewer may see in listings.
///
/// Admins see every post; everyone else only sees posts whose `private`
/// flag is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    PublicOnly,
}

impl Visibility {
    pub fn for_role(role: UserRole) -> Self {
        if role.is_admin() {
            Visibility::All
        } else {
            Visibility::PublicOnly
        }
    }

    pub fn allows(&self, post: &Post) -> bool {
        match self {
            Visibility::All => true,
            Visibility::PublicOnly => !post.private,
        }
    }
}
