use crate::models::user::User;

pub fn render(user: &User) -> String {
    format!(
        "Logged in as: {} ({})    [switch user: roombook switch]\n",
        user.name, user.role
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    #[test]
    fn test_topbar() {
        let line = render(&User::new(2, "Olive", Role::Owner));
        assert!(line.starts_with("Logged in as: Olive (owner)"));
        assert!(line.contains("switch"));
    }
}
