use crate::api::client::ApiClient;
use crate::core::error::ViewError;
use crate::models::user::User;
use std::fmt::Write;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
enum Load {
    Loading,
    Failed(String),
    Ready(Vec<User>),
}

/// Picker shown while nobody is logged in
pub struct ChooseUserView {
    api: ApiClient,
    state: Load,
}

impl ChooseUserView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Load::Loading,
        }
    }

    pub async fn mount(&mut self) {
        self.state = match self.api.list_users_public().await {
            Ok(users) => Load::Ready(users),
            Err(e) => {
                warn!(error = %e, "Failed to load users");
                Load::Failed("Failed to load users".to_string())
            }
        };
    }

    pub fn users(&self) -> &[User] {
        match &self.state {
            Load::Ready(users) => users,
            _ => &[],
        }
    }

    /// Pick a listed user to log in as
    pub fn select(&self, user_id: i64) -> Result<User, ViewError> {
        self.users()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(ViewError::UnknownUser(user_id))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== Choose a user ==");

        match &self.state {
            Load::Loading => {
                let _ = writeln!(out, "Loading users...");
            }
            Load::Failed(message) => {
                let _ = writeln!(out, "[error] {}", message);
            }
            Load::Ready(users) if users.is_empty() => {
                let _ = writeln!(out, "No users available");
            }
            Load::Ready(users) => {
                for user in users {
                    let _ = writeln!(out, "  #{}  {}  [{}]", user.id, user.name, user.role);
                }
                let _ = writeln!(out, "\nLog in with: login <id>");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::testing::MockBackend;

    #[tokio::test]
    async fn test_lists_users_with_roles() {
        let backend = MockBackend::start().await;
        let mut view = ChooseUserView::new(backend.client());
        assert!(view.render().contains("Loading users..."));

        view.mount().await;

        let text = view.render();
        assert!(text.contains("#1  Ada  [admin]"));
        assert!(text.contains("#3  Uma  [user]"));
        assert_eq!(view.select(2).unwrap(), User::new(2, "Olive", Role::Owner));
    }

    #[tokio::test]
    async fn test_select_unknown_user() {
        let backend = MockBackend::start().await;
        let mut view = ChooseUserView::new(backend.client());
        view.mount().await;

        assert!(matches!(view.select(42), Err(ViewError::UnknownUser(42))));
    }

    #[tokio::test]
    async fn test_load_failure() {
        let backend = MockBackend::start().await;
        backend.fail("GET /api/public/users");
        let mut view = ChooseUserView::new(backend.client());
        view.mount().await;

        assert!(view.render().contains("[error] Failed to load users"));
        assert!(view.select(1).is_err());
    }
}
