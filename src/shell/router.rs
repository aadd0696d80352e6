use crate::api::client::ApiClient;
use crate::session::store::{Session, SessionStore};
use crate::shell::command::{Command, USAGE};
use crate::views::chooser::ChooseUserView;
use crate::views::confirm::Confirm;
use crate::views::{topbar, RoleView};
use anyhow::Result;
use tracing::{debug, info};

/// Mounts the view that matches the session and feeds it commands
pub struct Router {
    api: ApiClient,
    store: SessionStore,
    session: Option<Session>,
    mounted: Option<RoleView>,
    confirm: Box<dyn Confirm>,
}

impl Router {
    /// Restores whichever user was selected by a previous invocation
    pub fn new(api: ApiClient, store: SessionStore, confirm: Box<dyn Confirm>) -> Result<Self> {
        let session = store.load()?;

        if let Some(session) = &session {
            debug!(
                user_id = session.user.id,
                role = %session.user.role,
                "Restored session"
            );
        }

        Ok(Self {
            api,
            store,
            session,
            mounted: None,
            confirm,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn mounted(&self) -> Option<&RoleView> {
        self.mounted.as_ref()
    }

    /// Run one command and return what the screen shows afterwards.
    /// Action failures are part of the rendered output; only session file I/O errors are returned.
    pub async fn handle(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Help | Command::Shell => Ok(USAGE.to_string()),
            Command::Users => Ok(self.chooser(None).await),
            Command::Login { user_id, token } => self.login(user_id, token).await,
            Command::Switch => {
                self.store.clear()?;
                self.session = None;
                self.mounted = None;
                Ok(self.chooser(None).await)
            }
            Command::WhoAmI => match &self.session {
                Some(session) => Ok(topbar::render(&session.user)),
                None => Ok("Not logged in\n".to_string()),
            },
            Command::Dashboard => self.with_view(|_| {}).await,
            Command::Dismiss => self.with_view(|view| view.notice_mut().dismiss()).await,
            Command::Act(action) => {
                let Some(session) = self.session.clone() else {
                    return Ok(self.chooser(Some("Select a user first")).await);
                };
                self.ensure_mounted(&session).await;

                if let Some(view) = self.mounted.as_mut() {
                    view.dispatch(action, self.confirm.as_mut()).await;
                }
                Ok(self.screen(&session))
            }
        }
    }

    async fn login(&mut self, user_id: i64, token: Option<String>) -> Result<String> {
        let mut chooser = ChooseUserView::new(self.api.clone());
        chooser.mount().await;

        let user = match chooser.select(user_id) {
            Ok(user) => user,
            Err(e) => return Ok(format!("{}[error] {}\n", chooser.render(), e)),
        };

        let mut session = Session::new(user);
        session.token = token;
        self.store.save(&session)?;

        info!(user_id = session.user.id, role = %session.user.role, "Logged in");

        self.session = Some(session.clone());
        self.mounted = None;
        self.ensure_mounted(&session).await;
        Ok(self.screen(&session))
    }

    async fn with_view<F>(&mut self, f: F) -> Result<String>
    where
        F: FnOnce(&mut RoleView),
    {
        let Some(session) = self.session.clone() else {
            return Ok(self.chooser(None).await);
        };

        self.ensure_mounted(&session).await;
        if let Some(view) = self.mounted.as_mut() {
            f(view);
        }
        Ok(self.screen(&session))
    }

    async fn ensure_mounted(&mut self, session: &Session) {
        let current = self.mounted.as_ref().map(RoleView::role);
        if current == Some(session.user.role) {
            return;
        }

        let mut view = RoleView::for_role(session.user.role, self.api.identify(session));
        view.mount().await;
        self.mounted = Some(view);
    }

    async fn chooser(&self, message: Option<&str>) -> String {
        let mut chooser = ChooseUserView::new(self.api.clone());
        chooser.mount().await;

        let mut out = String::new();
        if let Some(message) = message {
            out.push_str(message);
            out.push('\n');
        }
        out.push_str(&chooser.render());
        out
    }

    fn screen(&self, session: &Session) -> String {
        let mut out = topbar::render(&session.user);
        out.push('\n');
        if let Some(view) = &self.mounted {
            out.push_str(&view.render());
        }
        out
    }
}
