use std::fmt::Write;

/// Dismissable error/success text held by each view
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Notice {
    error: Option<String>,
    success: Option<String>,
}

impl Notice {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }

    pub fn render(&self, out: &mut String) {
        if let Some(error) = &self.error {
            let _ = writeln!(out, "[error] {}", error);
        }
        if let Some(success) = &self.success {
            let _ = writeln!(out, "[ok] {}", success);
        }
    }
}
