use std::io::{self, BufRead, Write};

/// Asks the operator before a destructive action
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Used with `--yes` or when `ui.confirm_deletes` is off
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Prompts on stderr and reads the answer from stdin
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N] ", prompt);
        let _ = stderr.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
pub(crate) struct Scripted {
    pub answer: bool,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl Scripted {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Confirm for Scripted {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }
}
