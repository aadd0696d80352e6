use crate::core::error::CommandError;
use crate::models::user::Role;
use crate::views::action::Action;
use std::path::PathBuf;

/// One interaction with the client
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Users,
    Login { user_id: i64, token: Option<String> },
    WhoAmI,
    Switch,
    Dashboard,
    Dismiss,
    Help,
    Shell,
    Act(Action),
}

/// Parsed process arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config: Option<PathBuf>,
    pub assume_yes: bool,
    pub command: Command,
}

pub const USAGE: &str = "\
Usage: roombook [--config <path>] [--yes] <command>

Commands:
  users                          list users available to log in as
  login <id> [token]             select the current user
  whoami                         show the current user
  switch                         forget the current user
  dashboard                      show the dashboard for the current role (default)
  booking create <start> <end>   create a booking for yourself
  booking delete <id>            delete a booking
  bookings-by-user <user-id>     show one user's bookings
  user create <name> [role]      create a user (role defaults to user)
  user delete <id>               delete a user and their bookings
  user role <id> <role>          change a user's role
  dismiss                        clear the current message
  shell                          read commands from stdin until 'exit'
  help                           show this text
";

/// Parse the process arguments (without the program name)
pub fn parse_args<I, S>(args: I) -> Result<Invocation, CommandError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut config = None;
    let mut assume_yes = false;
    let mut rest = Vec::new();

    let mut iter = args.into_iter().map(Into::into);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" if rest.is_empty() => {
                let path = iter.next().ok_or(CommandError::MissingArgument("config path"))?;
                config = Some(PathBuf::from(path));
            }
            "--yes" | "-y" if rest.is_empty() => assume_yes = true,
            _ => rest.push(arg),
        }
    }

    Ok(Invocation {
        config,
        assume_yes,
        command: parse_command(rest.as_slice())?,
    })
}

/// Parse a command from its words; no words means the dashboard
pub fn parse_command<S: AsRef<str>>(words: &[S]) -> Result<Command, CommandError> {
    let words: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();

    let command = match words.as_slice() {
        [] | ["dashboard"] => Command::Dashboard,
        ["users"] => Command::Users,
        ["whoami"] => Command::WhoAmI,
        ["switch"] => Command::Switch,
        ["dismiss"] => Command::Dismiss,
        ["help"] | ["--help"] | ["-h"] => Command::Help,
        ["shell"] => Command::Shell,

        ["login"] => return Err(CommandError::MissingArgument("user id")),
        ["login", id] => Command::Login {
            user_id: parse_id(id)?,
            token: None,
        },
        ["login", id, token] => Command::Login {
            user_id: parse_id(id)?,
            token: Some(token.to_string()),
        },

        ["booking", "create", start, end] => Command::Act(Action::CreateBooking {
            start_time: start.to_string(),
            end_time: end.to_string(),
        }),
        ["booking", "create", _, _, extra, ..] => return Err(unexpected(extra)),
        ["booking", "create", ..] => {
            return Err(CommandError::MissingArgument("start and end time"))
        }
        ["booking", "delete", id] => Command::Act(Action::DeleteBooking(parse_id(id)?)),
        ["booking", "delete", _, extra, ..] => return Err(unexpected(extra)),
        ["booking", "delete"] => return Err(CommandError::MissingArgument("booking id")),

        ["bookings-by-user", id] => Command::Act(Action::ViewUserBookings(parse_id(id)?)),
        ["bookings-by-user", _, extra, ..] => return Err(unexpected(extra)),
        ["bookings-by-user"] => return Err(CommandError::MissingArgument("user id")),

        ["user", "create", name] => Command::Act(Action::CreateUser {
            name: name.to_string(),
            role: Role::default(),
        }),
        ["user", "create", name, role] => Command::Act(Action::CreateUser {
            name: name.to_string(),
            role: role.parse::<Role>()?,
        }),
        ["user", "create", _, _, extra, ..] => return Err(unexpected(extra)),
        ["user", "create"] => return Err(CommandError::MissingArgument("user name")),
        ["user", "delete", id] => Command::Act(Action::DeleteUser(parse_id(id)?)),
        ["user", "delete", _, extra, ..] => return Err(unexpected(extra)),
        ["user", "delete"] => return Err(CommandError::MissingArgument("user id")),
        ["user", "role", id, role] => Command::Act(Action::ChangeRole {
            user_id: parse_id(id)?,
            role: role.parse::<Role>()?,
        }),
        ["user", "role", _, _, extra, ..] => return Err(unexpected(extra)),
        ["user", "role", ..] => return Err(CommandError::MissingArgument("user id and role")),

        [known, _, ..]
            if matches!(
                *known,
                "users" | "whoami" | "switch" | "dashboard" | "dismiss" | "help" | "shell" | "login"
            ) =>
        {
            return Err(CommandError::UnexpectedArgument(words[words.len() - 1].to_string()));
        }
        _ => return Err(CommandError::UnknownCommand(words.join(" "))),
    };

    Ok(command)
}

fn unexpected(word: &str) -> CommandError {
    CommandError::UnexpectedArgument(word.to_string())
}

fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}
