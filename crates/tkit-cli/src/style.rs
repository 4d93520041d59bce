use colored::Colorize;
use tkit_diff::{HunkKind, TokenStyle};

/// ANSI terminal colours.
pub struct Terminal;

impl TokenStyle for Terminal {
    fn changed(&self, token: &str) -> String {
        token.yellow().bold().underline().to_string()
    }

    fn extra(&self, token: &str) -> String {
        token.magenta().to_string()
    }

    fn whole_line(&self, line: &str, kind: HunkKind) -> String {
        match kind {
            HunkKind::Delete => line.red().to_string(),
            HunkKind::Insert => line.green().to_string(),
            _ => line.to_owned(),
        }
    }

    fn header(&self, header: &str) -> String {
        header.cyan().bold().to_string()
    }
}
