//! POP3 command serialization.

/// A command the client can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// USER - name the mailbox
    User(String),
    /// PASS - supply the password
    Pass(String),
    /// STAT - message count and mailbox size
    Stat,
    /// RETR - fetch one message by index (1-based)
    Retr(usize),
    /// QUIT - end the session
    Quit,
}

impl Command {
    /// Serializes the command, including the trailing CRLF.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let line = match self {
            Self::User(name) => format!("USER {name}\r\n"),
            Self::Pass(password) => format!("PASS {password}\r\n"),
            Self::Stat => "STAT\r\n".to_string(),
            Self::Retr(index) => format!("RETR {index}\r\n"),
            Self::Quit => "QUIT\r\n".to_string(),
        };
        line.into_bytes()
    }

    /// Returns a form of the command that is safe to log.
    #[must_use]
    pub fn redacted(&self) -> String {
        match self {
            Self::Pass(_) => "PASS ****".to_string(),
            other => String::from_utf8_lossy(&other.serialize())
                .trim_end()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_commands() {
        assert_eq!(Command::User("me".into()).serialize(), b"USER me\r\n");
        assert_eq!(Command::Pass("pw".into()).serialize(), b"PASS pw\r\n");
        assert_eq!(Command::Stat.serialize(), b"STAT\r\n");
        assert_eq!(Command::Retr(3).serialize(), b"RETR 3\r\n");
        assert_eq!(Command::Quit.serialize(), b"QUIT\r\n");
    }

    #[test]
    fn redacts_password() {
        assert_eq!(Command::Pass("hunter2".into()).redacted(), "PASS ****");
        assert_eq!(Command::Retr(1).redacted(), "RETR 1");
    }
}
