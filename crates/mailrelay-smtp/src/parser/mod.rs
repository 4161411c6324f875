//! SMTP reply parser.

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Parses an SMTP reply from its response lines.
///
/// Replies are single-line (`250 OK`) or multi-line, where every line but the
/// last uses `-` after the code (`250-First`, `250 Last`).
///
/// # Errors
///
/// Returns an error if the reply is empty, a line is malformed, or the
/// lines disagree on the reply code.
pub fn parse_reply(lines: &[String]) -> Result<Reply> {
    let first = lines
        .first()
        .ok_or_else(|| Error::Protocol("Empty reply".into()))?;

    let code = reply_code(first)?;
    let mut message = Vec::with_capacity(lines.len());

    for line in lines {
        if reply_code(line)? != code {
            return Err(Error::Protocol(format!("Reply code changed mid-reply: {line}")));
        }
        if line.len() == 3 {
            message.push(String::new());
            continue;
        }
        let text = line
            .get(4..)
            .ok_or_else(|| Error::Protocol(format!("Malformed reply line: {line}")))?;
        message.push(text.to_string());
    }

    Ok(Reply::new(code, message))
}

fn reply_code(line: &str) -> Result<ReplyCode> {
    let digits = line
        .get(0..3)
        .ok_or_else(|| Error::Protocol(format!("Reply too short: {line}")))?;
    digits
        .parse::<u16>()
        .map(ReplyCode::new)
        .map_err(|_| Error::Protocol(format!("Invalid reply code: {digits}")))
}

/// Returns true if `line` terminates a reply.
///
/// A bare three-digit code also ends a reply.
#[must_use]
pub fn is_last_reply_line(line: &str) -> bool {
    line.len() == 3 || (line.len() >= 4 && line.as_bytes()[3] == b' ')
}
