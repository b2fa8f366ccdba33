//! Pipes rendered output through an external pager.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

/// Runs `command` and writes `content` to its stdin, waiting for it to exit.
///
/// The command is split with shell quoting rules (`less -R "--prompt=a b"`),
/// without invoking a shell. Fails when the command cannot be parsed or the
/// pager cannot be started; callers fall back to stdout.
pub fn page(command: &str, content: &[u8]) -> Result<()> {
    let parts = shell_words::split(command)
        .with_context(|| format!("parse pager command '{command}'"))?;
    let Some((program, args)) = parts.split_first() else {
        bail!("empty pager command");
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("start pager '{command}'"))?;

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(content) {
            // The pager quit before reading everything.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
            other => other.context("write to pager")?,
        }
    }

    let status = child.wait().context("wait for pager")?;
    tracing::debug!(%status, pager = command, "pager exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_fails() {
        assert!(page("   ", b"x").is_err());
    }

    #[test]
    fn test_missing_program_fails() {
        let err = page("jut-no-such-pager-binary", b"x").unwrap_err();
        assert!(format!("{err:#}").contains("jut-no-such-pager-binary"));
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let err = page("less '-R", b"x").unwrap_err();
        assert!(format!("{err:#}").contains("parse pager command"));
    }

    #[cfg(unix)]
    #[test]
    fn test_content_reaches_pager() {
        page("cat", b"paged\n").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_quoted_arguments_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("paged output.txt");
        let command = format!("sh -c 'cat > \"$0\"' '{}'", out.display());

        page(&command, b"quoted\n").unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "quoted\n");
    }
}
