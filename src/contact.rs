//! Reaching a vehicle owner through the desktop's URI handlers (`tel:`,
//! `mailto:`).

use anyhow::{Context, Result};
use std::process::Command;
use std::time::Duration;
use tokio::time::timeout;

use crate::catalog::Owner;

/// How long to wait for the opener to hand off the URI
const OPEN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
}

/// Build the URI for contacting an owner
pub fn owner_uri(owner: &Owner, kind: ContactKind) -> String {
    match kind {
        // Dialers want the bare number: keep digits and a leading '+'
        ContactKind::Phone => {
            let number: String = owner
                .phone
                .chars()
                .enumerate()
                .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
                .map(|(_, c)| c)
                .collect();
            format!("tel:{}", number)
        }
        ContactKind::Email => format!("mailto:{}", owner.email.trim()),
    }
}

/// Hand a URI to xdg-open (or `open` on macOS)
pub async fn open_uri(uri: &str) -> Result<()> {
    let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
    let uri = uri.to_string();

    let result = timeout(OPEN_TIMEOUT, tokio::task::spawn_blocking(move || {
        Command::new(opener).arg(&uri).output()
    }))
    .await;

    let output = match result {
        Ok(Ok(output)) => output.with_context(|| format!("Failed to run {}", opener))?,
        Ok(Err(e)) => anyhow::bail!("Task failed: {}", e),
        Err(_) => anyhow::bail!("{} timed out", opener),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} failed: {}", opener, stderr.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Owner {
        Owner {
            name: "John Smith".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            email: " john.smith@example.com ".to_string(),
            rating: 4.9,
            verified: true,
        }
    }

    #[test]
    fn test_owner_uris() {
        assert_eq!(owner_uri(&owner(), ContactKind::Phone), "tel:+15551234567");
        assert_eq!(owner_uri(&owner(), ContactKind::Email), "mailto:john.smith@example.com");
    }
}
