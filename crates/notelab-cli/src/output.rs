//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::{DateTime, Utc};
use notelab_core::{Identity, SyncStatus};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the account and sync status
    pub fn print_status(&self, identity: &Identity, status: &SyncStatus) {
        match self.format {
            OutputFormat::Human => {
                println!("NoteLab Status");
                println!("==============");
                println!();
                println!("Account:");
                if identity.is_logged_in {
                    println!(
                        "  Signed in as {}",
                        identity
                            .email
                            .as_deref()
                            .or(identity.id.as_deref())
                            .unwrap_or("(unknown)")
                    );
                } else {
                    println!("  Not signed in");
                }
                println!();
                println!("Sync:");
                println!("  Status:    {}", status.label());
                println!("  Phase:     {}", status.phase);
                println!("  Last sync: {}", format_last_sync(status.last_sync));
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "identity": identity,
                        "status": status,
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", status.label());
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Render a last-sync time for humans
pub fn format_last_sync(last_sync: Option<DateTime<Utc>>) -> String {
    match last_sync {
        Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "never".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_format_last_sync() {
        assert_eq!(format_last_sync(None), "never");

        let at = Utc.with_ymd_and_hms(2026, 10, 1, 9, 5, 0).unwrap();
        assert_eq!(format_last_sync(Some(at)), "2026-10-01 09:05 UTC");
    }
}
