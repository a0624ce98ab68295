//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use linkvault_core::Link;

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

    /// Print a single link
    pub fn print_link(&self, link: &Link) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", link.id);
                println!("Title:       {}", link.title);
                println!("URL:         {}", link.url);
                if let Some(host) = link.host() {
                    println!("Host:        {}", host);
                }
                println!("Category:    {}", link.category);
                match link.description {
                    Some(ref desc) => println!("Description: {}", desc),
                    None => println!("Description: (none, use `linkvault edit` to add one)"),
                }
                println!("Created:     {}", link.created_at.format("%b %-d, %Y %H:%M"));
            }
            OutputFormat::Json => print_json(link),
            OutputFormat::Quiet => {
                println!("{}", link.id);
            }
        }
    }

    /// Print a list of links
    ///
    /// `filtered` tells the human format which empty-state message to show.
    pub fn print_links(&self, links: &[&Link], filtered: bool) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    if filtered {
                        println!("No links found. Try adjusting your filters.");
                    } else {
                        println!("No links saved yet. Add one with `linkvault add <url> --title <title>`.");
                    }
                    return;
                }
                for link in links {
                    println!(
                        "{} | {} | {} | {}",
                        short_id(&link.id),
                        truncate(&link.title, 35),
                        truncate(&link.category, 13),
                        truncate(&link.url, 45)
                    );
                }
                println!("\n{} link(s)", links.len());
            }
            OutputFormat::Json => print_json(&links),
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print category badges with counts
    pub fn print_categories(&self, total: usize, counts: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if counts.is_empty() {
                    println!("No categories in use.");
                    return;
                }
                println!("All ({})", total);
                for (name, count) in counts {
                    println!("{} ({})", name, count);
                }
            }
            OutputFormat::Json => {
                let categories: Vec<_> = counts
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&serde_json::json!({"total": total, "categories": categories}));
            }
            OutputFormat::Quiet => {
                for (name, _) in counts {
                    println!("{}", name);
                }
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

    /// Print an error notification to stderr
    ///
    /// Shown in every format, quiet included.
    pub fn error(&self, message: &str, hint: Option<&str>) {
        match self.format {
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({"status": "error", "message": message, "hint": hint})
                );
            }
            OutputFormat::Human | OutputFormat::Quiet => {
                eprintln!("✗ {}", message);
                if let Some(hint) = hint {
                    eprintln!("  {}", hint);
                }
            }
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
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

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format JSON output: {}", e),
    }
}

/// First eight characters of an id, for compact listings
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
