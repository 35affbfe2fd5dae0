//! List experiments in the catalog.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use abkit_catalog::Catalog;

/// List arguments.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show active experiments
    #[arg(long)]
    pub active: bool,
}

/// Run the list command.
pub fn run(root: &Path, args: ListArgs) -> Result<()> {
    let catalog = Catalog::open(root)?;
    let rows = catalog.list(args.active);

    if rows.is_empty() {
        println!("No experiments found");
        return Ok(());
    }

    println!(
        "{:<8} {:<32} {:<12} {:<12} {:<8}",
        "ID", "DESCRIPTION", "START", "END", "ACTIVE"
    );
    println!("{}", "─".repeat(76));
    for row in rows {
        println!(
            "{:<8} {:<32} {:<12} {:<12} {:<8}",
            row.id,
            truncate_str(&row.description, 32),
            row.start_date.to_string(),
            row.end_date.to_string(),
            row.is_active
        );
    }

    Ok(())
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_str_leaves_short_strings_alone() {
        assert_eq!(truncate_str("short", 32), "short");
    }

    #[test]
    fn truncate_str_shortens_long_strings_with_ellipsis() {
        let truncated = truncate_str("a very long experiment description indeed", 16);
        assert_eq!(truncated.chars().count(), 16);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_str_cuts_multibyte_strings_on_char_boundaries() {
        let truncated = truncate_str("ααααααααα", 8);
        assert_eq!(truncated, "ααααα...");
    }

    #[test]
    fn truncate_str_keeps_multibyte_strings_within_limit() {
        assert_eq!(truncate_str("αβγ", 8), "αβγ");
    }
}
