use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use studio_core::{ContentType, ThemeType, Tone};

const PLAN_FILE: &str = "site.toml";

/// Escape a string for a TOML basic string.
///
/// The template is written by hand so its comments survive, which rules out
/// serializing through the toml crate.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn choices<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write a starter site.toml into `path`
pub fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    println!("Initializing site plan: {}", path.display());

    if !path.exists() {
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    let plan_path = path.join(PLAN_FILE);
    if plan_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            PLAN_FILE,
            plan_path.display()
        );
    }

    write_site_toml(&plan_path, name.as_deref())?;

    println!("✓ Created {}", plan_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Describe your site and its content in {}", PLAN_FILE);
    println!("  2. studio form {}", plan_path.display());
    Ok(())
}

fn write_site_toml(plan_path: &Path, name: Option<&str>) -> Result<()> {
    fs::write(plan_path, generate_site_toml(name))
        .with_context(|| format!("Failed to write {}", plan_path.display()))
}

fn generate_site_toml(name: Option<&str>) -> String {
    let site_name = toml_escape_string(name.unwrap_or("My Website"));
    let name_comment = if name.is_some() {
        ""
    } else {
        "  # TODO: Set site name"
    };
    let themes = choices(ThemeType::ALL);
    let content_types = choices(ContentType::ALL);
    let tones = choices(Tone::ALL);

    format!(
        "# Generated by studio init\n\
# Build it with: studio form {PLAN_FILE}\n\
\n\
[site]\n\
name = \"{site_name}\"{name_comment}\n\
description = \"What this website is about\"  # TODO: Describe the site\n\
theme = \"blog\"  # one of {themes}\n\
sections = [\"About\", \"Blog\"]\n\
\n\
# One [[content]] block per page to generate, in order.\n\
# type: {content_types}\n\
# tone: {tones}\n\
[[content]]\n\
type = \"Blog Post\"\n\
title = \"Welcome\"  # TODO: Set title\n\
requirements = \"A short welcome post introducing the site\"\n\
tone = \"Friendly\"\n\
\n\
[download]\n\
enabled = true\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::config::parse_site_plan_str;
    use tempfile::TempDir;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string("plain"), "plain");
        assert_eq!(toml_escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(toml_escape_string("a\\b"), "a\\\\b");
        assert_eq!(toml_escape_string("line\nbreak\t"), "line\\nbreak\\t");
    }

    #[test]
    fn test_template_parses_as_plan() {
        let plan = parse_site_plan_str(&generate_site_toml(None)).unwrap();
        assert_eq!(plan.site.site_name, "My Website");
        assert_eq!(plan.site.theme_type, ThemeType::Blog);
        assert_eq!(plan.site.main_sections, vec!["About", "Blog"]);
        assert_eq!(plan.content.len(), 1);
        assert_eq!(plan.content[0].content_type, ContentType::BlogPost);
        assert_eq!(plan.content[0].tone, Tone::Friendly);
        assert!(plan.download);
    }

    #[test]
    fn test_template_escapes_name() {
        let plan = parse_site_plan_str(&generate_site_toml(Some("Ann's \"Kitchen\"\nBlog"))).unwrap();
        assert_eq!(plan.site.site_name, "Ann's \"Kitchen\"\nBlog");
    }

    #[test]
    fn test_run_creates_directory_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("new-site");

        run(target.clone(), Some("Tea Notes".to_string())).unwrap();
        let written = fs::read_to_string(target.join(PLAN_FILE)).unwrap();
        assert!(written.contains("name = \"Tea Notes\"\n"));

        assert!(run(target, None).is_err());
    }
}
