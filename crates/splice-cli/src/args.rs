//! Command-line argument definitions for the Splice CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments supply the template and its values, select a
//! configuration file and control logging verbosity.

use clap::Parser;

/// Command-line arguments for the Splice formatter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
pub struct Args {
    /// The template, or a path to it with `--file`
    #[arg(help = "Template text, or a template file path with --file")]
    pub template: String,

    /// Unnamed values, in order
    #[arg(help = "Values for `{}` and `{N}` placeholders")]
    pub values: Vec<String>,

    /// Named values for `{name}` placeholders
    #[arg(short, long = "named", value_name = "NAME=VALUE", value_parser = parse_named)]
    pub named: Vec<(String, String)>,

    /// Read the template from the file named by TEMPLATE
    #[arg(short, long)]
    pub file: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print unresolved placeholders as written instead of failing
    #[arg(short, long)]
    pub partial: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Splits a `NAME=VALUE` pair at the first `=`.
fn parse_named(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    if name.is_empty() {
        return Err(format!("missing name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        assert_eq!(
            parse_named("user=ada").unwrap(),
            ("user".to_string(), "ada".to_string())
        );
        assert_eq!(
            parse_named("eq=a=b").unwrap(),
            ("eq".to_string(), "a=b".to_string())
        );
        assert!(parse_named("novalue").is_err());
        assert!(parse_named("=1").is_err());
    }

    #[test]
    fn test_command_line() {
        let args = Args::try_parse_from([
            "splice", "{0} {1}", "1", "two", "--log-level", "off", "--partial",
        ])
        .unwrap();
        assert_eq!(args.template, "{0} {1}");
        assert_eq!(args.values, ["1", "two"]);
        assert!(args.partial);
        assert!(!args.file);

        let args = Args::try_parse_from(["splice", "{x}", "-n", "x=1", "--named", "y=2"]).unwrap();
        assert_eq!(args.named.len(), 2);
        assert_eq!(args.log_level, "warn");

        let args = Args::try_parse_from(["splice", "{}", "-7"]).unwrap();
        assert_eq!(args.values, ["-7"]);
    }
}
