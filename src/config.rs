use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::format::Grammar;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub check: bool,
    pub no_timestamps: bool,
    pub json: bool,
    pub quiet: bool,
    pub perf: bool,
    pub grammar: Option<Grammar>,
    pub width: Option<usize>,
    pub time_format: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches are OR-ed, valued options from
    /// `other` win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            check: self.check || other.check,
            no_timestamps: self.no_timestamps || other.no_timestamps,
            json: self.json || other.json,
            quiet: self.quiet || other.quiet,
            perf: self.perf || other.perf,
            grammar: other.grammar.or(self.grammar),
            width: other.width.or(self.width),
            time_format: other
                .time_format
                .clone()
                .or_else(|| self.time_format.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("notefmt").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("notefmt")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("notefmt").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("notefmt").join("config");
        }
    }

    PathBuf::from(".notefmtrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".notefmtrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_config_line)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

// `--time-format` values contain spaces, so only the first space separates
// a flag from its value.
fn split_config_line(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((flag, value)) if flag.starts_with("--") => {
            vec![flag.to_string(), value.trim().to_string()]
        }
        _ => vec![line.to_string()],
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# notefmt defaults (saved with --save)".to_string()];
    let switches = [
        (flags.watch, "--watch"),
        (flags.check, "--check"),
        (flags.no_timestamps, "--no-timestamps"),
        (flags.json, "--json"),
        (flags.quiet, "--quiet"),
        (flags.perf, "--perf"),
    ];
    lines.extend(
        switches
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, flag)| (*flag).to_string()),
    );
    if let Some(grammar) = flags.grammar {
        lines.push(format!("--grammar {}", grammar_name(grammar)));
    }
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(pattern) = &flags.time_format {
        lines.push(format!("--time-format {pattern}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list (CLI args or config file lines).
/// Unknown tokens such as file names are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if let Some(shorts) = short_switches(token) {
            for short in shorts.chars() {
                match short {
                    'w' => flags.watch = true,
                    'q' => flags.quiet = true,
                    _ => {}
                }
            }
            i += 1;
            continue;
        }
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        match name {
            "--watch" => flags.watch = true,
            "--check" => flags.check = true,
            "--no-timestamps" => flags.no_timestamps = true,
            "--json" => flags.json = true,
            "--quiet" => flags.quiet = true,
            "--perf" => flags.perf = true,
            "--grammar" | "--width" | "--time-format" | "--debug-log" => {
                let value = match inline {
                    Some(value) => Some(value),
                    None => {
                        i += 1;
                        tokens.get(i).map(String::as_str)
                    }
                };
                if let Some(value) = value {
                    apply_value(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

/// The letters of a short-switch token such as `-w` or `-wq`. Only tokens
/// made entirely of known short switches qualify.
fn short_switches(token: &str) -> Option<&str> {
    let shorts = token.strip_prefix('-')?;
    let known = !shorts.is_empty()
        && !shorts.starts_with('-')
        && shorts.chars().all(|c| matches!(c, 'w' | 'q'));
    known.then_some(shorts)
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--grammar" => flags.grammar = parse_grammar(value),
        "--width" => flags.width = value.parse().ok(),
        "--time-format" => flags.time_format = Some(value.to_string()),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_grammar(s: &str) -> Option<Grammar> {
    match s {
        "gfm" => Some(Grammar::Gfm),
        "commonmark" => Some(Grammar::Commonmark),
        _ => None,
    }
}

const fn grammar_name(grammar: Grammar) -> &'static str {
    match grammar {
        Grammar::Gfm => "gfm",
        Grammar::Commonmark => "commonmark",
    }
}
