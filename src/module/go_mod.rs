//! go.mod discovery and parsing
//!
//! Only the directives needed to pick a toolchain are kept; the rest are
//! syntax-checked and skipped.
//!
//! Format examples:
//! - Single: `go 1.19`
//! - Block:
//!   ```text
//!   require (
//!       golang.org/x/text v0.14.0
//!   )
//!   ```

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::module::error::ModuleError;

/// Directives accepted at the top level of go.mod
const DIRECTIVES: &[&str] = &[
    "module",
    "go",
    "toolchain",
    "require",
    "replace",
    "exclude",
    "retract",
    "godebug",
    "tool",
    "ignore",
];

/// Parsed subset of a go.mod file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoMod {
    pub module: String,
    /// Value of the `go` directive, e.g. "1.19"
    pub go: Option<String>,
    /// Value of the `toolchain` directive, e.g. "go1.21.3"
    pub toolchain: Option<String>,
}

impl GoMod {
    /// Declared go version in catalog spelling, e.g. "go1.19"
    pub fn go_version(&self) -> Result<String, ModuleError> {
        self.go
            .as_ref()
            .map(|v| format!("go{v}"))
            .ok_or(ModuleError::MissingGoDirective)
    }
}

/// Parser for go.mod files
pub struct GoModParser {
    /// Regex for a directive line: `go 1.19`
    directive_re: Regex,
    /// Regex for block start: `require (`
    block_start_re: Regex,
    /// Regex for the value of the go directive
    go_version_re: Regex,
}

impl GoModParser {
    pub fn new() -> Self {
        Self {
            directive_re: Regex::new(r"^([a-z]+)(?:\s+(.+))?$").unwrap(),
            block_start_re: Regex::new(r"^([a-z]+)\s*\($").unwrap(),
            go_version_re: Regex::new(r"^[1-9][0-9]*\.(?:0|[1-9][0-9]*)(?:\.(?:0|[1-9][0-9]*))?(?:(?:rc|beta)[1-9][0-9]*)?$").unwrap(),
        }
    }

    pub fn parse(&self, content: &str) -> Result<GoMod, ModuleError> {
        let mut module = None;
        let mut go = None;
        let mut toolchain = None;
        let mut block_start = None;

        for (line_num, line) in content.lines().enumerate() {
            let line_no = line_num + 1;
            let trimmed = strip_comment(line).trim();

            if trimmed.is_empty() {
                continue;
            }

            // Block contents are not interpreted
            if block_start.is_some() {
                if trimmed == ")" {
                    block_start = None;
                }
                continue;
            }

            if let Some(caps) = self.block_start_re.captures(trimmed) {
                let directive = caps.get(1).unwrap().as_str();
                if !DIRECTIVES.contains(&directive) || matches!(directive, "module" | "go" | "toolchain") {
                    return Err(parse_error(line_no, format!("unexpected block: {directive}")));
                }
                block_start = Some(line_no);
                continue;
            }

            let Some(caps) = self.directive_re.captures(trimmed) else {
                return Err(parse_error(line_no, format!("unknown directive: {trimmed}")));
            };
            let directive = caps.get(1).unwrap().as_str();
            let Some(value) = caps.get(2).map(|m| m.as_str().trim()) else {
                return Err(parse_error(line_no, format!("usage: {directive} ...")));
            };

            match directive {
                "module" => {
                    if module.is_some() {
                        return Err(parse_error(line_no, "repeated module statement"));
                    }
                    module = Some(unquote(value).to_string());
                }
                "go" => {
                    if go.is_some() {
                        return Err(parse_error(line_no, "repeated go statement"));
                    }
                    if !self.go_version_re.is_match(value) {
                        return Err(parse_error(line_no, format!("invalid go version '{value}'")));
                    }
                    go = Some(value.to_string());
                }
                "toolchain" => {
                    if toolchain.is_some() {
                        return Err(parse_error(line_no, "repeated toolchain statement"));
                    }
                    toolchain = Some(value.to_string());
                }
                d if DIRECTIVES.contains(&d) => {}
                d => return Err(parse_error(line_no, format!("unknown directive: {d}"))),
            }
        }

        if let Some(line) = block_start {
            return Err(parse_error(line, "unterminated block"));
        }
        let Some(module) = module else {
            return Err(parse_error(0, "no module directive"));
        };

        Ok(GoMod {
            module,
            go,
            toolchain,
        })
    }
}

impl Default for GoModParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> ModuleError {
    ModuleError::Parse {
        line,
        message: message.into(),
    }
}

fn strip_comment(line: &str) -> &str {
    line.find("//").map_or(line, |pos| &line[..pos])
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Finds the nearest go.mod in `dir` or any of its parents
pub fn find_go_mod(dir: &Path) -> Result<PathBuf, ModuleError> {
    let start = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| ModuleError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .join(dir)
    };

    for ancestor in start.ancestors() {
        let candidate = ancestor.join("go.mod");
        if candidate.is_file() {
            debug!("Found {}", candidate.display());
            return Ok(candidate);
        }
    }

    Err(ModuleError::NotFound(dir.to_path_buf()))
}

/// Reads and parses the go.mod at `path`
pub async fn read_go_mod(path: &Path) -> Result<GoMod, ModuleError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ModuleError::NotFound(path.to_path_buf()),
            _ => ModuleError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

    GoModParser::new().parse(&content)
}
