use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::settings::Result;
use crate::settings::SettingsError;

/// Reads the variables defined in a `.env` file.
///
/// A missing file yields no variables. Later definitions of a name replace
/// earlier ones.
pub(crate) fn read(path: &Path) -> Result<HashMap<String, String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(error) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                error,
            });
        }
    };

    parse(&content).map_err(|(line, message)| SettingsError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

fn parse(content: &str) -> std::result::Result<HashMap<String, String>, (usize, String)> {
    let mut vars = HashMap::new();

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((name, value)) = line.split_once('=') else {
            return Err((line_number, String::from("expected `NAME=VALUE`")));
        };

        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err((line_number, format!("invalid variable name `{name}`")));
        }

        let value = unquote(value.trim()).map_err(|message| (line_number, message))?;
        vars.insert(name.to_owned(), value);
    }

    Ok(vars)
}

fn unquote(value: &str) -> std::result::Result<String, String> {
    let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        // Unquoted values end at an inline comment.
        let value = match value.find(" #") {
            Some(idx) => &value[..idx],
            None => value,
        };
        return Ok(value.trim_end().to_owned());
    };

    let inner = &value[1..];
    let Some(end) = inner.rfind(quote) else {
        return Err(String::from("unterminated quoted value"));
    };

    let rest = inner[end + 1..].trim_start();
    if !rest.is_empty() && !rest.starts_with('#') {
        return Err(String::from("unexpected characters after the quoted value"));
    }

    let inner = &inner[..end];
    if quote == '"' {
        Ok(inner.replace("\\n", "\n").replace("\\\"", "\""))
    } else {
        Ok(inner.to_owned())
    }
}
