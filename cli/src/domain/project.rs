//! Validation of the service's own project files.
//!
//! Every function takes file contents as text and returns a verdict, so the
//! same rules serve `doctor`, `init` and log-path resolution.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Settings sections the service refuses to start without.
pub const REQUIRED_SETTINGS_SECTIONS: &[&str] = &["bot", "sync", "database", "logging"];

/// Fields every role mapping entry must carry.
pub const REQUIRED_MAPPING_FIELDS: &[&str] = &[
    "id",
    "source_server_id",
    "source_role_id",
    "target_server_id",
    "target_role_id",
];

/// `bot.main_server_id` shipped in the settings template.
pub const PLACEHOLDER_SERVER_ID: u64 = 123_456_789_012_345_678;

/// Ids shipped in the role mapping template.
pub const PLACEHOLDER_MAPPING_IDS: &[u64] = &[
    123_456_789_012_345_678,
    987_654_321_098_765_432,
    111_222_333_444_555_666,
    777_888_999_000_111_222,
];

// ── Snowflakes ───────────────────────────────────────────────────────────────

/// A Discord id: 17 to 20 ASCII digits.
#[must_use]
pub fn is_valid_snowflake(id: &str) -> bool {
    (17..=20).contains(&id.len()) && id.bytes().all(|b| b.is_ascii_digit())
}

/// Render a JSON number or string id as text. Other shapes yield `None`.
fn json_id(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => n.as_u64().map(|n| n.to_string()),
        _ => None,
    }
}

fn yaml_id(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => n.as_u64().map(|n| n.to_string()),
        _ => None,
    }
}

fn is_placeholder(id: &str, placeholders: &[u64]) -> bool {
    id.parse::<u64>().is_ok_and(|n| placeholders.contains(&n))
}

// ── Environment file ─────────────────────────────────────────────────────────

/// State of the bot token in the environment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    /// Variable absent or empty.
    Missing,
    /// Still carries the template value.
    Placeholder,
    Set,
}

/// Result of inspecting the environment file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvFileReport {
    pub token: TokenState,
    /// Lines dotenv could not parse, reported verbatim.
    pub parse_error: Option<String>,
}

/// Inspect dotenv `content` for `token_var`.
///
/// Values are judged after dotenv substitution: `$VAR` and `${VAR}` expand
/// from earlier lines, then from the launcher's environment, and undefined
/// names expand to nothing. Single-quoted values are taken literally, which
/// is how a token containing `$` must be written.
#[must_use]
pub fn inspect_env_file(content: &str, token_var: &str, placeholder: &str) -> EnvFileReport {
    let mut token = TokenState::Missing;
    let mut parse_error = None;
    for item in dotenvy::from_read_iter(content.as_bytes()) {
        match item {
            Ok((key, value)) if key == token_var => {
                token = if value.trim().is_empty() {
                    TokenState::Missing
                } else if !placeholder.is_empty() && value.contains(placeholder) {
                    TokenState::Placeholder
                } else {
                    TokenState::Set
                };
            }
            Ok(_) => {}
            Err(e) => {
                parse_error = Some(e.to_string());
                break;
            }
        }
    }
    EnvFileReport { token, parse_error }
}

// ── Settings file ────────────────────────────────────────────────────────────

/// Result of inspecting the service settings YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsReport {
    pub main_server_id: Option<String>,
    pub problems: Vec<String>,
}

/// Inspect settings YAML `content`.
///
/// # Errors
///
/// Returns the parser message when `content` is not YAML.
pub fn inspect_settings(content: &str) -> Result<SettingsReport, String> {
    let doc: YamlValue = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let mut report = SettingsReport::default();

    let Some(root) = doc.as_mapping() else {
        report.problems.push("settings root must be a mapping".to_string());
        return Ok(report);
    };

    for section in REQUIRED_SETTINGS_SECTIONS {
        if !root.contains_key(*section) {
            report.problems.push(format!("missing section '{section}'"));
        }
    }

    if let Some(bot) = root.get("bot") {
        match bot.get("main_server_id").and_then(yaml_id) {
            None => report.problems.push("bot.main_server_id is not set".to_string()),
            Some(id) if is_placeholder(&id, &[PLACEHOLDER_SERVER_ID]) => {
                report
                    .problems
                    .push("bot.main_server_id still uses the template value".to_string());
            }
            Some(id) if !is_valid_snowflake(&id) => {
                report
                    .problems
                    .push(format!("bot.main_server_id '{id}' is not a Discord id"));
            }
            Some(id) => report.main_server_id = Some(id),
        }
    }

    Ok(report)
}

/// `logging.file_path` from settings YAML, if present.
#[must_use]
pub fn settings_log_path(content: &str) -> Option<String> {
    let doc: YamlValue = serde_yaml::from_str(content).ok()?;
    doc.get("logging")?
        .get("file_path")?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

// ── Role mappings ────────────────────────────────────────────────────────────

/// Result of inspecting the role mapping JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingsReport {
    pub total: usize,
    pub enabled: usize,
    /// Violations that stop the service from using the file.
    pub problems: Vec<String>,
    /// Conditions worth fixing that do not block startup.
    pub warnings: Vec<String>,
}

/// Inspect role mapping JSON `content`.
///
/// # Errors
///
/// Returns the parser message when `content` is not JSON.
pub fn inspect_mappings(content: &str) -> Result<MappingsReport, String> {
    let doc: JsonValue = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let mut report = MappingsReport::default();

    let Some(entries) = doc.get("mappings").and_then(JsonValue::as_array) else {
        report
            .problems
            .push("missing 'mappings' array".to_string());
        return Ok(report);
    };

    report.total = entries.len();
    if entries.is_empty() {
        report
            .warnings
            .push("no role mappings configured; add at least one".to_string());
        return Ok(report);
    }

    let mut seen = HashSet::new();
    let mut uses_placeholders = false;

    for (i, entry) in entries.iter().enumerate() {
        let n = i + 1;
        let missing: Vec<&str> = REQUIRED_MAPPING_FIELDS
            .iter()
            .copied()
            .filter(|f| entry.get(f).is_none())
            .collect();
        if !missing.is_empty() {
            report
                .problems
                .push(format!("mapping #{n}: missing fields {}", missing.join(", ")));
            continue;
        }

        match entry.get("id").and_then(JsonValue::as_str) {
            Some(id) if !seen.insert(id.to_owned()) => {
                report.problems.push(format!("mapping #{n}: duplicate id '{id}'"));
            }
            Some(_) => {}
            None => report
                .problems
                .push(format!("mapping #{n}: 'id' must be a string")),
        }

        for field in &REQUIRED_MAPPING_FIELDS[1..] {
            match entry.get(field).and_then(json_id) {
                Some(id) if is_placeholder(&id, PLACEHOLDER_MAPPING_IDS) => {
                    uses_placeholders = true;
                }
                Some(id) if is_valid_snowflake(&id) => {}
                _ => report
                    .problems
                    .push(format!("mapping #{n}: {field} is not a Discord id")),
            }
        }

        if entry
            .get("enabled")
            .and_then(JsonValue::as_bool)
            .unwrap_or(true)
        {
            report.enabled += 1;
        }
    }

    if uses_placeholders {
        report.warnings.push(format!(
            "{} mappings found, but some use template ids; replace them with ids from your servers",
            report.total
        ));
    }
    if report.enabled == 0 {
        report.warnings.push("all role mappings are disabled".to_string());
    }

    Ok(report)
}

/// Contents `init` writes when no mapping file exists.
#[must_use]
pub fn default_mappings_document() -> JsonValue {
    serde_json::json!({
        "mappings": [
            {
                "id": "example_mapping",
                "source_server_id": "000000000000000000",
                "source_role_id": "111111111111111111",
                "target_server_id": "222222222222222222",
                "target_role_id": "333333333333333333",
                "description": "Example role mapping",
                "enabled": false
            }
        ]
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
