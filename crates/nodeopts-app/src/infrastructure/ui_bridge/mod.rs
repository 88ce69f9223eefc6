//! Command bridge: exposes options-model operations to a frontend.
//!
//! The `nodeopts` CLI is the current consumer; a GUI shell would call the
//! same functions.  Commands take the model by reference and return
//! `CommandResult<T>` rather than `Result<T, E>`, so every response has the
//! same shape: `{ success: bool, data: T | null, error: string | null }`.
//!
//! # Data Transfer Objects (DTOs)
//!
//! [`OptionDto`] and [`OptionsSummaryDto`] carry only JSON-friendly fields.
//! Option values serialize untagged, so a boolean row is `true`, an integer
//! row is `450` and a text row is `"de"`.

use nodeopts_core::{DisplayUnit, OptionId, SettingValue, ValueKind};
use serde::{Deserialize, Serialize};

use crate::application::options_model::OptionsModel;

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// DTO describing one option row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDto {
    pub row: usize,
    pub name: String,
    /// `"bool"`, `"int"` or `"text"`.
    pub kind: String,
    pub value: SettingValue,
    pub requires_restart: bool,
    pub applied_live: bool,
}

impl OptionDto {
    fn from_model(model: &OptionsModel, id: OptionId) -> Self {
        let kind = match id.kind() {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Text => "text",
        };
        Self {
            row: id.row(),
            name: id.name().to_string(),
            kind: kind.to_string(),
            value: model.option(id),
            requires_restart: id.requires_restart(),
            applied_live: id.is_applied_live(),
        }
    }
}

/// DTO for the whole options page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsSummaryDto {
    pub options: Vec<OptionDto>,
    pub restart_required: bool,
    /// Space-separated `-name=value` pairs that override stored settings.
    pub overridden_by_command_line: String,
}

/// Unified response wrapper used by bridge commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns every option row with the restart flag and override summary.
pub fn list_options(model: &OptionsModel) -> CommandResult<OptionsSummaryDto> {
    CommandResult::ok(summary(model))
}

/// Returns one option, addressed by name (`database_cache` or
/// `database-cache`).
pub fn get_option(model: &OptionsModel, name: &str) -> CommandResult<OptionDto> {
    match name.parse::<OptionId>() {
        Ok(id) => CommandResult::ok(OptionDto::from_model(model, id)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Parses `raw` for the named option and writes it.
///
/// The display unit accepts a unit name (`mBTC`) as well as its index, and
/// an empty network port resets it to the chain default.
pub fn update_option(model: &mut OptionsModel, name: &str, raw: &str) -> CommandResult<OptionDto> {
    let id = match name.parse::<OptionId>() {
        Ok(id) => id,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let value = match parse_value(id, raw) {
        Ok(value) => value,
        Err(e) => return CommandResult::err(format!("invalid value for {id}: {e}")),
    };
    if !model.set_option(id, value) {
        return CommandResult::err(format!("failed to apply {id}"));
    }
    CommandResult::ok(OptionDto::from_model(model, id))
}

/// Backs up and resets every setting, then reloads defaults.
pub fn reset_options(model: &mut OptionsModel) -> CommandResult<OptionsSummaryDto> {
    model.init(true);
    CommandResult::ok(summary(model))
}

fn summary(model: &OptionsModel) -> OptionsSummaryDto {
    OptionsSummaryDto {
        options: OptionId::ALL
            .iter()
            .map(|&id| OptionDto::from_model(model, id))
            .collect(),
        restart_required: model.is_restart_required(),
        overridden_by_command_line: model.overridden_by_command_line().trim_end().to_string(),
    }
}

fn parse_value(id: OptionId, raw: &str) -> Result<SettingValue, nodeopts_core::ParseError> {
    match id {
        OptionId::DisplayUnit => raw
            .parse::<DisplayUnit>()
            .map(|unit| SettingValue::Int(unit.index())),
        OptionId::NetworkPort if raw.trim().is_empty() => Ok(SettingValue::from("")),
        _ => SettingValue::parse_as(id.kind(), raw),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::options_model::OptionsBackends;
    use crate::infrastructure::autostart::mock::MemoryAutostart;
    use crate::infrastructure::node::mock::RecordingNode;
    use crate::infrastructure::storage::memory::MemoryStore;
    use nodeopts_core::{ArgsTable, Chain};

    /// Creates a model over in-memory backends so tests never touch the real
    /// settings store on disk.
    fn make_model(startup: MemoryAutostart) -> OptionsModel {
        let backends = OptionsBackends {
            store: Box::new(MemoryStore::new()),
            args: Box::new(ArgsTable::new()),
            node: Box::new(RecordingNode::new(Chain::Main, std::env::temp_dir())),
            startup: Box::new(startup),
        };
        OptionsModel::new(backends, "/home/user/.bitcoin", false).0
    }

    #[test]
    fn test_list_options_returns_every_row_in_order() {
        // Arrange
        let model = make_model(MemoryAutostart::new(false));

        // Act
        let result = list_options(&model);

        // Assert
        assert!(result.success);
        let summary = result.data.unwrap();
        assert_eq!(summary.options.len(), OptionId::COUNT);
        assert!(summary.options.iter().enumerate().all(|(i, o)| o.row == i));
        assert!(!summary.restart_required);
        assert_eq!(summary.overridden_by_command_line, "");
    }

    #[test]
    fn test_get_option_accepts_dashed_names() {
        // Arrange
        let model = make_model(MemoryAutostart::new(false));

        // Act
        let result = get_option(&model, "database-cache");

        // Assert
        assert!(result.success);
        let dto = result.data.unwrap();
        assert_eq!(dto.value, SettingValue::Int(450));
        assert_eq!(dto.kind, "int");
        assert!(dto.requires_restart);
    }

    #[test]
    fn test_get_option_unknown_name_fails() {
        let model = make_model(MemoryAutostart::new(false));
        let result = get_option(&model, "warp_drive");
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_update_option_parses_and_applies() {
        // Arrange
        let mut model = make_model(MemoryAutostart::new(false));

        // Act
        let result = update_option(&mut model, "listen", "false");

        // Assert
        assert!(result.success, "unexpected error: {:?}", result.error);
        assert_eq!(result.data.unwrap().value, SettingValue::Bool(false));
        assert!(model.is_restart_required());
    }

    #[test]
    fn test_update_option_accepts_unit_names() {
        let mut model = make_model(MemoryAutostart::new(false));
        let result = update_option(&mut model, "display_unit", "mBTC");
        assert!(result.success);
        assert_eq!(result.data.unwrap().value, SettingValue::Int(1));
    }

    #[test]
    fn test_update_option_rejects_unparseable_value() {
        let mut model = make_model(MemoryAutostart::new(false));
        let result = update_option(&mut model, "database_cache", "lots");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("database_cache"));
    }

    #[test]
    fn test_update_option_reports_failed_write() {
        // Arrange
        let mut model = make_model(MemoryAutostart::refusing());

        // Act
        let result = update_option(&mut model, "start_at_startup", "true");

        // Assert
        assert!(!result.success);
    }

    #[test]
    fn test_reset_options_restores_defaults() {
        // Arrange
        let mut model = make_model(MemoryAutostart::new(false));
        update_option(&mut model, "database_cache", "1000");

        // Act
        let result = reset_options(&mut model);

        // Assert
        let summary = result.data.unwrap();
        let cache = &summary.options[OptionId::DatabaseCache.row()];
        assert_eq!(cache.value, SettingValue::Int(450));
        assert!(!summary.restart_required);
    }

    #[test]
    fn test_option_dto_serializes_value_untagged() {
        let model = make_model(MemoryAutostart::new(false));
        let dto = get_option(&model, "language").data.unwrap();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["value"], serde_json::json!(""));
        assert_eq!(json["name"], serde_json::json!("language"));
    }

    #[test]
    fn test_command_result_err_sets_success_false() {
        let r: CommandResult<i32> = CommandResult::err("something went wrong");
        assert!(!r.success);
        assert!(r.data.is_none());
        assert_eq!(r.error.unwrap(), "something went wrong");
    }
}
