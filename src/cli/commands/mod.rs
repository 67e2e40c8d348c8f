//! CLI command implementations

pub mod bulk_import;
pub mod init;
pub mod normalize;
pub mod sync;
pub mod validate;

use crate::config::{apply_env_overrides, parse_config, VendorSyncConfig};
use crate::domain::{Result, SheetId, VendorSyncError};
use clap::Args;

/// Sheet selection flags shared by the commands that read the sheet
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SheetSelection {
    /// ID of the sheet to use (overrides the configured sheet)
    #[arg(long)]
    pub sheet_id: Option<SheetId>,

    /// Name of the sheet to use, matched case-insensitively
    #[arg(long, conflicts_with = "sheet_id")]
    pub sheet_name: Option<String>,
}

impl SheetSelection {
    /// Apply the flags on top of the configured sheet
    pub fn apply(&self, config: &mut VendorSyncConfig) {
        if let Some(sheet_id) = self.sheet_id {
            tracing::info!(sheet_id = %sheet_id, "Overriding sheet id from CLI");
            config.sheet.sheet_id = Some(sheet_id);
        } else if let Some(name) = &self.sheet_name {
            tracing::info!(sheet_name = %name, "Overriding sheet name from CLI");
            config.sheet.sheet_id = None;
            config.sheet.sheet_name = Some(name.clone());
        }
    }
}

/// Load the configuration with CLI flags applied before validation
pub fn load_with_selection(
    config_path: &str,
    selection: &SheetSelection,
) -> Result<VendorSyncConfig> {
    let mut config = parse_config(config_path)?;
    apply_env_overrides(&mut config);
    selection.apply(&mut config);

    config.validate().map_err(|e| {
        VendorSyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_id_flag_wins() {
        let mut config = VendorSyncConfig::default();
        config.sheet.sheet_name = Some("Vendors".to_string());

        let selection = SheetSelection {
            sheet_id: Some(SheetId::new(42)),
            sheet_name: None,
        };
        selection.apply(&mut config);

        assert_eq!(config.sheet.sheet_id, Some(SheetId::new(42)));
    }

    #[test]
    fn test_sheet_name_flag_replaces_configured_id() {
        let mut config = VendorSyncConfig::default();
        config.sheet.sheet_id = Some(SheetId::new(7));

        let selection = SheetSelection {
            sheet_id: None,
            sheet_name: Some("Suppliers".to_string()),
        };
        selection.apply(&mut config);

        assert_eq!(config.sheet.sheet_id, None);
        assert_eq!(config.sheet.sheet_name.as_deref(), Some("Suppliers"));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = VendorSyncConfig::default();
        config.sheet.sheet_id = Some(SheetId::new(7));

        SheetSelection::default().apply(&mut config);

        assert_eq!(config.sheet.sheet_id, Some(SheetId::new(7)));
    }
}
