//! Sheet source and writer traits

use crate::domain::{Result, RowUpdate, Sheet, SheetError, SheetId, SheetSummary};
use async_trait::async_trait;

/// Read access to the tracking sheets
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Every sheet the token can see (id and name only)
    async fn list_sheets(&self) -> Result<Vec<SheetSummary>>;

    /// Load a sheet with its columns and rows
    async fn load_sheet(&self, sheet_id: SheetId) -> Result<Sheet>;
}

/// Write access to the tracking sheets
#[async_trait]
pub trait SheetWriter: Send + Sync {
    /// Update cells of existing rows
    async fn update_rows(&self, sheet_id: SheetId, updates: Vec<RowUpdate>) -> Result<()>;
}

/// Find the id of the one sheet whose name matches `name`, ignoring case
///
/// # Errors
///
/// Fails when no sheet, or more than one sheet, matches.
pub async fn resolve_sheet_id(source: &dyn SheetSource, name: &str) -> Result<SheetId> {
    let wanted = name.to_lowercase();
    let matched: Vec<SheetSummary> = source
        .list_sheets()
        .await?
        .into_iter()
        .filter(|sheet| sheet.name.to_lowercase() == wanted)
        .collect();

    match matched.as_slice() {
        [sheet] => {
            tracing::debug!(sheet_id = %sheet.id, name = %sheet.name, "Resolved sheet by name");
            Ok(sheet.id)
        }
        [] => Err(SheetError::SheetNotFound(format!("no sheet named '{name}'")).into()),
        many => Err(SheetError::AmbiguousSheetName {
            name: name.to_string(),
            count: many.len(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSheets(Vec<SheetSummary>);

    #[async_trait]
    impl SheetSource for FixedSheets {
        async fn list_sheets(&self) -> Result<Vec<SheetSummary>> {
            Ok(self.0.clone())
        }

        async fn load_sheet(&self, sheet_id: SheetId) -> Result<Sheet> {
            Err(SheetError::SheetNotFound(sheet_id.to_string()).into())
        }
    }

    fn summary(id: u64, name: &str) -> SheetSummary {
        SheetSummary {
            id: SheetId::new(id),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolves_unique_case_insensitive_match() {
        let source = FixedSheets(vec![summary(1, "Vendors"), summary(2, "Vendors 2023")]);
        assert_eq!(
            resolve_sheet_id(&source, "vendors").await.unwrap(),
            SheetId::new(1)
        );
    }

    #[tokio::test]
    async fn test_no_match_fails() {
        let source = FixedSheets(vec![summary(1, "Vendors")]);
        let err = resolve_sheet_id(&source, "Suppliers").await.unwrap_err();
        assert!(err.to_string().contains("Suppliers"));
    }

    #[tokio::test]
    async fn test_ambiguous_match_fails() {
        let source = FixedSheets(vec![summary(1, "Vendors"), summary(2, "VENDORS")]);
        let err = resolve_sheet_id(&source, "Vendors").await.unwrap_err();
        assert!(err.to_string().contains("set --sheet-id instead"));
    }
}
