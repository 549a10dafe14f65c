//! Gene id → gene name translation of node tables.

use cellhier_core::errors::TableError;
use cellhier_core::models::TermRow;
use cellhier_core::types::collections::FxHashMap;

/// Rewrite every member list from node ids to names, preserving order.
///
/// Fails on the first member without an entry in `names`.
pub fn translate_members(
    rows: &[TermRow],
    names: &FxHashMap<String, String>,
) -> Result<Vec<TermRow>, TableError> {
    rows.iter()
        .map(|row| {
            let genes = row
                .genes
                .iter()
                .map(|id| {
                    names
                        .get(id)
                        .cloned()
                        .ok_or_else(|| TableError::UnknownMemberId {
                            term: row.name.clone(),
                            member: id.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TermRow {
                genes,
                ..row.clone()
            })
        })
        .collect()
}
