//! Catalog command presentation.

use super::shared::{to_pretty_json, truncate};
use crate::catalog::CatalogPage;
use crate::error::ApiError;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

const DESCRIPTION_WIDTH: usize = 60;

pub fn format_catalog_text(page: &CatalogPage) -> String {
    if page.items.is_empty() {
        return format!("No apps match (0 of {}).", page.total);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Category", "Description"]);
    for item in &page.items {
        table.add_row(vec![
            item.id.to_string(),
            item.name.clone(),
            item.category.to_string(),
            truncate(&item.description, DESCRIPTION_WIDTH),
        ]);
    }
    format!(
        "{}\nShowing {} of {} apps",
        table, page.filtered, page.total
    )
}

pub fn format_catalog_json(page: &CatalogPage) -> Result<String, ApiError> {
    to_pretty_json(page)
}
