//! Category display formatting

use crate::models::Category;
use crate::services::category::CategoryUsage;

/// Format categories with how many records use them
pub fn format_category_list(categories: &[(&Category, CategoryUsage)]) -> String {
    if categories.is_empty() {
        return "No categories.\n".to_string();
    }

    let name_width = categories
        .iter()
        .map(|(c, _)| c.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:12}  {:<name_width$}  {:7}  {:>8}  {:>7}\n",
        "ID",
        "Name",
        "Color",
        "Expenses",
        "Charges",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<7}  {:->8}  {:->7}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (category, usage) in categories {
        output.push_str(&format!(
            "{:12}  {:<name_width$}  {:7}  {:>8}  {:>7}\n",
            category.id.to_string(),
            category.name,
            category.color,
            usage.expenses,
            usage.charges,
            name_width = name_width,
        ));
    }

    output
}
