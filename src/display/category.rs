//! Category display formatting

use crate::models::CategorySet;

fn code_width(categories: &CategorySet) -> usize {
    categories
        .iter()
        .map(|c| c.code.len())
        .max()
        .unwrap_or(4)
        .max(4)
}

/// Format category descriptions for the allocation prompt
///
/// With no code, every described category is listed; with a code, only that
/// one. Nothing about the allocation in progress changes.
pub fn format_category_descriptions(categories: &CategorySet, code: Option<&str>) -> String {
    if !categories.has_descriptions() {
        return "No category descriptions configured.\n".to_string();
    }

    let width = code_width(categories);

    match code {
        None => {
            let mut output = String::new();
            for category in categories.iter() {
                if let Some(description) = &category.description {
                    output.push_str(&format!("  {:width$}  {}\n", category.code, description));
                }
            }
            output
        }
        Some(code) if !categories.contains(code) => format!("Unknown category: {}\n", code),
        Some(code) => format!(
            "  {:width$}  {}\n",
            code,
            categories.description(code).unwrap_or("(no description)")
        ),
    }
}

/// Format the category set as a numbered list, in ledger column order
pub fn format_category_list(categories: &CategorySet) -> String {
    if !categories.is_initialized() {
        return "No categories configured.\n\nUse --alloc-columns or add alloc_columns to the config file."
            .to_string();
    }

    let width = code_width(categories);
    let mut output = format!("Categories ({}):\n", categories.len());

    for (i, category) in categories.iter().enumerate() {
        match &category.description {
            Some(description) => output.push_str(&format!(
                "  {:>2}. {:width$}  {}\n",
                i + 1,
                category.code,
                description
            )),
            None => output.push_str(&format!("  {:>2}. {}\n", i + 1, category.code)),
        }
    }

    output
}
