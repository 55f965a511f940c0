//! Account display formatting

use crate::models::{Account, Household};

/// Format accounts with their owner and how many expenses were paid from them
pub fn format_account_list(accounts: &[(&Account, usize)], household: &Household) -> String {
    if accounts.is_empty() {
        return "No accounts.\n".to_string();
    }

    let owner_label = |account: &Account| match account.owner.partner() {
        Some(role) => household.partner(role).name.clone(),
        None => "Joint".to_string(),
    };

    let name_width = accounts
        .iter()
        .map(|(a, _)| a.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let owner_width = accounts
        .iter()
        .map(|(a, _)| owner_label(*a).len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:12}  {:<name_width$}  {:<owner_width$}  {:>8}\n",
        "ID",
        "Name",
        "Owner",
        "Expenses",
        name_width = name_width,
        owner_width = owner_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<owner_width$}  {:->8}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
        owner_width = owner_width,
    ));

    for (account, expenses) in accounts {
        output.push_str(&format!(
            "{:12}  {:<name_width$}  {:<owner_width$}  {:>8}\n",
            account.id.to_string(),
            account.name,
            owner_label(*account),
            expenses,
            name_width = name_width,
            owner_width = owner_width,
        ));
    }

    output
}
