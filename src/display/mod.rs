//! Display formatting for terminal output

pub mod account;
pub mod category;
pub mod child;
pub mod expense;
pub mod report;

pub use account::format_account_list;
pub use category::format_category_list;
pub use child::{format_allowance_status, format_purchase_list};
pub use expense::{format_charge_list, format_expense_list};
