pub mod footer;
pub mod header;
pub mod transaction_form;
pub mod verdict;
