//! Receipt presentation.
//!
//! Engine receipts carry full-precision amounts. Everything in this module is
//! the presentation boundary: amounts are rounded half away from zero here and
//! nowhere else.

pub mod format;
pub mod view;

pub use format::{attachment_file_name, email_body, email_subject, format_amount, format_share};
pub use view::{BreakdownLineView, FundShareView, ReceiptView};
