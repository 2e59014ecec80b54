//! Mock business tool implementations.
//!
//! Three tools, one file each:
//! - check_order_status: order lookup with shipped flag and ETA
//! - initiate_refund: refund creation, optionally linked to an order
//! - open_ticket: support ticket creation
//!
//! The mocks simulate the responses of a real commerce backend:
//! identifiers are randomly generated unless derivable from the input.

pub mod order_status;
pub mod refund;
pub mod ticket;

use std::sync::LazyLock;

use regex::Regex;

use crate::types::SupportTool;

pub use order_status::MockOrderStatusTool;
pub use refund::MockRefundTool;
pub use ticket::MockTicketTool;

/// Order-id pattern the mock backends recognize: ORD + 3 or more digits.
static ORDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bORD\d{3,}\b").expect("valid order-id regex"));

/// Extract an order id from free text, if one is present.
pub(crate) fn extract_order_id(text: &str) -> Option<String> {
    ORDER_ID_RE
        .find(&text.to_uppercase())
        .map(|m| m.as_str().to_string())
}

/// The full default mock tool set.
pub fn all_tools() -> Vec<Box<dyn SupportTool>> {
    vec![
        Box::new(MockOrderStatusTool),
        Box::new(MockRefundTool),
        Box::new(MockTicketTool),
    ]
}
