//! initiate_refund — simulated refund creation.

use async_trait::async_trait;
use rand::Rng;

use hl_protocol::{ToolResult, ToolStatus};

use crate::error::ToolCallResult;
use crate::tools::extract_order_id;
use crate::types::{SupportTool, ToolInput};

pub struct MockRefundTool;

#[async_trait]
impl SupportTool for MockRefundTool {
    fn name(&self) -> &str {
        "initiate_refund"
    }

    fn description(&self) -> &str {
        "Start a refund, linked to an order when one is identifiable"
    }

    /// A refund does not require an order id; when one is present in the
    /// text the refund is linked to it and the message says so.
    async fn call(&self, input: &ToolInput) -> ToolCallResult<ToolResult> {
        let refund_id = format!("RFD{}", rand::thread_rng().gen_range(10000..=99999));
        let order_id = extract_order_id(&input.text);

        let mut res = ToolResult::new(self.name(), ToolStatus::Ok);
        res.message = Some(match &order_id {
            Some(oid) => format!(
                "Refund {refund_id} initiated for {oid}. Funds should reflect in 5-7 business days."
            ),
            None => format!(
                "Refund {refund_id} initiated. Funds should reflect in 5-7 business days."
            ),
        });
        res.refund_id = Some(refund_id);
        res.order_id = order_id;
        Ok(res)
    }
}
