//! check_order_status — simulated order status lookup.

use async_trait::async_trait;
use chrono::{Days, Utc};
use rand::Rng;

use hl_protocol::{ToolResult, ToolStatus};

use crate::error::ToolCallResult;
use crate::tools::extract_order_id;
use crate::types::{SupportTool, ToolInput};

pub struct MockOrderStatusTool;

#[async_trait]
impl SupportTool for MockOrderStatusTool {
    fn name(&self) -> &str {
        "check_order_status"
    }

    fn description(&self) -> &str {
        "Look up the shipping status and ETA of an order"
    }

    /// If the input text carries an order id, use it; otherwise the mock
    /// invents one, like a backend keyed off the user's account would.
    async fn call(&self, input: &ToolInput) -> ToolCallResult<ToolResult> {
        let mut rng = rand::thread_rng();
        let order_id = extract_order_id(&input.text)
            .unwrap_or_else(|| format!("ORD{}", rng.gen_range(1000..=9999)));
        let shipped = rng.r#gen::<bool>();
        let eta = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(rng.gen_range(2..=7)))
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut res = ToolResult::new(self.name(), ToolStatus::Ok);
        res.message = Some(format!(
            "Order {} is {}.",
            order_id,
            if shipped { "shipped" } else { "processing" }
        ));
        res.order_id = Some(order_id);
        res.shipped = Some(shipped);
        res.estimated_delivery = Some(eta);
        Ok(res)
    }
}
