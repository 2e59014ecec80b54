//! open_ticket — simulated support ticket creation.

use async_trait::async_trait;
use rand::Rng;

use hl_protocol::{ToolResult, ToolStatus};

use crate::error::ToolCallResult;
use crate::types::{SupportTool, ToolInput};

pub struct MockTicketTool;

#[async_trait]
impl SupportTool for MockTicketTool {
    fn name(&self) -> &str {
        "open_ticket"
    }

    fn description(&self) -> &str {
        "Open a support ticket for a technical issue"
    }

    async fn call(&self, _input: &ToolInput) -> ToolCallResult<ToolResult> {
        let ticket_id = format!("TKT{}", rand::thread_rng().gen_range(100000..=999999));

        let mut res = ToolResult::new(self.name(), ToolStatus::Ok);
        res.message = Some(format!(
            "Ticket {ticket_id} created. Support will contact you within 24 hours."
        ));
        res.ticket_id = Some(ticket_id);
        Ok(res)
    }
}
