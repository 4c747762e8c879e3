use crate::domain::ticket::Ticket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail { reason: String },
}

pub struct PolicyGate {
    rejected_statuses: Vec<String>,
}

impl PolicyGate {
    pub fn new(rejected_statuses: Vec<String>) -> Self {
        Self { rejected_statuses }
    }

    pub fn evaluate(&self, ticket: &Ticket) -> Verdict {
        let Some(status) = ticket.status.as_deref() else {
            return Verdict::Pass;
        };

        // Exact string match: a "Closed" ticket is not rejected.
        if self.rejected_statuses.iter().any(|rejected| rejected == status) {
            Verdict::Fail {
                reason: format!(
                    "{} ticket {} has status: {}",
                    ticket.board, ticket.id, status
                ),
            }
        } else {
            Verdict::Pass
        }
    }
}
