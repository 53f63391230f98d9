//! Background search dispatch.
//!
//! The UI loop must keep drawing while a request is in flight, so each
//! ticket runs on its own tokio task and the answer comes back over a
//! channel. Replies can arrive in any order; [`SearchController::complete`]
//! sorts out which one wins.
//!
//! [`SearchController::complete`]: crate::search::SearchController::complete

use std::sync::Arc;

use bestiary_api::{Error as ApiError, Monster};
use tokio::sync::mpsc;

use crate::search::{MonsterSearch, SearchTicket};

/// The answer to one dispatched ticket.
#[derive(Debug)]
pub struct SearchReply {
    pub ticket: SearchTicket,
    pub result: Result<Vec<Monster>, ApiError>,
}

/// Spawns searches and funnels their replies into one receiver.
#[derive(Clone)]
pub struct SearchWorker {
    service: Arc<dyn MonsterSearch>,
    reply_tx: mpsc::UnboundedSender<SearchReply>,
}

impl SearchWorker {
    /// Create a worker and the receiver its replies arrive on.
    pub fn new(service: Arc<dyn MonsterSearch>) -> (Self, mpsc::UnboundedReceiver<SearchReply>) {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        (Self { service, reply_tx }, reply_rx)
    }

    pub fn service(&self) -> &Arc<dyn MonsterSearch> {
        &self.service
    }

    /// Run `ticket` in the background. Must be called inside a tokio runtime.
    pub fn dispatch(&self, ticket: SearchTicket) {
        let service = Arc::clone(&self.service);
        let reply_tx = self.reply_tx.clone();

        tokio::spawn(async move {
            let result = service.search_monsters(ticket.query()).await;
            if reply_tx.send(SearchReply { ticket, result }).is_err() {
                tracing::debug!("search reply dropped: viewer has shut down");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchController, SearchOutcome};
    use crate::testing::{sample_goblin, MockSearch};

    #[tokio::test]
    async fn test_dispatch_delivers_reply() {
        let service = Arc::new(MockSearch::new(vec![sample_goblin()]));
        let (worker, mut replies) = SearchWorker::new(service);

        let mut controller = SearchController::default();
        controller.set_query("gob");
        worker.dispatch(controller.begin_search());

        let reply = replies.recv().await.unwrap();
        let outcome = controller.complete(reply.ticket, reply.result);

        assert_eq!(outcome, SearchOutcome::Applied(1));
        assert_eq!(controller.results()[0].name, "Goblin");
    }

    #[tokio::test]
    async fn test_latest_ticket_wins_regardless_of_arrival() {
        let service = Arc::new(MockSearch::new(vec![
            sample_goblin(),
            bestiary_api::Monster::new("Orc"),
        ]));
        let (worker, mut replies) = SearchWorker::new(service);

        let mut controller = SearchController::default();
        controller.set_query("gob");
        worker.dispatch(controller.begin_search());
        controller.set_query("orc");
        worker.dispatch(controller.begin_search());

        let mut outcomes = Vec::new();
        for _ in 0..2 {
            let reply = replies.recv().await.unwrap();
            outcomes.push(controller.complete(reply.ticket, reply.result));
        }

        assert!(outcomes.contains(&SearchOutcome::Applied(1)));
        assert_eq!(controller.results().len(), 1);
        assert_eq!(controller.results()[0].name, "Orc");
    }
}
