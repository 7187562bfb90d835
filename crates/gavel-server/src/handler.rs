//! Request handler that routes requests to the replica service.

use gavel_wire::{
    ErrorCode, GetOutcomeResponse, PlaceBidResponse, Request, RequestPayload, Response,
    ResponsePayload, WireError,
};
use tracing::instrument;

use crate::error::{ServerError, ServerResult};
use crate::service::ReplicaService;

/// Handles requests by applying them to the replica's ledger.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    service: ReplicaService,
}

impl RequestHandler {
    pub fn new(service: ReplicaService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ReplicaService {
        &self.service
    }

    /// Handles a request and returns a response.
    #[instrument(skip_all, fields(request_id))]
    pub async fn handle(&self, request: Request) -> Response {
        let request_id = request.id;
        tracing::Span::current().record("request_id", request_id.0);

        match self.handle_inner(request.payload).await {
            Ok(payload) => Response::new(request_id, payload),
            Err(e) => {
                let (code, message) = error_to_wire(&e);
                Response::error(request_id, code, message)
            }
        }
    }

    #[instrument(skip_all, fields(op))]
    async fn handle_inner(&self, payload: RequestPayload) -> ServerResult<ResponsePayload> {
        match payload {
            RequestPayload::PlaceBid(req) => {
                tracing::Span::current().record("op", "place_bid");
                let (bidder, amount) = req.parts()?;
                let status = self.service.place_bid(bidder, amount).await;
                Ok(ResponsePayload::PlaceBid(PlaceBidResponse::from_status(status)))
            }
            RequestPayload::GetOutcome => {
                tracing::Span::current().record("op", "get_outcome");
                let outcome = self.service.outcome().await;
                Ok(ResponsePayload::GetOutcome(GetOutcomeResponse::from_outcome(
                    &outcome,
                )))
            }
        }
    }
}

fn error_to_wire(error: &ServerError) -> (ErrorCode, String) {
    match error {
        ServerError::Wire(WireError::InvalidField(_)) => {
            (ErrorCode::InvalidRequest, error.to_string())
        }
        _ => (ErrorCode::Internal, error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gavel_types::{Amount, BidderId, ReplicaId};
    use gavel_wire::{ErrorResponse, PlaceBidRequest, RequestId};

    use super::*;

    fn handler() -> RequestHandler {
        RequestHandler::new(ReplicaService::new(
            ReplicaId::new(0),
            Duration::from_secs(60),
        ))
    }

    fn place(id: u64, bidder: &str, amount: u64) -> Request {
        Request::new(
            RequestId(id),
            RequestPayload::PlaceBid(PlaceBidRequest {
                bidder: bidder.to_string(),
                amount,
            }),
        )
    }

    #[tokio::test]
    async fn place_bid_reports_status_text() {
        let handler = handler();

        let response = handler.handle(place(1, "alice", 10)).await;

        assert_eq!(response.request_id, RequestId(1));
        assert_eq!(
            response.payload,
            ResponsePayload::PlaceBid(PlaceBidResponse {
                status: "success".to_string()
            })
        );
    }

    #[tokio::test]
    async fn get_outcome_reports_running_maximum() {
        let handler = handler();
        handler.handle(place(1, "alice", 10)).await;
        handler.handle(place(2, "bob", 20)).await;

        let response = handler
            .handle(Request::new(RequestId(3), RequestPayload::GetOutcome))
            .await;

        assert_eq!(
            response.payload,
            ResponsePayload::GetOutcome(GetOutcomeResponse {
                highest_bid: 20,
                winner: String::new(),
            })
        );
    }

    #[tokio::test]
    async fn empty_bidder_is_an_invalid_request() {
        let handler = handler();

        let response = handler.handle(place(9, "", 10)).await;

        assert_eq!(response.request_id, RequestId(9));
        assert!(matches!(
            response.payload,
            ResponsePayload::Error(ErrorResponse {
                code: ErrorCode::InvalidRequest,
                ..
            })
        ));
        assert_eq!(
            handler.service().outcome().await.highest_bid,
            Amount::ZERO
        );
    }

    #[tokio::test]
    async fn closed_auction_reports_winner() {
        let handler = handler();
        handler.handle(place(1, "alice", 10)).await;
        handler.service().close().await;

        let response = handler.handle(place(2, "bob", 50)).await;
        assert_eq!(
            response.payload,
            ResponsePayload::PlaceBid(PlaceBidResponse {
                status: "fail - bidding is over".to_string()
            })
        );

        let outcome = handler.service().outcome().await;
        assert_eq!(outcome.winner, Some(BidderId::new("alice").unwrap()));
    }
}
