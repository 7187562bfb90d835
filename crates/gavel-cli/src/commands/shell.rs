//! Line-oriented bidding shell.
//!
//! Understands two commands, `bid <amount>` and `result`. Anything else is
//! ignored.

use std::fmt::{self, Display};

use anyhow::{Context, Result};
use gavel_router::{ReplicaHandle, Router, RouterError};
use gavel_types::{Amount, BidStatus, BidderId, Outcome};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::style::{print_error, print_info, print_success, print_warn};

/// A parsed shell command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Bid(Amount),
    Result,
}

/// Input that looked like a command but could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("usage: bid <amount>")]
    MissingAmount,

    #[error("bid is not a number: {0:?}")]
    InvalidAmount(String),
}

/// Parses one input line. Returns `None` for input the shell ignores.
pub fn parse_line(line: &str) -> Option<Result<ShellCommand, InputError>> {
    let mut words = line.split_whitespace();
    match words.next()? {
        "bid" => Some(match words.next() {
            None => Err(InputError::MissingAmount),
            Some(word) => word
                .parse::<u64>()
                .map(|amount| ShellCommand::Bid(Amount::new(amount)))
                .map_err(|_| InputError::InvalidAmount(word.to_string())),
        }),
        "result" => Some(Ok(ShellCommand::Result)),
        _ => None,
    }
}

/// What the shell tells the user after one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Bid { amount: Amount, status: BidStatus },
    Outcome(Outcome),
    Invalid(InputError),
    Rejected(String),
    Unavailable,
}

impl Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Bid { amount, status } => write!(f, "bid {amount}: {status}"),
            Reply::Outcome(outcome) => match &outcome.winner {
                Some(winner) => write!(
                    f,
                    "The auction is over! The winner is {winner}, with the bid of: {}",
                    outcome.highest_bid
                ),
                None => write!(f, "The current highest bid is {}", outcome.highest_bid),
            },
            Reply::Invalid(e) => write!(f, "{e}"),
            Reply::Rejected(reason) => write!(f, "request rejected: {reason}"),
            Reply::Unavailable => write!(f, "service unavailable: all replicas are unreachable"),
        }
    }
}

impl Reply {
    fn from_error(error: RouterError) -> Self {
        match error {
            RouterError::Rejected { reason, .. } => Reply::Rejected(reason),
            RouterError::AllReplicasUnreachable | RouterError::Startup { .. } => Reply::Unavailable,
        }
    }

    fn print(&self) {
        let text = self.to_string();
        match self {
            Reply::Bid { status, .. } if status.is_accepted() => print_success(&text),
            Reply::Bid { .. } => print_warn(&text),
            Reply::Outcome(_) => print_info(&text),
            Reply::Invalid(_) | Reply::Rejected(_) | Reply::Unavailable => print_error(&text),
        }
    }
}

/// One bidder's session against the router.
pub struct Shell<R> {
    router: Router<R>,
    bidder: BidderId,
}

impl<R: ReplicaHandle> Shell<R> {
    pub fn new(router: Router<R>, bidder: BidderId) -> Self {
        Self { router, bidder }
    }

    /// Handles one input line. Returns `None` for ignored input.
    pub async fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let command = match parse_line(line)? {
            Ok(command) => command,
            Err(e) => return Some(Reply::Invalid(e)),
        };

        let reply = match command {
            ShellCommand::Bid(amount) => match self.router.broadcast_bid(&self.bidder, amount).await {
                Ok(status) => Reply::Bid { amount, status },
                Err(e) => Reply::from_error(e),
            },
            ShellCommand::Result => match self.router.query_outcome().await {
                Ok(outcome) => Reply::Outcome(outcome),
                Err(e) => Reply::from_error(e),
            },
        };

        debug!(live_replicas = self.router.len(), %reply, "command handled");
        Some(reply)
    }

    /// Reads lines until end of input.
    pub async fn run(mut self, input: impl AsyncBufRead + Unpin) -> Result<()> {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            if let Some(reply) = self.handle_line(&line).await {
                reply.print();
            }
        }
        Ok(())
    }
}
