//! Session state machine
//!
//! Sequences passphrase entry -> derivation -> balance lookup -> result
//! display -> reset. The machine owns the only mutable state in the
//! process; the controller applies events and executes the commands the
//! machine hands back, so transitions are testable without a network.
//!
//! At most one submit is in flight at a time: a submit arriving while a
//! lookup is outstanding, or while a result is on screen, is ignored
//! until a reset.

use thiserror::Error;

use crate::address;
use crate::balance::{AddressLookup, BalanceSummary, LookupError};
use crate::derive::{self, DeriveError};

/// Error carried by the `Failed` state
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Derive(#[from] DeriveError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Inputs to the state machine
#[derive(Debug)]
pub enum Event {
    /// Passphrase bytes, exactly as entered
    Submit(Vec<u8>),
    /// Outcome of the lookup dispatched for the last submit
    BalanceReceived(Result<BalanceSummary, LookupError>),
    Reset,
    Cancel,
}

/// Work the controller performs on the machine's behalf
#[derive(Debug)]
pub enum Command {
    Lookup(String),
    Quit,
}

#[derive(Debug)]
pub enum SessionState {
    AwaitingInput,
    Resolved {
        address: String,
        balance: BalanceSummary,
    },
    Failed {
        error: SessionError,
    },
}

impl SessionState {
    /// Renderable projection of the state, styling left to the caller
    pub fn report(&self) -> String {
        match self {
            SessionState::AwaitingInput => "(awaiting passphrase)".to_string(),
            SessionState::Resolved { address, balance } => {
                let mut out = format!(
                    "Public Address: {}\nHas transactions? {}\n",
                    address,
                    balance.has_activity()
                );
                if balance.has_activity() {
                    out.push_str(&format!(
                        "Funded balance: {}\nSpent balance: {}\n",
                        balance.funded_sat, balance.spent_sat
                    ));
                }
                out
            }
            SessionState::Failed { error } => format!("Check failed: {}\n", error),
        }
    }
}

pub struct Session {
    state: SessionState,
    /// Address of the submit currently awaiting its balance, if any
    in_flight: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingInput,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn report(&self) -> String {
        self.state.report()
    }

    /// Apply one event, returning the command the controller must run
    ///
    /// The passphrase and derived keys live only inside the `Submit` arm;
    /// only the encoded address survives it.
    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Submit(passphrase) => {
                if !matches!(self.state, SessionState::AwaitingInput) || self.in_flight.is_some() {
                    return None;
                }

                let seed = derive::seed_from_passphrase(&passphrase);
                match derive::derive_keypair(&seed) {
                    Ok(keys) => {
                        let address = address::p2pkh_address(&keys.public);
                        self.in_flight = Some(address.clone());
                        Some(Command::Lookup(address))
                    }
                    Err(e) => {
                        self.state = SessionState::Failed { error: e.into() };
                        None
                    }
                }
            }

            Event::BalanceReceived(result) => {
                let Some(address) = self.in_flight.take() else {
                    // No submit outstanding; stale result, drop it
                    return None;
                };
                self.state = match result {
                    Ok(balance) => SessionState::Resolved { address, balance },
                    Err(e) => SessionState::Failed { error: e.into() },
                };
                None
            }

            Event::Reset => {
                self.state = SessionState::AwaitingInput;
                self.in_flight = None;
                None
            }

            Event::Cancel => {
                if matches!(self.state, SessionState::AwaitingInput) && self.in_flight.is_none() {
                    Some(Command::Quit)
                } else {
                    None
                }
            }
        }
    }

    /// Drive a full submit: derivation, then the lookup, fed back in as
    /// an event. Blocks for the duration of the lookup.
    pub fn submit(&mut self, passphrase: Vec<u8>, lookup: &dyn AddressLookup) {
        if let Some(Command::Lookup(address)) = self.apply(Event::Submit(passphrase)) {
            let result = lookup.lookup(&address);
            self.apply(Event::BalanceReceived(result));
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
