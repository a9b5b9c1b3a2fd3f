// common/src/report.rs
//! Human-readable outcome of a flow.

use std::io::{self, Write};

use crate::config::Network;
use crate::error::{Fault, Result};
use crate::submit::Submitted;

/// What to do with a fault once it reaches the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Print it to the error stream and finish normally.
    Report,
    /// Hand it back to the caller untouched.
    Propagate,
}

pub fn explorer_url(network: Network, submitted: &Submitted) -> String {
    match submitted {
        Submitted::Transaction(digest) => {
            format!("https://suiexplorer.com/txblock/{}?network={}", digest, network)
        }
        Submitted::FundingObject(id) => format!("https://suiscan.xyz/{}/object/{}", network, id),
    }
}

pub fn success_message(network: Network, submitted: &Submitted) -> String {
    format!("Success! Check out your TX here: {}", explorer_url(network, submitted))
}

pub fn failure_message(fault: &Fault) -> String {
    format!("Oops, something went wrong: {}", fault)
}

pub struct Reporter<O, E> {
    network: Network,
    out: O,
    err: E,
}

impl Reporter<io::Stdout, io::Stderr> {
    pub fn stdio(network: Network) -> Self {
        Self::new(network, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(network: Network, out: O, err: E) -> Self {
        Self { network, out, err }
    }

    /// Writes the outcome. A fault is returned only under
    /// [`FaultPolicy::Propagate`].
    pub fn report(&mut self, outcome: Result<Submitted>, policy: FaultPolicy) -> Result<()> {
        match outcome {
            Ok(submitted) => {
                self.write_line(true, &success_message(self.network, &submitted));
                Ok(())
            }
            Err(fault) => match policy {
                FaultPolicy::Report => {
                    tracing::debug!(?fault, "fault reported");
                    self.write_line(false, &failure_message(&fault));
                    Ok(())
                }
                FaultPolicy::Propagate => Err(fault),
            },
        }
    }

    fn write_line(&mut self, success: bool, line: &str) {
        let sink: &mut dyn Write = if success { &mut self.out } else { &mut self.err };
        if let Err(e) = writeln!(sink, "{}", line) {
            tracing::warn!(error = %e, "could not write report");
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
