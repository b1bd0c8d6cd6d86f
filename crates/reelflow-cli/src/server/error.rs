//! Failures while binding or running the HTTP listener.

use std::io;

use thiserror::Error;

pub type ServerResult<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be opened.
    #[error("cannot listen on {address}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The listener failed after it started accepting connections.
    #[error("server stopped unexpectedly")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    pub fn bind(address: impl ToString, source: io::Error) -> Self {
        Self::Bind {
            address: address.to_string(),
            source,
        }
    }

    pub fn io_error(&self) -> &io::Error {
        let (Self::Bind { source, .. } | Self::Runtime(source)) = self;
        source
    }

    /// Operator hint printed next to the error, when one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        let hint = match self.io_error().kind() {
            io::ErrorKind::PermissionDenied => "choose a PORT of 1024 or above",
            io::ErrorKind::AddrInUse => "another process holds this PORT, pick a free one",
            io::ErrorKind::AddrNotAvailable => "HOST is not an address of this machine",
            _ if matches!(self, Self::Bind { .. }) => "verify HOST and PORT are reachable",
            _ => return None,
        };
        Some(hint)
    }
}
