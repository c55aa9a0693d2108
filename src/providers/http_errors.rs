use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::error::Error;

fn error_chain_matches(err: &(dyn StdError + 'static), kind: ErrorKind, needle: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

/// Maps a reqwest transport failure to an actionable `Error::Transport`.
/// Timeouts and connection-refused failures get specific guidance since they
/// are the common misconfigurations for a tool that talks to one endpoint.
pub(crate) fn transport_error(err: reqwest::Error, api_url: &str, timeout_secs: u64) -> Error {
    if err.is_timeout() || error_chain_matches(&err, ErrorKind::TimedOut, "timed out") {
        return Error::Transport(format!(
            "chat request timed out after {timeout_secs}s while calling '{api_url}'; \
             increase timeout_secs in ~/.pipellm.yaml or check endpoint responsiveness"
        ));
    }

    if err.is_connect() {
        if error_chain_matches(&err, ErrorKind::ConnectionRefused, "connection refused") {
            return Error::Transport(format!(
                "connection refused by chat endpoint at '{api_url}'; \
                 check api_url in ~/.pipellm.yaml"
            ));
        }

        return Error::Transport(format!(
            "failed to connect to chat endpoint at '{api_url}'; \
             check api_url and network connectivity"
        ));
    }

    Error::Transport(format!("failed to call chat endpoint at '{api_url}': {err}"))
}
