//! Errors raised by remote collaborator adapters.

use super::define_port_error;

define_port_error! {
    /// Failures talking to the REST backend of record.
    pub enum RemoteError {
        /// The request could not be built from local inputs.
        InvalidRequest { message: String } => "remote request invalid: {message}",
        /// The connection failed or the body could not be read.
        Transport { message: String } => "remote transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } => "remote request timed out: {message}",
        /// The backend answered with a non-success status.
        Status { status: u16, message: String } => "remote returned {status}: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } => "remote response undecodable: {message}",
    }
}
