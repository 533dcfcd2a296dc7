//! Domain ports for the remote collaborator.

mod macros;
pub(crate) use macros::define_port_error;

mod remote_error;
mod role_gateway;
mod user_gateway;

pub use remote_error::RemoteError;
#[cfg(test)]
pub use role_gateway::MockRoleGateway;
pub use role_gateway::RoleGateway;
#[cfg(test)]
pub use user_gateway::MockUserGateway;
pub use user_gateway::UserGateway;
