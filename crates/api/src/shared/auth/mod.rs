mod policy;
mod route_guards;

pub use policy::{Permission, Policy};
pub use route_guards::{account_can_modify_user, protect_account_route, protect_route};
