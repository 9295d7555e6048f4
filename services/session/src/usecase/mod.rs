pub mod authorize;
pub mod authorizer;
pub mod guard;
pub mod session;
