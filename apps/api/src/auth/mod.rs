//! Authentication and authorization: password hashing, session tokens, and the
//! request gate that turns a bearer token into a typed [`gate::Principal`].

pub mod gate;
pub mod password;
pub mod token;
