//! Identity provider clients

mod client_credentials;

pub use client_credentials::ClientCredentialProvider;
