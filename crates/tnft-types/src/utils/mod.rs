//! Utility functions for hex formatting and the EIP-712 signing domain.

pub mod eip712;
pub mod formatting;

pub use eip712::{signing_domain, DOMAIN_FIELDS, DOMAIN_TYPE, SIGNATURE_VERSION, SIGNING_DOMAIN};
pub use formatting::{truncate_id, with_0x_prefix, without_0x_prefix};
