//! Registry trait for self-registering implementations.
//!
//! Pluggable components (signing agents today) expose a `Registry` struct
//! implementing this trait so the binary can look them up by the name used
//! in configuration.

/// Base trait for implementation registries.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	///
	/// For example "local" for `[account.implementations.local]`.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
