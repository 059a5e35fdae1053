pub mod fake_extension_source;
pub mod fixtures;

#[allow(unused_imports)]
pub use fake_extension_source::FakeExtensionSource;
