pub mod addon_renderer;
pub mod extension_resolver;
pub mod function_table;
pub mod template_generator;

pub use extension_resolver::ExtensionResolver;
pub use template_generator::{TemplateGenerator, escape_single_line};
