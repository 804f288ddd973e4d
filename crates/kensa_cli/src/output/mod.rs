//! Report renderers.

mod json;
mod xml;

pub use json::JsonRenderer;
pub use xml::XmlRenderer;
