mod templates;
pub use templates::TemplatesView;
