mod shell;
pub use shell::Shell;

mod templates;
pub use templates::Templates;
