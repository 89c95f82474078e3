pub mod translator;

pub use translator::DeepLTranslator;
