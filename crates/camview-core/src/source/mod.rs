mod resolver;

pub use resolver::StreamSourceResolver;
