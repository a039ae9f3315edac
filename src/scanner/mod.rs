mod engine;

pub use engine::Scanner;
