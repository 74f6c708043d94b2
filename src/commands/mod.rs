mod simplify;

pub use simplify::run_simplify;
