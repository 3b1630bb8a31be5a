extern crate talon_engine;
extern crate tracing_subscriber;

use talon_engine::engine::TalonSearcher;

/// Starts structured logging (to stderr; UCI traffic itself stays on stdout via `println!`)
/// and runs the UCI read-eval-print loop until `quit`.
fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut searcher = TalonSearcher::init(true);
    searcher.uci();
}
