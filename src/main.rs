//! api1 compiler CLI entry point

fn main() {
    api1::cli::run();
}
