fn main() {
    if let Err(e) = extkit_cli::run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
