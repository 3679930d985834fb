fn main() {
    if let Err(e) = repform::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
