fn main() {
    if let Err(err) = csv_explore::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
