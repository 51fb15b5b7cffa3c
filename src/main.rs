fn main() {
    if let Err(err) = wall_order::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
