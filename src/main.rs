fn main() {
    if let Err(err) = schema_tree::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
