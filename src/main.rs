fn main() {
    if let Err(err) = sheetgen::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
