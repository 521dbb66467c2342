fn main() {
    if let Err(e) = sqlselect_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
