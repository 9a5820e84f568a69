fn main() {
    if let Err(err) = testsim::run() {
        eprintln!("{}", testsim::format_error(&err));
        std::process::exit(1);
    }
}
