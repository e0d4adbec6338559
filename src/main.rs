fn main() {
    if let Err(err) = expense_charts::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
