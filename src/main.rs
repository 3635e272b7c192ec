fn main() {
    if let Err(err) = wiperecovery::cli::run() {
        println!("{}", err);
        std::process::exit(2);
    }
}
