fn main() {
    if let Err(e) = bjcoach_cli::logging::init_logging() {
        eprintln!("WARNING: logging disabled: {}", e);
    }
    let code = bjcoach_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
