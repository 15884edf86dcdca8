use std::io;

fn main() {
    hilo_cli::logging::init_logging();
    let code = hilo_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
