mod cli;

fn main() {
    if let Err(e) = cli::run() {
        tracing::error!(error = %e, "vault exited with an error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
