use jsoncsv::{parse_args, run, CliError, USAGE};

fn main() {
    env_logger::init();

    let result = parse_args(std::env::args().skip(1)).and_then(|cli| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        run(&cli, &mut out)
    });

    if let Err(e) = result {
        eprintln!("jsoncsv: {}", e);
        if matches!(e, CliError::Usage(_)) {
            eprintln!("{}", USAGE);
        }
        std::process::exit(e.exit_code());
    }
}
