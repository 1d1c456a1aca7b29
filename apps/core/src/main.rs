fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match searchpane_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[searchpane-core] {error}");
            eprintln!("{}", searchpane_core::runtime::USAGE);
            std::process::exit(2);
        }
    };

    if let Err(error) = searchpane_core::runtime::run_with_options(options) {
        eprintln!("[searchpane-core] runtime failed: {error}");
        std::process::exit(1);
    }
}
