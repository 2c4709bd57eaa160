use flexipatch::ui::output;

fn main() {
    if let Err(err) = flexipatch::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
