//! aranetlog main entrypoint.

use aranetlog::run;
use aranetlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
