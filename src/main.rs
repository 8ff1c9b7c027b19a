//! rTutor main entrypoint.

use rtutor::run;
use rtutor::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
