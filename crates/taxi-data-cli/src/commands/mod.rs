pub mod all;
pub mod codes;
pub mod taxi;
pub mod weather;

use taxi_data::Feedback;

/// Print feedback items to stderr.
pub fn print_feedback(feedback: &[Feedback]) {
    for item in feedback {
        eprintln!("{item}");
    }
}
