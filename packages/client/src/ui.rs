//! Terminal prompt helpers.

use std::io::Write;

/// Redisplay the input prompt after printing an incoming event.
pub fn redisplay_prompt(identity: &str) {
    print!("{}> ", identity);
    let _ = std::io::stdout().flush();
}
