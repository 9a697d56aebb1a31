// generate_key.rs
// Utility to generate a new token key for the system

use rand::{distributions::Alphanumeric, Rng};

fn main() {
    let key: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    println!("Add this to your .env file:");
    println!("-------------------------------------------------");
    println!("TOKEN_KEY={}", key);
    println!("-------------------------------------------------");
    println!();
    println!("Keep this key secure and never commit it to version control.");
    println!("Tokens issued under a previous key stop decoding if it changes.");
}
