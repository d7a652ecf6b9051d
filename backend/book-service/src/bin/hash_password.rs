/// Operator helper: mint an argon2 PHC hash for BASIC_AUTH_PASSWORD_HASH
///
/// Usage:
///   cargo run --bin hash_password -- <password>
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

fn main() {
    let password = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("usage: hash_password <password>");
            std::process::exit(2);
        }
    };

    let salt = SaltString::generate(&mut OsRng);
    match Argon2::default().hash_password(password.as_bytes(), &salt) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("hashing failed: {e}");
            std::process::exit(1);
        }
    }
}
