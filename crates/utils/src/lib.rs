use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Creates a random alphanumeric string of the given length.
/// Used for api keys and the generated account creation code.
pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}
