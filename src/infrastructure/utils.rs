use rand::Rng;

pub const IDEMPOTENCY_KEY_LEN: usize = 40;

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A fresh 40-letter deduplication token for one mutating call.
///
/// The key is random, not derived from the request, so calling an operation
/// again after a failure sends a different key and Square treats it as a new
/// request. Callers that need idempotent retries must keep and resend the body
/// themselves.
pub fn generate_idempotency_key() -> String {
    random_letters(IDEMPOTENCY_KEY_LEN)
}

pub fn random_letters(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ASCII_LETTERS[rng.gen_range(0..ASCII_LETTERS.len())] as char)
        .collect()
}
