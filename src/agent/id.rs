//! Agent id generation.

use rand::distributions::Uniform;
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 7;

/// New agent id: `agent_<unix millis>_<7 random base-36 chars>`.
///
/// Collisions are not detected; the time and random components together make
/// them practically impossible within a process lifetime.
pub fn generate_agent_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(Uniform::from(0..ALPHABET.len()))
        .take(RANDOM_SUFFIX_LEN)
        .map(|i| ALPHABET[i] as char)
        .collect();
    format!("agent_{}_{}", millis, suffix)
}
