use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the seed tokens accepted by the search endpoint.
pub const SEED_LENGTH: usize = 6;

/// Generates a random alphanumeric seed for reproducible
/// [`Sorting::Random`][crate::search::Sorting::Random] ordering. Passing
/// the same seed with consecutive page numbers walks one fixed shuffle of
/// the result set.
pub fn generate() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SEED_LENGTH)
        .map(char::from)
        .collect()
}
