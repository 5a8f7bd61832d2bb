use rand::seq::SliceRandom;
use rand::Rng;

/// Everyday Italian words offered by the random word picker
pub const RANDOM_ITALIAN_WORDS: [&str; 20] = [
    "libro", "sole", "mare", "casa", "amore", "tempo", "notte", "giorno", "parola", "numero",
    "colore", "musica", "arte", "scuola", "lavoro", "amico", "famiglia", "città", "natura",
    "viaggio",
];

pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RANDOM_ITALIAN_WORDS.choose(rng).copied().unwrap_or("parola")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_word_comes_from_list() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert!(RANDOM_ITALIAN_WORDS.contains(&random_word(&mut rng)));
        }
    }
}
