// Customer data - Random checkout details for one scenario run

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emma", "Robert", "Lisa", "James", "Maria",
    "William", "Jennifer", "Richard", "Patricia", "Charles",
];

const LAST_NAMES: &[&str] = &[
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
    "Hernandez",
    "Lopez",
    "Gonzalez",
];

/// Name and postal code typed into checkout step one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerData {
    pub first_name: String,
    pub last_name: String,
    /// Five decimal digits, never starting with zero
    pub zip_code: String,
}

impl CustomerData {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            zip_code: zip_code.into(),
        }
    }

    /// Draws a record from the thread-local generator
    pub fn random() -> Self {
        Self::generate(&mut rand::rng())
    }

    /// Draws a record from `rng`; seed it for reproducible data
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let first_name = FIRST_NAMES.choose(rng).copied().unwrap_or("John");
        let last_name = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
        let zip_code: u32 = rng.random_range(10_000..=99_999);

        Self::new(first_name, last_name, zip_code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_records_use_known_names_and_five_digit_zip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let customer = CustomerData::generate(&mut rng);
            assert!(FIRST_NAMES.contains(&customer.first_name.as_str()));
            assert!(LAST_NAMES.contains(&customer.last_name.as_str()));
            assert_eq!(customer.zip_code.len(), 5, "{customer:?}");
            assert!(customer.zip_code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(customer.zip_code.chars().next(), Some('0'));
        }
    }

    #[test]
    fn test_same_seed_same_customer() {
        let a = CustomerData::generate(&mut StdRng::seed_from_u64(42));
        let b = CustomerData::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_is_well_formed() {
        let customer = CustomerData::random();
        assert!(!customer.first_name.is_empty());
        assert!(!customer.last_name.is_empty());
        assert!(customer.zip_code.parse::<u32>().is_ok());
    }
}
