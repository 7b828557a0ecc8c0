use std::collections::HashSet;

use authbook_types::{normalize_address, Credential, OrderedMap};
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::email;

/// Generates credentials whose emails are unique within a single call.
///
/// Each call starts from an empty uniqueness pool. A candidate email is
/// drawn up to `max_attempts` times; if every draw collides with an email
/// already issued in this call, a fallback `user<digits>@<domain>` address is
/// used, counter-suffixed until it is unique, so generation always
/// terminates.
pub struct CredentialGenerator<R> {
    rng: R,
    config: GeneratorConfig,
    issued: HashSet<String>,
}

impl CredentialGenerator<ThreadRng> {
    /// A generator drawing from the thread-local RNG.
    pub fn from_entropy(config: GeneratorConfig) -> Self {
        Self::new(rand::thread_rng(), config)
    }
}

impl<R: Rng> CredentialGenerator<R> {
    pub fn new(rng: R, config: GeneratorConfig) -> Self {
        Self {
            rng,
            config,
            issued: HashSet::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// One credential per distinct address.
    ///
    /// Addresses are trimmed; blanks are skipped; the first occurrence of a
    /// repeated address wins and keeps its position.
    pub fn generate_for_addresses<S: AsRef<str>>(
        &mut self,
        addresses: &[S],
    ) -> OrderedMap<Credential> {
        self.issued.clear();
        let mut accounts = OrderedMap::new();
        for raw in addresses {
            let address = normalize_address(raw.as_ref());
            if address.is_empty() || accounts.contains_key(address) {
                continue;
            }
            let credential = self.next_credential();
            accounts.insert(address.to_string(), credential);
        }
        debug!(
            requested = addresses.len(),
            generated = accounts.len(),
            "generated accounts by address"
        );
        accounts
    }

    /// One credential per input element, duplicates and blanks included.
    pub fn generate_list_for_addresses<S: AsRef<str>>(
        &mut self,
        addresses: &[S],
    ) -> Vec<Credential> {
        self.issued.clear();
        let accounts: Vec<Credential> = addresses.iter().map(|_| self.next_credential()).collect();
        debug!(generated = accounts.len(), "generated ordered accounts");
        accounts
    }

    fn next_credential(&mut self) -> Credential {
        let email = self.unique_email();
        Credential::new(email, self.config.password.clone())
    }

    fn unique_email(&mut self) -> String {
        for _ in 0..self.config.max_attempts {
            let candidate = email::synthetic(&mut self.rng);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }

        let base = email::fallback(&mut self.rng, &self.config.fallback_domain);
        let mut candidate = base.clone();
        let mut suffix = 0u64;
        while !self.issued.insert(candidate.clone()) {
            suffix += 1;
            candidate = match base.split_once('@') {
                Some((local, domain)) => format!("{local}.{suffix}@{domain}"),
                None => format!("{base}.{suffix}"),
            };
        }
        debug!(email = %candidate, "synthetic candidates exhausted; using fallback");
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> CredentialGenerator<StdRng> {
        CredentialGenerator::new(StdRng::seed_from_u64(seed), GeneratorConfig::default())
    }

    /// An RNG that always yields zero, so every synthetic draw collides.
    fn stuck() -> CredentialGenerator<StepRng> {
        CredentialGenerator::new(StepRng::new(0, 0), GeneratorConfig::default())
    }

    // -----------------------------------------------------------------------
    // By address
    // -----------------------------------------------------------------------

    #[test]
    fn distinct_addresses_get_distinct_emails() {
        let mut generator = seeded(1);
        let addresses: Vec<String> = (0..50).map(|i| format!("https://env-{i}.test")).collect();
        let accounts = generator.generate_for_addresses(&addresses);
        assert_eq!(accounts.len(), 50);
        let emails: HashSet<&str> = accounts.values().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), 50);
    }

    #[test]
    fn dedups_trims_and_skips_blanks() {
        let mut generator = seeded(2);
        let accounts = generator.generate_for_addresses(&[" b ", "a", "", "b", "   ", "a "]);
        let keys: Vec<&str> = accounts.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn uses_configured_password() {
        let config = GeneratorConfig {
            password: "pa55".into(),
            ..Default::default()
        };
        let mut generator = CredentialGenerator::new(StdRng::seed_from_u64(3), config);
        let accounts = generator.generate_for_addresses(&["a"]);
        assert_eq!(accounts["a"].password, "pa55");
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let mut generator = seeded(4);
        let none: [&str; 0] = [];
        assert!(generator.generate_for_addresses(&none).is_empty());
    }

    // -----------------------------------------------------------------------
    // Ordered list
    // -----------------------------------------------------------------------

    #[test]
    fn list_is_one_to_one_with_input() {
        let mut generator = seeded(5);
        let input = ["a", "a", "", "b", "a"];
        let list = generator.generate_list_for_addresses(&input);
        assert_eq!(list.len(), input.len());
        let emails: HashSet<&str> = list.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), input.len());
    }

    // -----------------------------------------------------------------------
    // Collision fallback
    // -----------------------------------------------------------------------

    #[test]
    fn fallback_terminates_with_unique_emails() {
        let mut generator = stuck();
        let list = generator.generate_list_for_addresses(&["a", "b", "c", "d"]);
        let emails: Vec<&str> = list.iter().map(|c| c.email.as_str()).collect();

        // The first draw succeeds; every later one exhausts its attempts.
        assert!(!emails[0].starts_with("user"));
        assert_eq!(emails[1], "user00000000@example.com");
        assert_eq!(emails[2], "user00000000.1@example.com");
        assert_eq!(emails[3], "user00000000.2@example.com");
    }

    #[test]
    fn zero_attempts_goes_straight_to_fallback() {
        let config = GeneratorConfig {
            max_attempts: 0,
            fallback_domain: "qa.internal".into(),
            ..Default::default()
        };
        let mut generator = CredentialGenerator::new(StdRng::seed_from_u64(6), config);
        let accounts = generator.generate_for_addresses(&["a"]);
        assert!(accounts["a"].email.starts_with("user"));
        assert!(accounts["a"].email.ends_with("@qa.internal"));
    }

    #[test]
    fn pool_resets_between_calls() {
        let mut generator = stuck();
        let first = generator.generate_for_addresses(&["a"]);
        let second = generator.generate_for_addresses(&["a"]);
        // With a constant RNG both calls draw the same first candidate; that
        // is only possible if the second call started from an empty pool.
        assert_eq!(first["a"], second["a"]);
    }

    proptest! {
        #[test]
        fn batch_emails_are_unique(seed in any::<u64>(), count in 0usize..40) {
            let mut generator = seeded(seed);
            let addresses: Vec<String> = (0..count).map(|i| format!("addr-{i}")).collect();
            let accounts = generator.generate_for_addresses(&addresses);
            let emails: HashSet<String> = accounts.values().map(|c| c.email.clone()).collect();
            prop_assert_eq!(accounts.len(), count);
            prop_assert_eq!(emails.len(), count);
        }

        #[test]
        fn list_length_matches_input(
            seed in any::<u64>(),
            input in proptest::collection::vec("[a-c ]{0,3}", 0..30),
        ) {
            let mut generator = seeded(seed);
            let list = generator.generate_list_for_addresses(&input);
            prop_assert_eq!(list.len(), input.len());
        }
    }
}
