use authbook_gen::{CredentialGenerator, GeneratorConfig};
use authbook_resolve::Resolution;
use authbook_store::{DocumentStore, YamlFileStore};
use authbook_types::{
    normalize_address, AccountUpdate, Credential, OrderedEntry, OrderedMap, SlotEntry, StepHeader,
    StepRecord,
};
use tracing::info;

use crate::config::BookConfig;
use crate::error::SdkResult;

/// High-level AuthBook API.
pub struct AuthBook<S> {
    store: S,
    generator: GeneratorConfig,
}

impl AuthBook<YamlFileStore> {
    /// Open the YAML-backed book described by `config`.
    ///
    /// Nothing touches the disk until the first operation.
    pub fn open(config: &BookConfig) -> Self {
        let store = YamlFileStore::new(config.data_path()).with_locking(config.lock);
        Self::new(store, config.generator.clone())
    }
}

impl<S: DocumentStore> AuthBook<S> {
    pub fn new(store: S, generator: GeneratorConfig) -> Self {
        Self { store, generator }
    }

    // ---- Generation ----

    /// A fresh credential for every distinct non-blank address.
    pub fn generate_for_addresses<A: AsRef<str>>(&self, addresses: &[A]) -> OrderedMap<Credential> {
        CredentialGenerator::from_entropy(self.generator.clone()).generate_for_addresses(addresses)
    }

    /// A fresh credential for every input element.
    pub fn generate_list_for_addresses<A: AsRef<str>>(&self, addresses: &[A]) -> Vec<Credential> {
        CredentialGenerator::from_entropy(self.generator.clone())
            .generate_list_for_addresses(addresses)
    }

    /// Generate and store accounts for one run in a single step.
    ///
    /// Distinct addresses get a `by_address` credential, merged into the
    /// node; every input element gets its own positional credential, and
    /// that list replaces the node's `by_order` history. Returns the update
    /// that was written.
    pub fn provision<A: AsRef<str>>(
        &self,
        project: &str,
        file: &str,
        addresses: &[A],
    ) -> SdkResult<AccountUpdate> {
        let accounts = self.generate_for_addresses(addresses);
        let list: Vec<OrderedEntry> = addresses
            .iter()
            .zip(self.generate_list_for_addresses(addresses))
            .map(|(address, credential)| credential.at(normalize_address(address.as_ref())))
            .collect();

        let update = AccountUpdate::new().with_accounts(accounts).with_list(list);
        self.store.write(project, file, &update)?;
        info!(project, file, requested = addresses.len(), "accounts provisioned");
        Ok(update)
    }

    // ---- Writes ----

    pub fn write(&self, project: &str, file: &str, update: &AccountUpdate) -> SdkResult<()> {
        self.store.write(project, file, update)?;
        Ok(())
    }

    pub fn write_step(
        &self,
        project: &str,
        file: &str,
        header: &StepHeader,
        update: &AccountUpdate,
    ) -> SdkResult<()> {
        self.store.write_step(project, file, header, update)?;
        Ok(())
    }

    // ---- Single-node reads ----

    pub fn read(&self, project: &str, file: &str) -> SdkResult<OrderedMap<Credential>> {
        Ok(self.store.read(project, file)?)
    }

    pub fn read_list(&self, project: &str, file: &str) -> SdkResult<Vec<OrderedEntry>> {
        Ok(self.store.read_list(project, file)?)
    }

    pub fn read_slots(&self, project: &str, file: &str) -> SdkResult<OrderedMap<SlotEntry>> {
        Ok(self.store.read_slots(project, file)?)
    }

    pub fn read_address_slots(&self, project: &str, file: &str) -> SdkResult<OrderedMap<String>> {
        Ok(self.store.read_address_slots(project, file)?)
    }

    pub fn read_steps(&self, project: &str, file: &str) -> SdkResult<Vec<StepRecord>> {
        Ok(self.store.read_steps(project, file)?)
    }

    pub fn projects(&self) -> SdkResult<Vec<String>> {
        Ok(self.store.projects()?)
    }

    pub fn files(&self, project: &str) -> SdkResult<Vec<String>> {
        Ok(self.store.files(project)?)
    }

    // ---- Document-wide resolution ----

    /// Existing credentials for the distinct requested addresses.
    pub fn lookup<A: AsRef<str>>(&self, addresses: &[A]) -> SdkResult<OrderedMap<Credential>> {
        let document = self.store.load()?;
        Ok(authbook_resolve::lookup(&document, addresses))
    }

    /// Resolve credentials for a run; never generates new ones.
    pub fn resolve<A: AsRef<str>>(&self, addresses: &[A]) -> SdkResult<Resolution> {
        let document = self.store.load()?;
        Ok(authbook_resolve::resolve(&document, addresses))
    }

    // ---- Accessors ----

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator_config(&self) -> &GeneratorConfig {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authbook_store::InMemoryDocumentStore;
    use std::collections::HashSet;

    fn book() -> AuthBook<InMemoryDocumentStore> {
        AuthBook::new(InMemoryDocumentStore::new(), GeneratorConfig::default())
    }

    fn accounts(address: &str, email: &str) -> OrderedMap<Credential> {
        [(address.to_string(), Credential::new(email, "123456"))]
            .into_iter()
            .collect()
    }

    #[test]
    fn write_then_read_round_trip() {
        let book = book();
        book.write("p", "f", &AccountUpdate::new().with_accounts(accounts("A", "a@x.io")))
            .unwrap();
        assert_eq!(book.read("p", "f").unwrap()["A"], Credential::new("a@x.io", "123456"));
    }

    #[test]
    fn writes_merge_rather_than_clobber() {
        let book = book();
        book.write("p", "f", &AccountUpdate::new().with_accounts(accounts("A", "a@x.io")))
            .unwrap();
        book.write("p", "f", &AccountUpdate::new().with_accounts(accounts("B", "b@x.io")))
            .unwrap();
        let read = book.read("p", "f").unwrap();
        assert_eq!(read["A"].email, "a@x.io");
        assert_eq!(read["B"].email, "b@x.io");
    }

    #[test]
    fn none_keeps_list_and_empty_clears_it() {
        let book = book();
        let list = vec![OrderedEntry::new("A", "a@x.io", "1")];
        book.write("p", "f", &AccountUpdate::new().with_list(list.clone()))
            .unwrap();
        book.write("p", "f", &AccountUpdate::new()).unwrap();
        assert_eq!(book.read_list("p", "f").unwrap(), list);

        book.write("p", "f", &AccountUpdate::new().with_list(Vec::new()))
            .unwrap();
        assert!(book.read_list("p", "f").unwrap().is_empty());
    }

    #[test]
    fn generation_uses_configured_password() {
        let config = GeneratorConfig {
            password: "hunter2".into(),
            ..Default::default()
        };
        let book = AuthBook::new(InMemoryDocumentStore::new(), config);
        let generated = book.generate_for_addresses(&["A", "B", "A"]);
        assert_eq!(generated.len(), 2);
        assert!(generated.values().all(|c| c.password == "hunter2"));
    }

    #[test]
    fn generated_list_matches_input_length() {
        let book = book();
        let list = book.generate_list_for_addresses(&["A", "A", "", "B"]);
        assert_eq!(list.len(), 4);
        let emails: HashSet<&str> = list.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), 4);
    }

    #[test]
    fn step_records_are_never_merged() {
        let book = book();
        let header = StepHeader::new(0, "login", "submit");
        book.write_step("p", "f", &header, &AccountUpdate::new()).unwrap();
        book.write_step("p", "f", &header, &AccountUpdate::new()).unwrap();
        assert_eq!(book.read_steps("p", "f").unwrap().len(), 2);
    }

    #[test]
    fn provision_writes_both_views() {
        let book = book();
        let written = book.provision("p", "run.xlsx", &["X", " X", "Y"]).unwrap();

        let by_address = book.read("p", "run.xlsx").unwrap();
        assert_eq!(by_address.len(), 2);
        assert_eq!(Some(&by_address), written.accounts.as_ref());

        let list = book.read_list("p", "run.xlsx").unwrap();
        let addresses: Vec<&str> = list.iter().map(|e| e.address.as_str()).collect();
        assert_eq!(addresses, vec!["X", "X", "Y"]);
        assert_ne!(list[0].email, list[1].email);
    }

    #[test]
    fn provisioned_accounts_cycle_on_resolve() {
        let book = book();
        book.provision("p", "f", &["X", "X"]).unwrap();
        let list = book.read_list("p", "f").unwrap();

        let resolution = book.resolve(&["X", "X", "X"]).unwrap();
        let emails: Vec<&str> = resolution
            .accounts_list
            .iter()
            .map(|e| e.email.as_str())
            .collect();
        assert_eq!(
            emails,
            vec![
                list[0].email.as_str(),
                list[1].email.as_str(),
                list[0].email.as_str()
            ]
        );
    }

    #[test]
    fn resolve_on_empty_store() {
        let book = book();
        let resolution = book.resolve(&["unknown-addr"]).unwrap();
        assert!(resolution.accounts.is_empty());
        assert_eq!(resolution.accounts_list, vec![OrderedEntry::placeholder("unknown-addr")]);
    }

    #[test]
    fn lookup_reads_across_projects() {
        let book = book();
        book.write("alpha", "f", &AccountUpdate::new().with_accounts(accounts("A", "a@x.io")))
            .unwrap();
        book.write("beta", "g", &AccountUpdate::new().with_accounts(accounts("B", "b@x.io")))
            .unwrap();
        let found = book.lookup(&["B", "A", "C"]).unwrap();
        let keys: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(book.projects().unwrap(), vec!["alpha", "beta"]);
        assert_eq!(book.files("beta").unwrap(), vec!["g"]);
    }

    #[test]
    fn open_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = BookConfig {
            data_dir: dir.path().join("Auth_Data"),
            ..Default::default()
        };
        let book = AuthBook::open(&config);
        book.write("p", "f", &AccountUpdate::new().with_accounts(accounts("A", "a@x.io")))
            .unwrap();
        assert!(config.data_path().exists());

        let reopened = AuthBook::open(&config);
        assert_eq!(reopened.read("p", "f").unwrap()["A"].email, "a@x.io");
    }
}
