use std::collections::HashMap;

use authbook_types::{normalize_address, Credential, Document, OrderedEntry, OrderedMap};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{flatten_by_address, group_by_address_ordered};

/// Credentials resolved for a batch of requested addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// One credential per distinct requested address that has one.
    pub accounts: OrderedMap<Credential>,
    /// One entry per requested address, in request order.
    pub accounts_list: Vec<OrderedEntry>,
}

/// The flattened credential of every distinct requested address.
///
/// Addresses are trimmed; blanks and addresses without a credential are
/// omitted.
pub fn lookup<S: AsRef<str>>(document: &Document, addresses: &[S]) -> OrderedMap<Credential> {
    pick_accounts(&flatten_by_address(document), addresses)
}

/// Resolve credentials for `addresses` against existing data only.
///
/// `accounts_list` has exactly one entry per input element. The n-th
/// occurrence of an address (0-based) takes item `n mod k` of that
/// address's `k`-long positional history, so repeated addresses cycle
/// through every recorded account. Addresses with no history reuse their
/// flattened credential; unknown addresses yield an entry with blank email
/// and password, and blank inputs yield an all-blank entry.
pub fn resolve<S: AsRef<str>>(document: &Document, addresses: &[S]) -> Resolution {
    let flattened = flatten_by_address(document);
    let grouped = group_by_address_ordered(document);

    let accounts = pick_accounts(&flattened, addresses);

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut accounts_list = Vec::with_capacity(addresses.len());
    for raw in addresses {
        let address = normalize_address(raw.as_ref());
        if address.is_empty() {
            accounts_list.push(OrderedEntry::default());
            continue;
        }

        let counter = occurrences.entry(address).or_insert(0);
        let occurrence = *counter;
        *counter += 1;

        let entry = match grouped.get(address).filter(|history| !history.is_empty()) {
            Some(history) => {
                let index = occurrence % history.len();
                debug!(
                    address,
                    occurrence,
                    index,
                    history = history.len(),
                    "assigned from history"
                );
                history[index].at(address)
            }
            None => match flattened.get(address) {
                Some(credential) => credential.at(address),
                None => {
                    debug!(address, "no account recorded");
                    OrderedEntry::placeholder(address)
                }
            },
        };
        accounts_list.push(entry);
    }

    debug!(
        requested = addresses.len(),
        accounts = accounts.len(),
        "resolved accounts"
    );
    Resolution {
        accounts,
        accounts_list,
    }
}

fn pick_accounts<S: AsRef<str>>(
    flattened: &OrderedMap<Credential>,
    addresses: &[S],
) -> OrderedMap<Credential> {
    let mut accounts = OrderedMap::new();
    for raw in addresses {
        let address = normalize_address(raw.as_ref());
        if address.is_empty() || accounts.contains_key(address) {
            continue;
        }
        if let Some(credential) = flattened.get(address) {
            accounts.insert(address.to_string(), credential.clone());
        }
    }
    accounts
}
