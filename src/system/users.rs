use std::collections::HashMap;

use sysinfo::Users;

/// uid → login name lookup, loaded once from the system user database.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    names: HashMap<u32, String>,
}

impl UserTable {
    pub fn load() -> Self {
        let users = Users::new_with_refreshed_list();
        let names = users
            .list()
            .iter()
            .map(|user| (**user.id(), user.name().to_string()))
            .collect();
        UserTable { names }
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, String)>,
    {
        UserTable {
            names: entries.into_iter().collect(),
        }
    }

    /// Falls back to the decimal uid when no account matches.
    pub fn resolve(&self, uid: u32) -> String {
        self.names
            .get(&uid)
            .cloned()
            .unwrap_or_else(|| uid.to_string())
    }
}
