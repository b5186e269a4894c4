mod in_memory_account_store;

pub(crate) use in_memory_account_store::InMemoryAccountStore;
