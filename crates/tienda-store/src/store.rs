//! # Memory Store
//!
//! The shared in-memory data layer and its configuration.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         MemoryStore                                     │
//! │                                                                         │
//! │  API startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new() ← Configure hashing cost                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc::new(MemoryStore::with_config(config)) ← shared by every handler  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐         │
//! │  │  ① users     RwLock<UserTable>                             │         │
//! │  │  ② products  RwLock<Table<Product>>                        │         │
//! │  │  ③ carts     RwLock<HashMap<UserId, Arc<Mutex<Cart>>>>     │         │
//! │  │  ④ orders    RwLock<Table<Order>>                          │         │
//! │  └───────────────────────────────────────────────────────────┘         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Order
//! Any operation holding more than one lock takes them in the order
//! ① → ② → ③ → ④ above and never acquires an earlier one while holding a
//! later one. Each cart has its own mutex, so cart edits for different users
//! never contend once the cart index has been read.
//!
//! Tokio's `RwLock` is fair: a queued writer blocks new readers, so report
//! readers cannot starve checkout.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use tienda_core::validation::normalize_email;
use tienda_core::{Cart, Order, Product, User, UserId};

use crate::credential::{CredentialHasher, HashingCost};
use crate::error::{StoreError, StoreResult};
use crate::table::Table;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use tienda_store::{HashingCost, MemoryStore, StoreConfig};
///
/// let store = MemoryStore::with_config(StoreConfig::new().hashing_cost(HashingCost::Standard));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Argon2 cost used for new credentials.
    /// Default: Standard
    pub hashing_cost: HashingCost,
}

impl StoreConfig {
    /// Creates the production configuration.
    pub fn new() -> Self {
        StoreConfig {
            hashing_cost: HashingCost::Standard,
        }
    }

    /// Sets the credential hashing cost.
    pub fn hashing_cost(mut self, cost: HashingCost) -> Self {
        self.hashing_cost = cost;
        self
    }

    /// Creates a configuration with minimum hashing cost (for testing).
    ///
    /// ## Usage
    /// ```rust
    /// use tienda_store::{MemoryStore, StoreConfig};
    ///
    /// let store = MemoryStore::with_config(StoreConfig::low_cost());
    /// // Registration in tests stays fast, even in debug builds
    /// ```
    pub fn low_cost() -> Self {
        StoreConfig {
            hashing_cost: HashingCost::Low,
        }
    }
}

// =============================================================================
// User Table
// =============================================================================

/// A user row plus the credential hash that never leaves the store.
#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub user: User,
    pub credential_hash: String,
}

/// Users with a normalized-email index.
#[derive(Debug, Default)]
pub(crate) struct UserTable {
    pub rows: Table<UserRecord>,
    pub by_email: HashMap<String, UserId>,
}

impl UserTable {
    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.by_email
            .get(&normalize_email(email))
            .and_then(|id| self.rows.get(*id))
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.by_email.contains_key(&normalize_email(email))
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// One cart behind its own lock.
pub(crate) type CartSlot = Arc<Mutex<Cart>>;

/// The in-memory store. Construct once and share through `Arc`.
///
/// ## Usage
/// ```rust,ignore
/// let store = Arc::new(MemoryStore::new());
///
/// let products: Arc<dyn ProductReader> = store.clone();
/// let carts: Arc<dyn CartMutator> = store.clone();
/// ```
pub struct MemoryStore {
    pub(crate) users: RwLock<UserTable>,
    pub(crate) products: RwLock<Table<Product>>,
    pub(crate) carts: RwLock<HashMap<UserId, CartSlot>>,
    pub(crate) orders: RwLock<Table<Order>>,
    pub(crate) hasher: CredentialHasher,
}

impl MemoryStore {
    /// Creates an empty store with the production configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::new())
    }

    /// Creates an empty store.
    pub fn with_config(config: StoreConfig) -> Self {
        MemoryStore {
            users: RwLock::new(UserTable::default()),
            products: RwLock::new(Table::new()),
            carts: RwLock::new(HashMap::new()),
            orders: RwLock::new(Table::new()),
            hasher: CredentialHasher::new(config.hashing_cost),
        }
    }

    /// Fails with `NotFound` unless the user exists.
    ///
    /// Takes and releases the users read lock. Callers holding a later lock
    /// must not call this.
    pub(crate) async fn require_user(&self, user_id: UserId) -> StoreResult<()> {
        if self.users.read().await.rows.contains(user_id) {
            Ok(())
        } else {
            Err(StoreError::not_found("User", user_id))
        }
    }

    /// Existing cart of a user, if one was ever created.
    pub(crate) async fn cart_slot(&self, user_id: UserId) -> Option<CartSlot> {
        self.carts.read().await.get(&user_id).cloned()
    }

    /// Cart of a user, created empty on first use.
    pub(crate) async fn cart_slot_or_create(&self, user_id: UserId) -> CartSlot {
        if let Some(slot) = self.cart_slot(user_id).await {
            return slot;
        }

        self.carts
            .write()
            .await
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(Cart::new(user_id))))
            .clone()
    }

    /// Every cart slot, for scans that must look inside each cart.
    pub(crate) async fn all_cart_slots(&self) -> Vec<CartSlot> {
        self.carts.read().await.values().cloned().collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}
