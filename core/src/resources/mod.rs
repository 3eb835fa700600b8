//! One wrapper per Maplerad resource group.
//!
//! Wrappers borrow the `Transport` and hold nothing else; obtain them from
//! the accessors on [`Maplerad`](crate::Maplerad).

pub mod bills;
pub mod collections;
pub mod counterparties;
pub mod customers;
pub mod fx;
pub mod institutions;
pub mod issuing;
pub mod misc;
pub mod transactions;
pub mod transfers;
pub mod wallets;

pub use bills::{Bills, BuyAirtime};
pub use collections::{Collections, CreateVirtualAccount};
pub use counterparties::Counterparties;
pub use customers::{
    CreateCustomer, Customers, EnrollCustomer, UpdateCustomer, UpgradeTier1, UpgradeTier2,
};
pub use fx::{Fx, FxQuote};
pub use institutions::{InstitutionQuery, Institutions, ResolveAccount};
pub use issuing::{CardBrand, CardType, CreateBusinessCard, CreateCard, Issuing};
pub use misc::{CreditTestWallet, Misc};
pub use transactions::Transactions;
pub use transfers::{Transfer, TransferMeta, TransferScheme, Transfers};
pub use wallets::{WalletHistoryQuery, Wallets};
