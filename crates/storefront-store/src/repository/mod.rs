//! # Repository Module
//!
//! In-memory repositories behind the [`Storefront`](crate::Storefront) handle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront (cheap Clone, one per process)                              │
//! │  ├── catalog()    → CatalogRepository   items + stock                   │
//! │  ├── coupons()    → CouponRepository    codes + remaining uses          │
//! │  ├── orders()     → OrderRepository     append-only history             │
//! │  └── users()      → UserDirectory       read-only accounts              │
//! │                                                                         │
//! │  Each repository owns its own Mutex. No operation ever holds two        │
//! │  locks at once, so there is no lock ordering to get wrong.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod coupons;
pub mod orders;
pub mod users;
