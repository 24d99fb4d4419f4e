//! CRM workflows: pushing generated records and associating existing ones.
//!
//! Everything here is generic over [`seedcrm_core::crm::CrmClient`] and
//! narrates its progress into a caller-owned
//! [`seedcrm_core::event::EventLog`]. Calls are issued one at a time.

pub mod batch;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod link;
pub mod matching;
pub mod pairs;
pub mod report;

pub use batch::{
  CONTACT_LINK_DELAY, TICKET_LINK_DELAY, push_companies, push_contacts,
  push_tickets,
};
pub use discover::{associate_by_domain, associate_by_priority};
pub use error::{Error, Result};
pub use fetch::fetch_companies;
pub use pairs::{PairInput, link_pairs};
