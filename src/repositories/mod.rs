mod crm_contact_repository;
mod traits;

pub use crm_contact_repository::CrmContactRepository;
pub use traits::ContactRepository;
