//! Account service: the collaborator that lists users and performs the
//! mutations a completed form submits

mod store;
mod traits;

pub use store::LocalAccountStore;
pub use traits::{AccountService, Registration, User};

#[cfg(test)]
pub use traits::MockAccountService;
