//! Entity definitions for Loantrack
//!
//! Sea-ORM entity definitions for every table of the loan tracking schema.

pub mod app_user;
pub use app_user::Entity as AppUser;
pub mod bin;
pub use bin::Entity as Bin;
pub mod device;
pub use device::Entity as Device;
pub mod device_condition;
pub use device_condition::Entity as DeviceCondition;
pub mod device_status;
pub use device_status::Entity as DeviceStatus;
pub mod device_type;
pub use device_type::Entity as DeviceType;
pub mod loan;
pub use loan::Entity as Loan;
pub mod loan_status;
pub use loan_status::Entity as LoanStatus;
pub mod location;
pub use location::Entity as Location;
pub mod user_location_access;
pub use user_location_access::Entity as UserLocationAccess;
pub mod user_role;
pub use user_role::Entity as UserRole;
