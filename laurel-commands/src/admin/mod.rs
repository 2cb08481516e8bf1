pub(crate) mod access;
pub mod addadmin;
pub mod deleteuser;
pub mod deleteusers;
pub mod removeadmin;
pub mod showadmins;
