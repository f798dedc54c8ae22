pub mod guard;
pub mod layout;
pub mod modal;
pub mod nav;
pub mod toast;
