pub mod card;
pub mod contact;

pub use card::listing_card;
pub use contact::contact_footer;
