pub mod about_us;
pub mod blog;
pub mod category;
pub mod customer;
pub mod image;
pub mod info_contact;
pub mod policy;
pub mod product;
pub mod promotion;
pub mod question;
pub mod service;
pub mod testimonial;
pub mod user;
