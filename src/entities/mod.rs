pub mod prelude;

pub mod about_us;
pub mod about_us_home;
pub mod blogs;
pub mod categories;
pub mod customers;
pub mod images;
pub mod info_contacts;
pub mod policies;
pub mod product_subcategories;
pub mod products;
pub mod promotions;
pub mod questions;
pub mod services;
pub mod subcategories;
pub mod testimonials;
pub mod users;
