pub use super::about_us::Entity as AboutUs;
pub use super::about_us_home::Entity as AboutUsHome;
pub use super::blogs::Entity as Blogs;
pub use super::categories::Entity as Categories;
pub use super::customers::Entity as Customers;
pub use super::images::Entity as Images;
pub use super::info_contacts::Entity as InfoContacts;
pub use super::policies::Entity as Policies;
pub use super::product_subcategories::Entity as ProductSubcategories;
pub use super::products::Entity as Products;
pub use super::promotions::Entity as Promotions;
pub use super::questions::Entity as Questions;
pub use super::services::Entity as Services;
pub use super::subcategories::Entity as Subcategories;
pub use super::testimonials::Entity as Testimonials;
pub use super::users::Entity as Users;
