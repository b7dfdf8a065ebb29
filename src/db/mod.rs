use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::customer::NewCustomer;
pub use repositories::image::ImageOwner;
pub use repositories::product::{NewProduct, ProductChanges};
pub use repositories::blog::BlogChanges;
pub use repositories::testimonial::TestimonialChanges;
pub use repositories::user::User;

use crate::entities::{
    about_us, about_us_home, blogs, categories, customers, info_contacts, policies, products,
    promotions, questions, services, subcategories, testimonials,
};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(sea_orm::Statement::from_string(
                backend,
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Starts a transaction for multi-step writes (e.g. product + media).
    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        Ok(self.conn.begin().await?)
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn subcategory_repo(&self) -> repositories::category::SubcategoryRepository {
        repositories::category::SubcategoryRepository::new(self.conn.clone())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    fn image_repo(&self) -> repositories::image::ImageRepository {
        repositories::image::ImageRepository::new(self.conn.clone())
    }

    fn blog_repo(&self) -> repositories::blog::BlogRepository {
        repositories::blog::BlogRepository::new(self.conn.clone())
    }

    fn promotion_repo(&self) -> repositories::promotion::PromotionRepository {
        repositories::promotion::PromotionRepository::new(self.conn.clone())
    }

    fn service_repo(&self) -> repositories::service::ServiceRepository {
        repositories::service::ServiceRepository::new(self.conn.clone())
    }

    fn testimonial_repo(&self) -> repositories::testimonial::TestimonialRepository {
        repositories::testimonial::TestimonialRepository::new(self.conn.clone())
    }

    fn policy_repo(&self) -> repositories::policy::PolicyRepository {
        repositories::policy::PolicyRepository::new(self.conn.clone())
    }

    fn about_us_repo(&self) -> repositories::about_us::AboutUsRepository {
        repositories::about_us::AboutUsRepository::new(self.conn.clone())
    }

    fn info_contact_repo(&self) -> repositories::info_contact::InfoContactRepository {
        repositories::info_contact::InfoContactRepository::new(self.conn.clone())
    }

    fn question_repo(&self) -> repositories::question::QuestionRepository {
        repositories::question::QuestionRepository::new(self.conn.clone())
    }

    fn customer_repo(&self) -> repositories::customer::CustomerRepository {
        repositories::customer::CustomerRepository::new(self.conn.clone())
    }

    // ---- users ----

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        role: &str,
        password: &str,
    ) -> Result<User> {
        self.user_repo().create(username, email, role, password).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn set_reset_code(&self, email: &str, code: &str, expires_at: &str) -> Result<()> {
        self.user_repo().set_reset_code(email, code, expires_at).await
    }

    pub async fn consume_reset_code(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<bool> {
        self.user_repo()
            .consume_reset_code(email, code, new_password)
            .await
    }

    // ---- categories & subcategories ----

    pub async fn list_categories(&self) -> Result<Vec<categories::Model>> {
        self.category_repo().list().await
    }

    pub async fn get_category(&self, id: i32) -> Result<Option<categories::Model>> {
        self.category_repo().get(id).await
    }

    pub async fn get_category_by_name(&self, name: &str) -> Result<Option<categories::Model>> {
        self.category_repo().get_by_name(name).await
    }

    pub async fn create_category(&self, name: &str) -> Result<categories::Model> {
        self.category_repo().create(name).await
    }

    pub async fn update_category(&self, id: i32, name: &str) -> Result<Option<categories::Model>> {
        self.category_repo().update(id, name).await
    }

    pub async fn delete_category(&self, id: i32) -> Result<bool> {
        self.category_repo().delete(id).await
    }

    pub async fn list_subcategories(&self, category_id: i32) -> Result<Vec<subcategories::Model>> {
        self.subcategory_repo().list_for_category(category_id).await
    }

    pub async fn get_subcategory_by_name(&self, name: &str) -> Result<Option<subcategories::Model>> {
        self.subcategory_repo().get_by_name(name).await
    }

    pub async fn create_subcategory(
        &self,
        category_id: i32,
        name: &str,
    ) -> Result<subcategories::Model> {
        self.subcategory_repo().create(category_id, name).await
    }

    pub async fn delete_subcategory_by_name(&self, name: &str) -> Result<bool> {
        self.subcategory_repo().delete_by_name(name).await
    }

    // ---- products ----

    pub async fn list_products(&self) -> Result<Vec<products::Model>> {
        self.product_repo().list().await
    }

    pub async fn get_product(&self, id: i32) -> Result<Option<products::Model>> {
        self.product_repo().get(id).await
    }

    pub async fn get_product_by_name(&self, name: &str) -> Result<Option<products::Model>> {
        self.product_repo().get_by_name(name).await
    }

    pub async fn product_exists(&self, name: &str) -> Result<bool> {
        self.product_repo().exists(name).await
    }

    pub async fn insert_product<C: ConnectionTrait>(
        &self,
        conn: &C,
        input: &NewProduct,
    ) -> Result<i32> {
        repositories::product::ProductRepository::insert(conn, input).await
    }

    pub async fn attach_product_subcategories<C: ConnectionTrait>(
        &self,
        conn: &C,
        product_id: i32,
        subcategory_ids: &[i32],
    ) -> Result<()> {
        repositories::product::ProductRepository::attach_subcategories(
            conn,
            product_id,
            subcategory_ids,
        )
        .await
    }

    pub async fn product_subcategories(&self, product_id: i32) -> Result<Vec<subcategories::Model>> {
        self.product_repo().subcategories_for(product_id).await
    }

    pub async fn update_product(&self, id: i32, changes: &ProductChanges) -> Result<products::Model> {
        self.product_repo().update(id, changes).await
    }

    pub async fn set_product_pdf_url(&self, id: i32, pdf_url: Option<String>) -> Result<()> {
        self.product_repo().set_pdf_url(id, pdf_url).await
    }

    pub async fn delete_product(&self, id: i32) -> Result<bool> {
        self.product_repo().delete(id).await
    }

    // ---- images ----

    pub async fn insert_image<C: ConnectionTrait>(
        &self,
        conn: &C,
        owner: ImageOwner,
        owner_id: i32,
        stored_url: &str,
    ) -> Result<()> {
        repositories::image::ImageRepository::insert(conn, owner, owner_id, stored_url).await
    }

    pub async fn image_urls_for(&self, owner: ImageOwner, owner_id: i32) -> Result<Vec<String>> {
        self.image_repo().urls_for(owner, owner_id).await
    }

    pub async fn delete_images_for(&self, owner: ImageOwner, owner_id: i32) -> Result<Vec<String>> {
        self.image_repo().delete_for(owner, owner_id).await
    }

    // ---- blogs ----

    pub async fn list_blogs(&self) -> Result<Vec<blogs::Model>> {
        self.blog_repo().list().await
    }

    pub async fn list_blogs_for_category(&self, category_id: i32) -> Result<Vec<blogs::Model>> {
        self.blog_repo().list_for_category(category_id).await
    }

    pub async fn get_blog(&self, id: i32) -> Result<Option<blogs::Model>> {
        self.blog_repo().get(id).await
    }

    pub async fn create_blog(
        &self,
        title: &str,
        description: &str,
        category_id: i32,
    ) -> Result<blogs::Model> {
        self.blog_repo().insert(title, description, category_id).await
    }

    pub async fn update_blog(&self, id: i32, changes: &BlogChanges) -> Result<Option<blogs::Model>> {
        self.blog_repo().update(id, changes).await
    }

    pub async fn delete_blog(&self, id: i32) -> Result<bool> {
        self.blog_repo().delete(id).await
    }

    // ---- promotions ----

    pub async fn list_promotions(&self) -> Result<Vec<promotions::Model>> {
        self.promotion_repo().list().await
    }

    pub async fn get_promotion(&self, id: i32) -> Result<Option<promotions::Model>> {
        self.promotion_repo().get(id).await
    }

    pub async fn create_promotion(&self, title: &str, description: &str) -> Result<promotions::Model> {
        self.promotion_repo().insert(title, description).await
    }

    pub async fn update_promotion(
        &self,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<promotions::Model>> {
        self.promotion_repo().update(id, title, description).await
    }

    pub async fn delete_promotion(&self, id: i32) -> Result<bool> {
        self.promotion_repo().delete(id).await
    }

    // ---- services ----

    pub async fn list_services(&self) -> Result<Vec<services::Model>> {
        self.service_repo().list().await
    }

    pub async fn get_service(&self, id: i32) -> Result<Option<services::Model>> {
        self.service_repo().get(id).await
    }

    pub async fn create_service(
        &self,
        title: &str,
        description: &str,
        features: &[String],
    ) -> Result<services::Model> {
        self.service_repo().insert(title, description, features).await
    }

    pub async fn update_service(
        &self,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
        features: Option<&[String]>,
    ) -> Result<Option<services::Model>> {
        self.service_repo()
            .update(id, title, description, features)
            .await
    }

    pub async fn delete_service(&self, id: i32) -> Result<bool> {
        self.service_repo().delete(id).await
    }

    // ---- testimonials ----

    pub async fn list_testimonials(&self) -> Result<Vec<testimonials::Model>> {
        self.testimonial_repo().list().await
    }

    pub async fn get_testimonial(&self, id: i32) -> Result<Option<testimonials::Model>> {
        self.testimonial_repo().get(id).await
    }

    pub async fn create_testimonial(
        &self,
        customer_name: &str,
        description: &str,
        date: &str,
        rating: i32,
    ) -> Result<testimonials::Model> {
        self.testimonial_repo()
            .insert(customer_name, description, date, rating)
            .await
    }

    pub async fn update_testimonial(
        &self,
        id: i32,
        changes: &TestimonialChanges,
    ) -> Result<Option<testimonials::Model>> {
        self.testimonial_repo().update(id, changes).await
    }

    pub async fn delete_testimonial(&self, id: i32) -> Result<bool> {
        self.testimonial_repo().delete(id).await
    }

    // ---- policies ----

    pub async fn list_policies(&self) -> Result<Vec<policies::Model>> {
        self.policy_repo().list().await
    }

    pub async fn get_policy(&self, id: i32) -> Result<Option<policies::Model>> {
        self.policy_repo().get(id).await
    }

    pub async fn create_policy(&self, title: &str, description: &str) -> Result<policies::Model> {
        self.policy_repo().insert(title, description).await
    }

    pub async fn update_policy(
        &self,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<policies::Model>> {
        self.policy_repo().update(id, title, description).await
    }

    pub async fn delete_policy(&self, id: i32) -> Result<bool> {
        self.policy_repo().delete(id).await
    }

    // ---- about us ----

    pub async fn get_about_us(&self) -> Result<about_us::Model> {
        self.about_us_repo().get().await
    }

    pub async fn update_about_us(
        &self,
        id: i32,
        mission: Option<&str>,
        vision: Option<&str>,
        youtube_name: Option<&str>,
        youtube_url: Option<&str>,
    ) -> Result<Option<about_us::Model>> {
        self.about_us_repo()
            .update(id, mission, vision, youtube_name, youtube_url)
            .await
    }

    pub async fn set_about_us_values(&self, id: i32, values: &[String]) -> Result<()> {
        self.about_us_repo().set_values(id, values).await
    }

    pub async fn get_about_us_home(&self) -> Result<about_us_home::Model> {
        self.about_us_repo().get_home().await
    }

    pub async fn update_about_us_home(
        &self,
        id: i32,
        text_section_one: Option<&str>,
        text_section_two: Option<&str>,
    ) -> Result<Option<about_us_home::Model>> {
        self.about_us_repo()
            .update_home(id, text_section_one, text_section_two)
            .await
    }

    // ---- info contact ----

    pub async fn get_info_contact(&self) -> Result<info_contacts::Model> {
        self.info_contact_repo().get().await
    }

    pub async fn update_info_contact(
        &self,
        location: Option<&str>,
        cellphone: Option<&str>,
        email: Option<&str>,
        attention_hours: Option<&str>,
    ) -> Result<info_contacts::Model> {
        self.info_contact_repo()
            .update(location, cellphone, email, attention_hours)
            .await
    }

    // ---- questions ----

    pub async fn list_questions(&self) -> Result<Vec<questions::Model>> {
        self.question_repo().list().await
    }

    pub async fn create_question(&self, question: &str, answer: &str) -> Result<questions::Model> {
        self.question_repo().insert(question, answer).await
    }

    pub async fn update_question(
        &self,
        id: i32,
        question: Option<&str>,
        answer: Option<&str>,
    ) -> Result<Option<questions::Model>> {
        self.question_repo().update(id, question, answer).await
    }

    pub async fn delete_question(&self, id: i32) -> Result<bool> {
        self.question_repo().delete(id).await
    }

    // ---- customers ----

    pub async fn list_customers(&self) -> Result<Vec<customers::Model>> {
        self.customer_repo().list().await
    }

    pub async fn get_customer(&self, id: i32) -> Result<Option<customers::Model>> {
        self.customer_repo().get(id).await
    }

    pub async fn create_customer(&self, input: &NewCustomer) -> Result<customers::Model> {
        self.customer_repo().insert(input).await
    }

    pub async fn set_customer_active(
        &self,
        id: i32,
        active: bool,
    ) -> Result<Option<customers::Model>> {
        self.customer_repo().set_active(id, active).await
    }

    pub async fn delete_customer(&self, id: i32) -> Result<bool> {
        self.customer_repo().delete(id).await
    }
}
