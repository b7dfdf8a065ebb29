use serde::Serialize;

use crate::entities::{
    about_us, about_us_home, blogs, policies, products, promotions, services, subcategories,
    testimonials,
};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Parses a JSON array column into a string list. Malformed or empty
/// columns read as an empty list rather than an error.
pub fn json_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub characteristics: String,
    pub benefits: Vec<String>,
    pub compatibility: String,
    pub use_case: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub discount: Option<f64>,
    pub status: bool,
    pub pdf_url: Option<String>,
    pub images: Vec<String>,
    pub subcategories: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProductDto {
    pub fn from_parts(
        model: products::Model,
        images: Vec<String>,
        subcategories: Vec<subcategories::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            characteristics: model.characteristics,
            benefits: json_list(&model.benefits),
            compatibility: model.compatibility,
            use_case: model.use_case,
            price: model.price,
            stock: model.stock,
            discount: model.discount,
            status: model.status,
            pdf_url: model.pdf_url,
            images,
            subcategories: subcategories.into_iter().map(|s| s.name).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlogDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl BlogDto {
    pub fn from_parts(model: blogs::Model, images: Vec<String>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            category_id: model.category_id,
            images,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PromotionDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

impl PromotionDto {
    pub fn from_parts(model: promotions::Model, images: Vec<String>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

impl From<services::Model> for ServiceDto {
    fn from(model: services::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            features: json_list(&model.features),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TestimonialDto {
    pub id: i32,
    pub customer_name: String,
    pub description: String,
    pub date: String,
    pub rating: i32,
    pub images: Vec<String>,
}

impl TestimonialDto {
    pub fn from_parts(model: testimonials::Model, images: Vec<String>) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            description: model.description,
            date: model.date,
            rating: model.rating,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PolicyDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

impl PolicyDto {
    pub fn from_parts(model: policies::Model, images: Vec<String>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AboutUsDto {
    pub id: i32,
    pub mission: String,
    pub vision: String,
    pub values: Vec<String>,
    pub youtube_name: Option<String>,
    pub youtube_url: Option<String>,
    pub images: Vec<String>,
}

impl AboutUsDto {
    pub fn from_parts(model: about_us::Model, images: Vec<String>) -> Self {
        Self {
            id: model.id,
            mission: model.mission,
            vision: model.vision,
            values: json_list(&model.about_values),
            youtube_name: model.youtube_name,
            youtube_url: model.youtube_url,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AboutUsHomeDto {
    pub id: i32,
    pub text_section_one: String,
    pub text_section_two: String,
    pub images: Vec<String>,
}

impl AboutUsHomeDto {
    pub fn from_parts(model: about_us_home::Model, images: Vec<String>) -> Self {
        Self {
            id: model.id,
            text_section_one: model.text_section_one,
            text_section_two: model.text_section_two,
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_list_parses_arrays() {
        assert_eq!(json_list(r#"["a","b"]"#), vec!["a", "b"]);
    }

    #[test]
    fn json_list_tolerates_garbage() {
        assert!(json_list("").is_empty());
        assert!(json_list("not json").is_empty());
        assert!(json_list("{}").is_empty());
    }
}
