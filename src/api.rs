//! Client for the food classification service.
//!
//! The service accepts a food photo and answers with a label plus
//! per-100g nutrition estimates. Numeric fields the service omits
//! deserialize as 0; the caller decides what to do with a label that
//! carries no nutrition data.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Classification result for one image.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodAnalysis {
    pub food: String,
    #[serde(default, alias = "korean_name")]
    pub food_korean: Option<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Set by the service when it recognized the food but has no
    /// nutrition record for it.
    #[serde(default)]
    pub message: Option<String>,
}

/// Per-100g nutrition record for a known food name.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodInfo {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

#[derive(Debug, Deserialize)]
struct TestResponse {
    #[serde(default)]
    message: String,
}

pub struct ClassifierClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Uploads an image to `/predict/` and returns the analysis.
    pub async fn analyze_image(
        &self,
        image_path: &Path,
    ) -> Result<FoodAnalysis, Box<dyn std::error::Error>> {
        let bytes = tokio::fs::read(image_path).await?;

        let file_name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "food_image.jpg".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/jpeg")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let analysis = self
            .client
            .post(format!("{}/predict/", self.base_url))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(analysis)
    }

    /// Looks up the per-100g nutrition record for a food name.
    pub async fn food_info(&self, name: &str) -> Result<FoodInfo, Box<dyn std::error::Error>> {
        let info = self
            .client
            .get(format!("{}/food/{}", self.base_url, name))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(info)
    }

    /// Pings the service's `/test/` endpoint.
    pub async fn test_connection(&self) -> Result<String, Box<dyn std::error::Error>> {
        let response: TestResponse = self
            .client
            .get(format!("{}/test/", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_full_response() {
        let json = r#"{
            "food": "bibimbap",
            "food_korean": "비빔밥",
            "confidence": 0.93,
            "calories": 150.0,
            "protein": 6.2,
            "carbs": 20.1,
            "fats": 4.5
        }"#;
        let analysis: FoodAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.food, "bibimbap");
        assert_eq!(analysis.food_korean.as_deref(), Some("비빔밥"));
        assert_eq!(analysis.calories, 150.0);
        assert!(analysis.message.is_none());
    }

    #[test]
    fn test_analysis_missing_fields_default_to_zero() {
        // the service returns only a label when it has no nutrition record
        let json = r#"{"food": "tteokbokki", "confidence": 0.71, "message": "no nutrition data"}"#;
        let analysis: FoodAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.food, "tteokbokki");
        assert_eq!(analysis.calories, 0.0);
        assert_eq!(analysis.protein, 0.0);
        assert_eq!(analysis.carbs, 0.0);
        assert_eq!(analysis.fats, 0.0);
        assert!(analysis.message.is_some());
    }

    #[test]
    fn test_analysis_korean_name_alias() {
        let json = r#"{"food": "kimbap", "korean_name": "김밥"}"#;
        let analysis: FoodAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.food_korean.as_deref(), Some("김밥"));
    }

    #[test]
    fn test_food_info_missing_fields_default_to_zero() {
        let json = r#"{"calories": 52.0, "carbs": 14.0}"#;
        let info: FoodInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.calories, 52.0);
        assert_eq!(info.carbs, 14.0);
        assert_eq!(info.protein, 0.0);
        assert_eq!(info.fats, 0.0);
    }

    #[test]
    fn test_test_response_message() {
        let json = r#"{"message": "Food classifier is running"}"#;
        let response: TestResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message, "Food classifier is running");
    }
}
